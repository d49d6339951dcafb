//! Property-based tests for the canonicalizer and the aggregation views.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p podium --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p podium --test property_tests
//! ```

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use podium::analysis::{self, Selection};
use podium::schema::columns;
use podium::{AthleteRecord, CanonicalTable, Canonicalizer, DataTable, Medal, RawDataset, RegionLookup, Sex};

// =============================================================================
// Test Strategies
// =============================================================================

fn medal() -> impl Strategy<Value = Option<Medal>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(Medal::Gold)),
        1 => Just(Some(Medal::Silver)),
        1 => Just(Some(Medal::Bronze)),
    ]
}

/// Any finite value, or missing.
fn measure() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(any::<f64>().prop_filter("finite", |v| v.is_finite()))
}

/// Records drawn from small pools so that collisions are common.
fn record() -> impl Strategy<Value = AthleteRecord> {
    (
        prop::sample::select(vec!["Ann", "Bob", "Cid", "Dee", "Eve"]),
        prop::sample::select(vec![Sex::Male, Sex::Female]),
        measure(),
        measure(),
        measure(),
        prop::sample::select(vec!["A", "B", "C"]),
        prop::sample::select(vec![1996, 2000, 2004]),
        prop::sample::select(vec!["Rowing", "Judo"]),
        prop::sample::select(vec!["E1", "E2"]),
        medal(),
    )
        .prop_map(|(name, sex, age, height, weight, region, year, sport, event, medal)| {
            let mut record = AthleteRecord::new(name)
                .with_sex(sex)
                .with_team(format!("Team {}", region))
                .with_noc(region)
                .with_region(region)
                .with_games(year, "Host")
                .with_sport(sport)
                .with_event(event);
            record.age = age;
            record.height = height;
            record.weight = weight;
            record.medal = medal;
            record
        })
}

fn table() -> impl Strategy<Value = CanonicalTable> {
    prop::collection::vec(record(), 0..60).prop_map(|rows| rows.into_iter().collect())
}

/// Raw rows in the source layout, including other seasons and odd medals.
fn raw_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    let row = (
        prop::sample::select(vec!["Ann", "Bob", "Cid"]),
        prop::sample::select(vec!["", "NA", "21", "30.5"]),
        prop::sample::select(vec!["USA", "GBR", "XYZ"]),
        prop::sample::select(vec!["1996", "2000", "NA", "2000.0"]),
        prop::sample::select(vec!["Summer", "Winter"]),
        prop::sample::select(vec!["Gold", "silver", "NA", "Platinum", ""]),
    )
        .prop_map(|(name, age, noc, year, season, medal)| {
            vec![
                name.to_string(),
                age.to_string(),
                noc.to_string(),
                format!("{} {}", if year == "NA" { "2008" } else { "1996" }, season),
                year.to_string(),
                season.to_string(),
                "Rowing".to_string(),
                medal.to_string(),
            ]
        });
    prop::collection::vec(row, 0..40)
}

/// Age cells as an export might write them: any number, in any notation.
fn age_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<f64>().prop_map(|v| v.to_string()),
        any::<f64>().prop_map(|v| format!("{:e}", v)),
        "-?[0-9]{1,30}(\\.[0-9]{1,5})?",
        Just("NA".to_string()),
    ]
}

fn raw_headers() -> Vec<String> {
    ["Name", "Age", "NOC", "Games", "Year", "Season", "Sport", "Medal"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn lookup() -> RegionLookup {
    RegionLookup::from_pairs([("USA", "USA"), ("GBR", "UK")])
}

// =============================================================================
// Canonicalizer Properties
// =============================================================================

proptest! {
    /// Exactly one indicator is set when a medal is set, none otherwise.
    #[test]
    fn indicator_invariant(rows in raw_rows()) {
        let raw = RawDataset::from_tables(DataTable::new(raw_headers(), rows), Some(lookup()));
        let outcome = Canonicalizer::new().canonicalize(raw);
        let data = outcome.table.to_data_table();

        let medal = data.column_index(columns::MEDAL).unwrap();
        let gold = data.column_index(columns::GOLD).unwrap();
        let silver = data.column_index(columns::SILVER).unwrap();
        let bronze = data.column_index(columns::BRONZE).unwrap();
        for row in &data.rows {
            let sum: u32 = [gold, silver, bronze]
                .iter()
                .map(|&i| row[i].parse::<u32>().unwrap())
                .sum();
            prop_assert_eq!(sum == 1, !row[medal].is_empty());
            prop_assert!(sum <= 1);
        }
    }

    /// Canonicalizing canonical output changes nothing.
    #[test]
    fn canonicalize_is_idempotent(rows in raw_rows()) {
        let canonicalizer = Canonicalizer::new();
        let raw = RawDataset::from_tables(DataTable::new(raw_headers(), rows), Some(lookup()));
        let first = canonicalizer.canonicalize(raw);

        let again = RawDataset::from_tables(first.table.to_data_table(), Some(lookup()));
        let second = canonicalizer.canonicalize(again);

        prop_assert_eq!(&second.table, &first.table);
        prop_assert_eq!(second.report.season_filtered, 0);
        prop_assert_eq!(second.report.duplicates_removed, 0);
    }

    /// The canonicalizer never drops rows other than by season or duplication.
    #[test]
    fn row_accounting(rows in raw_rows()) {
        let raw = RawDataset::from_tables(DataTable::new(raw_headers(), rows), None);
        let report = Canonicalizer::new().canonicalize(raw).report;
        prop_assert_eq!(
            report.input_rows,
            report.season_filtered + report.duplicates_removed + report.output_rows
        );
    }
}

proptest! {
    /// Any numeric age survives canonicalization and the distribution views.
    #[test]
    fn arbitrary_ages_never_panic(ages in prop::collection::vec(age_cell(), 1..30)) {
        let rows = ages
            .into_iter()
            .enumerate()
            .map(|(i, age)| {
                vec![
                    format!("Athlete {}", i),
                    age,
                    "2000".to_string(),
                    "Summer".to_string(),
                    "Rowing".to_string(),
                    (if i % 2 == 0 { "Gold" } else { "NA" }).to_string(),
                ]
            })
            .collect();
        let headers = ["Name", "Age", "Year", "Season", "Sport", "Medal"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let raw = RawDataset::from_tables(DataTable::new(headers, rows), None);
        let table = Canonicalizer::new().canonicalize(raw).table;

        let ages = analysis::age_distribution(&table);
        prop_assert!(ages.all.values.iter().all(|a| (0.0..=150.0).contains(a)));
        for dist in ages.distributions() {
            prop_assert!(dist.histogram(analysis::AGE_BIN_SIZE).len() <= analysis::MAX_HISTOGRAM_BINS);
            let _ = dist.density(50);
            let _ = dist.summary();
        }
        for dist in analysis::gold_age_distribution_by_sport(&table, &["Rowing"]) {
            let _ = dist.histogram(analysis::AGE_BIN_SIZE);
            let _ = dist.density(50);
        }
    }
}

// =============================================================================
// Aggregation Properties
// =============================================================================

proptest! {
    /// Totals add up and match the distinct team medals.
    #[test]
    fn tally_totals(table in table()) {
        let tally = analysis::medal_tally(&table);
        for row in &tally {
            prop_assert_eq!(row.total, row.gold + row.silver + row.bronze);
        }
        for pair in tally.windows(2) {
            prop_assert!(pair[0].gold >= pair[1].gold);
        }

        let team_medals: HashSet<_> = table
            .iter()
            .filter(|r| r.has_medal())
            .map(|r| (&r.team, &r.noc, &r.games, r.year, &r.city, &r.sport, &r.event, r.medal))
            .collect();
        let total: u32 = tally.iter().map(|r| r.total).sum();
        prop_assert_eq!(total as usize, team_medals.len());
    }

    /// Option lists start with Overall and are strictly ascending.
    #[test]
    fn option_lists_sorted(table in table()) {
        let options = analysis::country_year_list(&table);
        prop_assert_eq!(&options.years[0], &Selection::Overall);
        prop_assert_eq!(&options.countries[0], &Selection::Overall);
        prop_assert!(options.years.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(options.countries.windows(2).all(|w| w[0] < w[1]));
    }

    /// Rankings hold at most fifteen athletes with non-increasing wins.
    #[test]
    fn rankings_bounded(table in table()) {
        for ranked in [
            analysis::most_successful(&table, &Selection::Overall),
            analysis::most_successful(&table, &Selection::only("Judo")),
            analysis::most_successful_by_country(&table, &Selection::only("A")),
        ] {
            prop_assert!(ranked.len() <= analysis::TOP_ATHLETES);
            prop_assert!(ranked.windows(2).all(|w| w[0].total_wins >= w[1].total_wins));
        }
    }

    /// Male plus female equals the distinct athletes of each year.
    #[test]
    fn gender_merge_complete(table in table()) {
        let mut expected: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();
        for r in table.iter() {
            expected.entry(r.year).or_default().insert(r.name.as_str());
        }

        let points = analysis::gender_participation(&table, None);
        prop_assert_eq!(points.len(), expected.len());
        for point in points {
            prop_assert_eq!(point.male + point.female, expected[&point.year].len());
        }
    }

    /// Every view accepts any table without panicking.
    #[test]
    fn views_never_panic(table in table()) {
        let _ = analysis::overview(&table);
        let _ = analysis::events_per_sport_over_time(&table);
        let _ = analysis::country_sport_heatmap(&table, "B");
        let _ = analysis::fetch_medal_tally(&table, &Selection::Only(2000), &Selection::only("C"));
        let _ = analysis::height_weight_scatter(&table, "Rowing");
        let ages = analysis::age_distribution(&table);
        for dist in ages.distributions() {
            prop_assert!(dist.histogram(analysis::AGE_BIN_SIZE).len() <= analysis::MAX_HISTOGRAM_BINS);
            let _ = dist.density(50);
            let _ = dist.summary();
        }
        for dist in analysis::gold_age_distribution_by_sport(&table, &analysis::DEFAULT_FEATURED_SPORTS) {
            let _ = dist.histogram(analysis::AGE_BIN_SIZE);
            let _ = dist.density(50);
        }
    }
}
