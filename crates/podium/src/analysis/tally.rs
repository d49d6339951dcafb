//! Medal tallies and the filter option lists.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::schema::{AthleteRecord, CanonicalTable};

use super::dedup::team_rows;
use super::frame::{Frame, ToFrame};
use super::selection::Selection;

/// Medal counts for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub region: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// Medal counts for one year of a single country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTallyRow {
    pub year: i32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// Result of [`fetch_medal_tally`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "rows", rename_all = "snake_case")]
pub enum FilteredTally {
    /// One row per region, Gold descending.
    ByRegion(Vec<TallyRow>),
    /// One row per year for a single country, year ascending.
    ByYear(Vec<YearTallyRow>),
}

impl FilteredTally {
    pub fn len(&self) -> usize {
        match self {
            FilteredTally::ByRegion(rows) => rows.len(),
            FilteredTally::ByYear(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Values offered by the year and country filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// `Overall`, then every year ascending.
    pub years: Vec<Selection<i32>>,
    /// `Overall`, then every region ascending.
    pub countries: Vec<Selection<String>>,
}

/// Medal count for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub medals: u32,
}

type Counts = [u32; 3];

fn add(counts: &mut Counts, record: &AthleteRecord) {
    counts[0] += record.gold();
    counts[1] += record.silver();
    counts[2] += record.bronze();
}

/// Group by region and sort by Gold descending, ties by region name.
fn tally_by_region<'a>(rows: impl IntoIterator<Item = &'a AthleteRecord>) -> Vec<TallyRow> {
    let mut groups: BTreeMap<&str, Counts> = BTreeMap::new();
    for record in rows {
        add(groups.entry(record.region.as_str()).or_default(), record);
    }

    let mut tally: Vec<TallyRow> = groups
        .into_iter()
        .map(|(region, [gold, silver, bronze])| TallyRow {
            region: region.to_string(),
            gold,
            silver,
            bronze,
            total: gold + silver + bronze,
        })
        .collect();
    tally.sort_by(|a, b| b.gold.cmp(&a.gold));
    tally
}

/// Medal tally per region over the whole table.
///
/// Team medals count once (team-key de-duplication). Regions without a
/// medal are listed with zeros.
pub fn medal_tally(table: &CanonicalTable) -> Vec<TallyRow> {
    let tally = tally_by_region(team_rows(table));
    tracing::debug!(rows = tally.len(), "medal tally");
    tally
}

/// Year and country options, each led by `Overall`.
pub fn country_year_list(table: &CanonicalTable) -> FilterOptions {
    let years: BTreeSet<i32> = table.iter().map(|r| r.year).collect();
    let countries: BTreeSet<&str> = table.iter().map(|r| r.region.as_str()).collect();

    FilterOptions {
        years: std::iter::once(Selection::Overall)
            .chain(years.into_iter().map(Selection::Only))
            .collect(),
        countries: std::iter::once(Selection::Overall)
            .chain(countries.into_iter().map(|c| Selection::Only(c.to_string())))
            .collect(),
    }
}

/// Medal tally restricted to a year and/or a country.
///
/// With a concrete country and `Overall` years the result is broken down by
/// year; otherwise it is a per-region tally of the matching rows.
pub fn fetch_medal_tally(
    table: &CanonicalTable,
    year: &Selection<i32>,
    country: &Selection<String>,
) -> FilteredTally {
    let rows: Vec<&AthleteRecord> = team_rows(table)
        .into_iter()
        .filter(|r| year.admits(&r.year) && country.admits(r.region.as_str()))
        .collect();

    let tally = if year.is_overall() && !country.is_overall() {
        let mut groups: BTreeMap<i32, Counts> = BTreeMap::new();
        for record in rows {
            add(groups.entry(record.year).or_default(), record);
        }
        FilteredTally::ByYear(
            groups
                .into_iter()
                .map(|(year, [gold, silver, bronze])| YearTallyRow {
                    year,
                    gold,
                    silver,
                    bronze,
                    total: gold + silver + bronze,
                })
                .collect(),
        )
    } else {
        FilteredTally::ByRegion(tally_by_region(rows))
    };

    tracing::debug!(%year, %country, rows = tally.len(), "filtered medal tally");
    tally
}

/// Number of medals a country won in each year, team medals counted once.
pub fn yearwise_medal_tally(table: &CanonicalTable, country: &str) -> Vec<YearCount> {
    let mut years: BTreeMap<i32, u32> = BTreeMap::new();
    for record in team_rows(table) {
        if record.has_medal() && record.region == country {
            *years.entry(record.year).or_default() += 1;
        }
    }
    years
        .into_iter()
        .map(|(year, medals)| YearCount { year, medals })
        .collect()
}

impl ToFrame for [TallyRow] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .text("region", self.iter().map(|r| r.region.as_str()))
            .integer("Gold", self.iter().map(|r| r.gold))
            .integer("Silver", self.iter().map(|r| r.silver))
            .integer("Bronze", self.iter().map(|r| r.bronze))
            .integer("total", self.iter().map(|r| r.total))
    }
}

impl ToFrame for [YearTallyRow] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .integer("Year", self.iter().map(|r| r.year))
            .integer("Gold", self.iter().map(|r| r.gold))
            .integer("Silver", self.iter().map(|r| r.silver))
            .integer("Bronze", self.iter().map(|r| r.bronze))
            .integer("total", self.iter().map(|r| r.total))
    }
}

impl ToFrame for FilteredTally {
    fn to_frame(&self) -> Frame {
        match self {
            FilteredTally::ByRegion(rows) => rows.to_frame(),
            FilteredTally::ByYear(rows) => rows.to_frame(),
        }
    }
}

impl ToFrame for [YearCount] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .integer("Year", self.iter().map(|r| r.year))
            .integer("Medal", self.iter().map(|r| r.medals))
    }
}

impl ToFrame for FilterOptions {
    fn to_frame(&self) -> Frame {
        let len = self.years.len().max(self.countries.len());
        let cell = |s: Option<String>| s.unwrap_or_default();
        Frame::new()
            .text(
                "Year",
                (0..len).map(|i| cell(self.years.get(i).map(|y| y.to_string()))),
            )
            .text(
                "Country",
                (0..len).map(|i| cell(self.countries.get(i).map(|c| c.to_string()))),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Medal;

    fn medal(name: &str, region: &str, team: &str, year: i32, medal: Medal) -> AthleteRecord {
        AthleteRecord::new(name)
            .with_region(region)
            .with_noc(region)
            .with_team(team)
            .with_games(year, "Host")
            .with_sport("Rowing")
            .with_event("Eights")
            .with_medal(medal)
    }

    #[test]
    fn test_team_medal_counted_once() {
        let table: CanonicalTable = vec![
            medal("P1", "A", "T1", 2000, Medal::Gold),
            medal("P2", "A", "T1", 2000, Medal::Gold),
            medal("P3", "B", "T2", 2000, Medal::Silver),
        ]
        .into_iter()
        .collect();

        let tally = medal_tally(&table);
        assert_eq!(
            tally,
            vec![
                TallyRow { region: "A".into(), gold: 1, silver: 0, bronze: 0, total: 1 },
                TallyRow { region: "B".into(), gold: 0, silver: 1, bronze: 0, total: 1 },
            ]
        );
    }

    #[test]
    fn test_ties_break_by_region() {
        let table: CanonicalTable = vec![
            medal("P1", "Zambia", "Z", 2000, Medal::Gold),
            medal("P2", "Austria", "Au", 2000, Medal::Gold),
            AthleteRecord::new("P3").with_region("Chad"),
        ]
        .into_iter()
        .collect();

        let regions: Vec<_> = medal_tally(&table).into_iter().map(|r| r.region).collect();
        assert_eq!(regions, vec!["Austria", "Zambia", "Chad"]);
    }

    #[test]
    fn test_country_year_list() {
        let table: CanonicalTable = vec![
            medal("P1", "B", "T", 2004, Medal::Gold),
            medal("P2", "A", "T", 2000, Medal::Gold),
            medal("P3", "B", "T", 2000, Medal::Bronze),
        ]
        .into_iter()
        .collect();

        let options = country_year_list(&table);
        assert_eq!(
            options.years,
            vec![Selection::Overall, Selection::Only(2000), Selection::Only(2004)]
        );
        assert_eq!(
            options.countries,
            vec![Selection::Overall, Selection::only("A"), Selection::only("B")]
        );

        let empty = country_year_list(&CanonicalTable::empty());
        assert_eq!(empty.years, vec![Selection::Overall]);
        assert_eq!(empty.countries, vec![Selection::Overall]);
    }

    #[test]
    fn test_fetch_by_year_for_country() {
        let table: CanonicalTable = vec![
            medal("P1", "A", "T1", 2004, Medal::Gold),
            medal("P2", "A", "T2", 2000, Medal::Bronze),
            medal("P3", "A", "T3", 2000, Medal::Gold),
            medal("P4", "B", "T4", 2000, Medal::Gold),
        ]
        .into_iter()
        .collect();

        let tally = fetch_medal_tally(&table, &Selection::Overall, &Selection::only("A"));
        assert_eq!(
            tally,
            FilteredTally::ByYear(vec![
                YearTallyRow { year: 2000, gold: 1, silver: 0, bronze: 1, total: 2 },
                YearTallyRow { year: 2004, gold: 1, silver: 0, bronze: 0, total: 1 },
            ])
        );
    }

    #[test]
    fn test_fetch_by_region() {
        let table: CanonicalTable = vec![
            medal("P1", "A", "T1", 2004, Medal::Gold),
            medal("P2", "B", "T2", 2000, Medal::Gold),
        ]
        .into_iter()
        .collect();

        match fetch_medal_tally(&table, &Selection::Only(2000), &Selection::Overall) {
            FilteredTally::ByRegion(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].region, "B");
            }
            other => panic!("unexpected {:?}", other),
        }

        let none = fetch_medal_tally(&table, &Selection::Only(1896), &Selection::only("A"));
        assert!(none.is_empty());
        assert_eq!(none.to_frame().column_count(), 5);
    }

    #[test]
    fn test_yearwise_medal_tally() {
        let table: CanonicalTable = vec![
            medal("P1", "A", "T1", 2000, Medal::Gold),
            medal("P2", "A", "T1", 2000, Medal::Gold),
            medal("P3", "A", "T1", 2004, Medal::Silver),
            AthleteRecord::new("P4").with_region("A").with_games(2008, "Beijing"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            yearwise_medal_tally(&table, "A"),
            vec![
                YearCount { year: 2000, medals: 1 },
                YearCount { year: 2004, medals: 1 },
            ]
        );
        assert!(yearwise_medal_tally(&table, "Nowhere").is_empty());
    }

    #[test]
    fn test_tally_frame() {
        let table: CanonicalTable = vec![medal("P1", "A", "T1", 2000, Medal::Gold)]
            .into_iter()
            .collect();
        let frame = medal_tally(&table).to_frame();
        assert_eq!(
            frame.column_names().collect::<Vec<_>>(),
            vec!["region", "Gold", "Silver", "Bronze", "total"]
        );
        assert_eq!(frame.rows()[0], vec!["A", "1", "0", "0", "1"]);
    }
}
