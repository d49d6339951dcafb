//! Aggregation view performance benchmarks.
//!
//! Measures each view over synthetic canonical tables of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use podium::analysis::{self, Selection, ToFrame, TrendMetric};
use podium::{AthleteRecord, CanonicalTable, Medal, Sex};

const SPORTS: [&str; 5] = ["Athletics", "Swimming", "Rowing", "Judo", "Fencing"];
const REGIONS: [&str; 6] = ["USA", "UK", "France", "Kenya", "Japan", "Brazil"];

/// Generate a canonical table directly, skipping the loader.
fn generate_table(rows: usize) -> CanonicalTable {
    (0..rows)
        .map(|row| {
            let region = REGIONS[row % REGIONS.len()];
            let sport = SPORTS[row % SPORTS.len()];
            let mut record = AthleteRecord::new(format!("Athlete {}", row % 5_000))
                .with_sex(if row % 2 == 0 { Sex::Male } else { Sex::Female })
                .with_age((18 + row % 20) as f64)
                .with_height((160 + row % 40) as f64)
                .with_weight((50 + row % 50) as f64)
                .with_team(region)
                .with_noc(region)
                .with_region(region)
                .with_games(1896 + 4 * (row % 30) as i32, format!("City {}", row % 30))
                .with_sport(sport)
                .with_event(format!("{} Event {}", sport, row % 12));
            record.medal = match row % 4 {
                0 => Some(Medal::Gold),
                1 => Some(Medal::Silver),
                2 => Some(Medal::Bronze),
                _ => None,
            };
            record
        })
        .collect()
}

/// Benchmark the tally views.
fn bench_tallies(c: &mut Criterion) {
    let mut group = c.benchmark_group("tallies");

    for rows in [10_000, 100_000].iter() {
        let table = generate_table(*rows);

        group.bench_with_input(BenchmarkId::new("medal_tally", rows), &table, |b, table| {
            b.iter(|| black_box(analysis::medal_tally(table)))
        });
        group.bench_with_input(BenchmarkId::new("fetch_by_year", rows), &table, |b, table| {
            b.iter(|| {
                black_box(analysis::fetch_medal_tally(
                    table,
                    &Selection::Overall,
                    &Selection::only("Kenya"),
                ))
            })
        });
        group.bench_with_input(BenchmarkId::new("country_year_list", rows), &table, |b, table| {
            b.iter(|| black_box(analysis::country_year_list(table)))
        });
    }

    group.finish();
}

/// Benchmark time series and pivots.
fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");
    let table = generate_table(100_000);

    group.bench_function("data_over_time_athletes", |b| {
        b.iter(|| black_box(analysis::data_over_time(&table, TrendMetric::Name)))
    });
    group.bench_function("events_per_sport", |b| {
        b.iter(|| black_box(analysis::events_per_sport_over_time(&table)))
    });
    group.bench_function("country_sport_heatmap", |b| {
        b.iter(|| black_box(analysis::country_sport_heatmap(&table, "Japan")))
    });
    group.bench_function("gender_participation", |b| {
        b.iter(|| black_box(analysis::gender_participation(&table, None)))
    });
    group.bench_function("most_successful", |b| {
        b.iter(|| black_box(analysis::most_successful(&table, &Selection::Overall)))
    });

    group.finish();
}

/// Benchmark distribution views and density estimation.
fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("distributions");
    group.sample_size(20);
    let table = generate_table(100_000);

    group.bench_function("age_distribution", |b| {
        b.iter(|| black_box(analysis::age_distribution(&table)))
    });
    group.bench_function("gold_age_by_sport", |b| {
        b.iter(|| {
            black_box(analysis::gold_age_distribution_by_sport(
                &table,
                &analysis::DEFAULT_FEATURED_SPORTS,
            ))
        })
    });

    let ages = analysis::age_distribution(&table);
    group.bench_function("density_500_points", |b| {
        b.iter(|| black_box(ages.all.density(500)))
    });
    group.bench_function("to_frame", |b| b.iter(|| black_box(ages.to_frame())));

    group.finish();
}

criterion_group!(benches, bench_tallies, bench_series, bench_distributions);
criterion_main!(benches);
