//! Loader and canonicalizer performance benchmarks.
//!
//! Measures streaming ingestion and canonicalization across file sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use podium::{Canonicalizer, Loader, LoaderConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const SPORTS: [&str; 5] = ["Athletics", "Swimming", "Rowing", "Judo", "Fencing"];
const NOCS: [&str; 6] = ["USA", "GBR", "FRA", "KEN", "JPN", "BRA"];
const MEDALS: [&str; 4] = ["Gold", "Silver", "Bronze", "NA"];

/// Generate athlete event records in the source layout.
fn generate_events(rows: usize) -> String {
    let mut data = String::new();
    data.push_str("ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal\n");

    for row in 0..rows {
        let year = 1896 + 4 * (row % 30) as i32;
        let season = if row % 7 == 0 { "Winter" } else { "Summer" };
        let sport = SPORTS[row % SPORTS.len()];
        let noc = NOCS[row % NOCS.len()];
        data.push_str(&format!(
            "{},Athlete {},{},{},{},{},{} Team,{},{} {},{},{},City {},{},{} Event {},{}\n",
            row,
            row % 5_000,
            if row % 2 == 0 { "M" } else { "F" },
            if row % 11 == 0 { "NA".to_string() } else { (18 + row % 20).to_string() },
            160 + row % 40,
            50 + row % 50,
            noc,
            noc,
            year,
            season,
            year,
            season,
            row % 30,
            sport,
            sport,
            row % 12,
            MEDALS[row % MEDALS.len()],
        ));
    }

    data
}

fn generate_regions() -> String {
    let mut data = String::from("NOC,region,notes\n");
    for noc in NOCS {
        data.push_str(&format!("{},{} Region,\n", noc, noc));
    }
    data
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
    temp.write_all(content.as_bytes()).unwrap();
    temp
}

/// Benchmark loading event files of various sizes.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let regions = temp_file(&generate_regions());

    for rows in [1_000, 10_000, 100_000].iter() {
        let data = generate_events(*rows);
        let events = temp_file(&data);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &events, |b, events| {
            let loader = Loader::with_config(LoaderConfig::new(
                events.path(),
                Some(regions.path().to_path_buf()),
            ));
            b.iter(|| black_box(loader.load()))
        });
    }

    group.finish();
}

/// Benchmark a latin1 file, which is read twice.
fn bench_load_encoding_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_encoding_fallback");
    group.sample_size(20);

    let mut data = generate_events(10_000).into_bytes();
    data.extend_from_slice(b"99999,Andr\xe9,M,20,180,80,France,FRA,2000 Summer,2000,Summer,Sydney,Fencing,Foil,Gold\n");
    let mut events = NamedTempFile::with_suffix(".csv").unwrap();
    events.write_all(&data).unwrap();

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("latin1_10k_rows", |b| {
        let loader = Loader::with_config(LoaderConfig::new(events.path(), None));
        b.iter(|| black_box(loader.load()))
    });

    group.finish();
}

/// Benchmark canonicalization of already-loaded raw data.
fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    let regions = temp_file(&generate_regions());

    for rows in [1_000, 10_000, 100_000].iter() {
        let events = temp_file(&generate_events(*rows));
        let raw = Loader::with_config(LoaderConfig::new(
            events.path(),
            Some(regions.path().to_path_buf()),
        ))
        .load();

        group.bench_with_input(BenchmarkId::new("rows", rows), &raw, |b, raw| {
            let canonicalizer = Canonicalizer::new();
            b.iter_with_setup(|| raw.clone(), |raw| black_box(canonicalizer.canonicalize(raw)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_load_encoding_fallback,
    bench_canonicalize,
);
criterion_main!(benches);
