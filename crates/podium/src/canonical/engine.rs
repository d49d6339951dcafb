//! Canonicalizer: raw event table to the canonical analysis table.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
use crate::input::{DataTable, RawDataset, RegionLookup};
use crate::schema::columns::{self, SUMMER, UNKNOWN};
use crate::schema::{AthleteRecord, CanonicalTable, Medal, Sex};

use super::report::{CanonicalizeOutcome, CanonicalizeReport, RegionFallback};

/// Leading four-digit year of a games label such as "1996 Summer".
static GAMES_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{4})\b").unwrap());

/// Accepted ranges for the physical measures; anything else is dropped.
const AGE_YEARS: RangeInclusive<f64> = 0.0..=150.0;
const HEIGHT_CM: RangeInclusive<f64> = 0.0..=300.0;
const WEIGHT_KG: RangeInclusive<f64> = 0.0..=500.0;

/// Canonicalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Year assigned when neither the Year column nor the games label has one.
    pub placeholder_year: i32,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self { placeholder_year: 0 }
    }
}

/// Positions of the source columns in the raw table.
struct ColumnIndex {
    id: Option<usize>,
    name: Option<usize>,
    sex: Option<usize>,
    age: Option<usize>,
    height: Option<usize>,
    weight: Option<usize>,
    team: Option<usize>,
    noc: Option<usize>,
    games: Option<usize>,
    year: Option<usize>,
    season: Option<usize>,
    city: Option<usize>,
    sport: Option<usize>,
    event: Option<usize>,
    medal: Option<usize>,
    region: Option<usize>,
}

impl ColumnIndex {
    fn resolve(table: &DataTable) -> Self {
        Self {
            id: table.column_index(columns::ID),
            name: table.column_index(columns::NAME),
            sex: table.column_index(columns::SEX),
            age: table.column_index(columns::AGE),
            height: table.column_index(columns::HEIGHT),
            weight: table.column_index(columns::WEIGHT),
            team: table.column_index(columns::TEAM),
            noc: table.column_index(columns::NOC),
            games: table.column_index(columns::GAMES),
            year: table.column_index(columns::YEAR),
            season: table.column_index(columns::SEASON),
            city: table.column_index(columns::CITY),
            sport: table.column_index(columns::SPORT),
            event: table.column_index(columns::EVENT),
            medal: table.column_index(columns::MEDAL),
            region: table.column_index(columns::REGION),
        }
    }
}

/// A non-null, trimmed cell value.
fn cell(row: &[String], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !DataTable::is_null_value(s))
}

fn parse_year(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0)
            .map(|y| y as i32)
    })
}

/// A measure within `range`. Numbers outside it (or not finite) are counted.
fn parse_measure(
    value: &str,
    range: &RangeInclusive<f64>,
    implausible: &mut usize,
) -> Option<f64> {
    let number = value.parse::<f64>().ok()?;
    if range.contains(&number) {
        Some(number)
    } else {
        *implausible += 1;
        None
    }
}

fn year_from_games(games: &str) -> Option<i32> {
    GAMES_YEAR
        .captures(games)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Turns a [`RawDataset`] into the canonical table.
pub struct Canonicalizer {
    config: CanonicalizeConfig,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::with_config(CanonicalizeConfig::default())
    }

    pub fn with_config(config: CanonicalizeConfig) -> Self {
        Self { config }
    }

    /// Season filter, region join, medal indicators, column backfill and
    /// whole-row de-duplication, in that order.
    ///
    /// A step whose source column is missing is skipped or backfilled with
    /// a warning; nothing here is fatal.
    ///
    /// Consumes the raw dataset so each raw row is freed once converted.
    pub fn canonicalize(&self, raw: RawDataset) -> CanonicalizeOutcome {
        let mut log = DiagnosticLog::new();
        let RawDataset {
            events, regions, ..
        } = raw;
        let mut report = CanonicalizeReport {
            input_rows: events.row_count(),
            ..CanonicalizeReport::default()
        };

        if events.is_empty() {
            log.push(Diagnostic::new(
                DiagnosticKind::EmptyResult,
                Severity::Warning,
                "canonicalize",
                "No event rows to canonicalize; the canonical table is empty",
            ));
            return CanonicalizeOutcome {
                table: CanonicalTable::empty(),
                report,
                diagnostics: log.into_vec(),
            };
        }

        let cols = ColumnIndex::resolve(&events);
        let lookup = regions.as_ref();

        if cols.season.is_none() {
            log.push(drift(
                "season_filter",
                "'Season' column not found; assuming every row is from the Summer Games",
            ));
        }

        report.region_fallback = self.region_strategy(&cols, lookup, &mut log);
        self.note_backfills(&cols, &mut report, &mut log);

        let mut records = Vec::with_capacity(events.row_count());
        for row in events.rows {
            if let Some(i) = cols.season {
                if row.get(i).map(|s| s.trim()) != Some(SUMMER) {
                    report.season_filtered += 1;
                    continue;
                }
            }
            records.push(self.build_record(&row, &cols, lookup, &mut report));
        }

        // Whole-row de-duplication, keeping first occurrences
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(records.len());
            records.iter().map(|r| seen.insert(r.identity())).collect()
        };
        let before = records.len();
        let records: Vec<AthleteRecord> = records
            .into_iter()
            .zip(keep)
            .filter_map(|(record, keep)| keep.then_some(record))
            .collect();
        report.duplicates_removed = before - records.len();
        report.output_rows = records.len();

        if report.unrecognized_medals > 0 {
            log.push(
                Diagnostic::new(
                    DiagnosticKind::MalformedRow,
                    Severity::Warning,
                    "medal_indicators",
                    format!(
                        "{} medal value(s) were not Gold, Silver or Bronze and count as no medal",
                        report.unrecognized_medals
                    ),
                )
                .with_occurrences(report.unrecognized_medals),
            );
        }
        if cols.year.is_some() && report.placeholder_years > 0 {
            log.push(
                Diagnostic::new(
                    DiagnosticKind::MalformedRow,
                    Severity::Warning,
                    "backfill",
                    format!(
                        "{} row(s) had no usable year and were assigned {}",
                        report.placeholder_years, self.config.placeholder_year
                    ),
                )
                .with_occurrences(report.placeholder_years),
            );
        }
        if report.implausible_measures > 0 {
            log.push(
                Diagnostic::new(
                    DiagnosticKind::MalformedRow,
                    Severity::Warning,
                    "measure_bounds",
                    format!(
                        "{} age, height or weight value(s) were out of range and treated as missing",
                        report.implausible_measures
                    ),
                )
                .with_occurrences(report.implausible_measures),
            );
        }
        if report.unmatched_regions > 0 {
            tracing::debug!(
                rows = report.unmatched_regions,
                "NOC codes without a region entry resolved to Unknown"
            );
        }

        tracing::info!(
            input = report.input_rows,
            season_filtered = report.season_filtered,
            duplicates = report.duplicates_removed,
            output = report.output_rows,
            "Canonicalized event records"
        );

        CanonicalizeOutcome {
            table: CanonicalTable::new(records),
            report,
            diagnostics: log.into_vec(),
        }
    }

    /// Pick one region strategy for the whole table.
    fn region_strategy(
        &self,
        cols: &ColumnIndex,
        lookup: Option<&RegionLookup>,
        log: &mut DiagnosticLog,
    ) -> RegionFallback {
        match (cols.noc, lookup) {
            (Some(_), Some(_)) => RegionFallback::Lookup,
            (Some(_), None) => {
                if cols.region.is_none() {
                    log.push(drift(
                        "region_join",
                        "No region lookup available; using NOC codes as region names",
                    ));
                }
                RegionFallback::NocCode
            }
            (None, _) => {
                if cols.region.is_none() {
                    log.push(drift(
                        "region_join",
                        "'NOC' column not found; region set to Unknown",
                    ));
                }
                RegionFallback::Unknown
            }
        }
    }

    /// Record and report the required columns that will be backfilled.
    fn note_backfills(
        &self,
        cols: &ColumnIndex,
        report: &mut CanonicalizeReport,
        log: &mut DiagnosticLog,
    ) {
        let event_default = if cols.sport.is_some() {
            "'<Sport> - Event'".to_string()
        } else {
            format!("'{}'", UNKNOWN)
        };
        let year_default = if cols.games.is_some() {
            format!(
                "the year of the games label, else {}",
                self.config.placeholder_year
            )
        } else {
            self.config.placeholder_year.to_string()
        };

        let missing: [(&str, Option<usize>, String); 9] = [
            (columns::YEAR, cols.year, year_default),
            (columns::MEDAL, cols.medal, "no medal".to_string()),
            (columns::SPORT, cols.sport, format!("'{}'", UNKNOWN)),
            (columns::NAME, cols.name, format!("'{}'", UNKNOWN)),
            (columns::CITY, cols.city, format!("'{}'", UNKNOWN)),
            (columns::EVENT, cols.event, event_default),
            (columns::NOC, cols.noc, format!("'{}'", UNKNOWN)),
            (columns::TEAM, cols.team, format!("'{}'", UNKNOWN)),
            (columns::GAMES, cols.games, format!("'{}'", UNKNOWN)),
        ];

        for (name, index, default) in missing {
            if index.is_none() {
                log.push(drift(
                    "backfill",
                    format!("'{}' column not found; filled with {}", name, default),
                ));
                report.backfilled_columns.push(name.to_string());
            }
        }
        if cols.region.is_none() && report.region_fallback == RegionFallback::Unknown {
            report.backfilled_columns.push(columns::REGION.to_string());
        }
    }

    fn build_record(
        &self,
        row: &[String],
        cols: &ColumnIndex,
        lookup: Option<&RegionLookup>,
        report: &mut CanonicalizeReport,
    ) -> AthleteRecord {
        let noc = cell(row, cols.noc);
        let sport = cell(row, cols.sport).unwrap_or(UNKNOWN);
        let games = cell(row, cols.games);

        let region = match cell(row, cols.region) {
            Some(existing) => existing.to_string(),
            None => match report.region_fallback {
                RegionFallback::Lookup => match noc.and_then(|n| lookup.and_then(|l| l.get(n))) {
                    Some(region) => region.to_string(),
                    None => {
                        report.unmatched_regions += 1;
                        UNKNOWN.to_string()
                    }
                },
                RegionFallback::NocCode => noc.unwrap_or(UNKNOWN).to_string(),
                RegionFallback::Unknown => UNKNOWN.to_string(),
            },
        };

        let medal = cell(row, cols.medal).and_then(|m| {
            let parsed = Medal::parse(m);
            if parsed.is_none() {
                report.unrecognized_medals += 1;
            }
            parsed
        });

        let year = match cell(row, cols.year).and_then(parse_year) {
            Some(year) => year,
            None => match games.and_then(year_from_games) {
                Some(year) => {
                    report.years_from_games += 1;
                    year
                }
                None => {
                    report.placeholder_years += 1;
                    self.config.placeholder_year
                }
            },
        };

        let event = match cell(row, cols.event) {
            Some(event) => event.to_string(),
            None if cols.sport.is_some() => format!("{} - Event", sport),
            None => UNKNOWN.to_string(),
        };

        let mut measure = |index: Option<usize>, range: &RangeInclusive<f64>| {
            cell(row, index).and_then(|v| parse_measure(v, range, &mut report.implausible_measures))
        };
        let age = measure(cols.age, &AGE_YEARS);
        let height = measure(cols.height, &HEIGHT_CM);
        let weight = measure(cols.weight, &WEIGHT_KG);

        AthleteRecord {
            id: cell(row, cols.id).map(str::to_string),
            name: cell(row, cols.name).unwrap_or(UNKNOWN).to_string(),
            sex: cell(row, cols.sex).and_then(Sex::parse),
            age,
            height,
            weight,
            team: cell(row, cols.team).unwrap_or(UNKNOWN).to_string(),
            noc: noc.unwrap_or(UNKNOWN).to_string(),
            games: games.unwrap_or(UNKNOWN).to_string(),
            year,
            city: cell(row, cols.city).unwrap_or(UNKNOWN).to_string(),
            sport: sport.to_string(),
            event,
            medal,
            region,
        }
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn drift(step: &str, message: impl Into<String>) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::SchemaDrift, Severity::Warning, step, message)
}
