//! Canonicalization outcome and per-step counts.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::schema::CanonicalTable;

/// How region names were resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionFallback {
    /// Joined against the lookup; unmatched codes become "Unknown".
    #[default]
    Lookup,
    /// No lookup available; the NOC code stands in for the region.
    NocCode,
    /// Neither a lookup join nor NOC codes were possible.
    Unknown,
}

/// Row counts for each canonicalization step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalizeReport {
    /// Rows in the raw event table.
    pub input_rows: usize,
    /// Rows dropped by the season filter.
    pub season_filtered: usize,
    /// Region resolution strategy that was applied.
    pub region_fallback: RegionFallback,
    /// Rows whose NOC had no lookup entry.
    pub unmatched_regions: usize,
    /// Medal values that were not Gold, Silver or Bronze.
    pub unrecognized_medals: usize,
    /// Rows whose year was taken from the games label.
    pub years_from_games: usize,
    /// Rows that received the placeholder year.
    pub placeholder_years: usize,
    /// Age, height or weight values outside their plausible range.
    pub implausible_measures: usize,
    /// Required columns that were absent and backfilled.
    pub backfilled_columns: Vec<String>,
    /// Exact duplicate rows removed.
    pub duplicates_removed: usize,
    /// Rows in the canonical table.
    pub output_rows: usize,
}

/// Everything the canonicalizer produced.
#[derive(Debug, Clone, Default)]
pub struct CanonicalizeOutcome {
    pub table: CanonicalTable,
    pub report: CanonicalizeReport,
    pub diagnostics: Vec<Diagnostic>,
}
