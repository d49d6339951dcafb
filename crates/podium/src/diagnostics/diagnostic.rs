//! Diagnostic records for problems absorbed while loading and normalizing data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of problem that was absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A source file is missing or unreadable in every candidate encoding.
    SourceUnavailable,
    /// A candidate encoding was rejected and the next one was tried.
    EncodingFallback,
    /// An expected column is absent and was backfilled or skipped.
    SchemaDrift,
    /// Individual rows failed to parse and were skipped.
    MalformedRow,
    /// A filter combination matched nothing.
    EmptyResult,
}

impl DiagnosticKind {
    /// Get a human-readable label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::SourceUnavailable => "Source Unavailable",
            DiagnosticKind::EncodingFallback => "Encoding Fallback",
            DiagnosticKind::SchemaDrift => "Schema Drift",
            DiagnosticKind::MalformedRow => "Malformed Row",
            DiagnosticKind::EmptyResult => "Empty Result",
        }
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Data was altered or dropped to keep going.
    Warning,
    /// A source could not be used at all.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single absorbed problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Kind of problem.
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: Severity,
    /// Where it happened: a file name or a canonicalization step.
    pub source: String,
    /// Human-readable description.
    pub message: String,
    /// Number of affected rows or values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
    /// Sample (1-based) row numbers.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_rows: Vec<usize>,
    /// When recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        kind: DiagnosticKind,
        severity: Severity,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            source: source.into(),
            message: message.into(),
            occurrences: None,
            sample_rows: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Set occurrences.
    pub fn with_occurrences(mut self, count: usize) -> Self {
        self.occurrences = Some(count);
        self
    }

    /// Set sample rows.
    pub fn with_sample_rows(mut self, rows: Vec<usize>) -> Self {
        self.sample_rows = rows;
        self
    }
}
