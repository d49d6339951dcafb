//! Main Podium struct and public API.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::canonical::{CanonicalizeConfig, CanonicalizeReport, Canonicalizer};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
use crate::error::{PodiumError, Result};
use crate::input::{Loader, LoaderConfig, SourceMetadata};
use crate::schema::CanonicalTable;

/// Configuration for a Podium session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PodiumConfig {
    /// Source locations and decoding.
    pub loader: LoaderConfig,
    /// Canonicalization defaults.
    pub canonicalize: CanonicalizeConfig,
    /// Sampling for distribution views.
    pub analysis: AnalysisConfig,
}

impl PodiumConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use podium::PodiumConfig;
    /// let config = PodiumConfig::from_json_file("podium.json").unwrap();
    /// println!("Events: {}", config.loader.events_path.display());
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| PodiumError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            PodiumError::Config(format!(
                "Failed to parse configuration '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// Counts of diagnostics by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

/// A loaded, canonicalized dataset ready for the aggregation views.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The canonical table, shared read-only by every view.
    pub table: Arc<CanonicalTable>,
    /// Metadata of the sources that were read.
    pub sources: Vec<SourceMetadata>,
    /// Per-step canonicalization counts.
    pub report: CanonicalizeReport,
    /// Loader and canonicalizer diagnostics, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Dataset {
    /// True when there is no data to show.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &CanonicalTable {
        &self.table
    }

    pub fn has_diagnostic(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    pub fn diagnostic_counts(&self) -> DiagnosticCounts {
        let mut counts = DiagnosticCounts::default();
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }
}

/// The main Podium engine: a configured loader and canonicalizer.
pub struct Podium {
    config: PodiumConfig,
    loader: Loader,
    canonicalizer: Canonicalizer,
}

impl Podium {
    /// Create a Podium instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(PodiumConfig::default())
    }

    /// Create a Podium instance with custom configuration.
    pub fn with_config(config: PodiumConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        let canonicalizer = Canonicalizer::with_config(config.canonicalize.clone());

        Self {
            config,
            loader,
            canonicalizer,
        }
    }

    pub fn config(&self) -> &PodiumConfig {
        &self.config
    }

    /// Sampling settings for the distribution views.
    pub fn analysis(&self) -> &AnalysisConfig {
        &self.config.analysis
    }

    /// Load and canonicalize the configured sources.
    ///
    /// Never fails; check [`Dataset::is_empty`] and the diagnostics.
    pub fn prepare(&self) -> Dataset {
        let mut raw = self.loader.load();
        let sources = std::mem::take(&mut raw.sources);
        let mut diagnostics = DiagnosticLog::new();
        diagnostics.extend(std::mem::take(&mut raw.diagnostics));

        let outcome = self.canonicalizer.canonicalize(raw);
        diagnostics.extend(outcome.diagnostics);

        tracing::info!(
            rows = outcome.table.len(),
            sources = sources.len(),
            diagnostics = diagnostics.len(),
            "Dataset prepared"
        );

        Dataset {
            table: Arc::new(outcome.table),
            sources,
            report: outcome.report,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

impl Default for Podium {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"loader": {{"events_path": "events.tsv"}}, "analysis": {{"sample_cap": 500}}}}"#
        )
        .unwrap();

        let config = PodiumConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.loader.events_path, Path::new("events.tsv"));
        assert_eq!(config.loader.encodings, LoaderConfig::default().encodings);
        assert_eq!(config.analysis.sample_cap, Some(500));
        assert_eq!(config.canonicalize.placeholder_year, 0);
    }

    #[test]
    fn test_config_errors() {
        let missing = PodiumConfig::from_json_file("/nonexistent/podium.json");
        assert!(matches!(missing, Err(PodiumError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let invalid = PodiumConfig::from_json_file(file.path());
        assert!(matches!(invalid, Err(PodiumError::Config(_))));
    }

    #[test]
    fn test_prepare_keeps_loader_output() {
        let mut events = NamedTempFile::new().unwrap();
        writeln!(events, "Name,NOC,Year,Sport,Event,Medal,City,Team,Games").unwrap();
        writeln!(events, "Ann,NOR,2000,Rowing,Eights,Gold,Sydney,Norway,2000 Summer").unwrap();

        let config = PodiumConfig {
            loader: LoaderConfig::new(events.path(), None),
            ..PodiumConfig::default()
        };
        let dataset = Podium::with_config(config).prepare();

        assert_eq!(dataset.table.len(), 1);
        assert_eq!(dataset.sources.len(), 1);
        assert_eq!(dataset.sources[0].row_count, 1);
        // From the loader (no region file) and the canonicalizer (no Season column)
        assert!(dataset.has_diagnostic(DiagnosticKind::SourceUnavailable));
        assert!(dataset.has_diagnostic(DiagnosticKind::SchemaDrift));
        let loader_first = dataset
            .diagnostics
            .iter()
            .position(|d| d.kind == DiagnosticKind::SourceUnavailable)
            < dataset
                .diagnostics
                .iter()
                .position(|d| d.kind == DiagnosticKind::SchemaDrift);
        assert!(loader_first);
    }

    #[test]
    fn test_prepare_missing_source_is_empty() {
        let config = PodiumConfig {
            loader: LoaderConfig::new("/nonexistent/athlete_events.csv", None),
            ..PodiumConfig::default()
        };
        let dataset = Podium::with_config(config).prepare();

        assert!(dataset.is_empty());
        assert!(dataset.has_diagnostic(DiagnosticKind::SourceUnavailable));
        assert!(dataset.has_diagnostic(DiagnosticKind::EmptyResult));
        assert!(dataset.diagnostic_counts().error >= 1);
    }
}
