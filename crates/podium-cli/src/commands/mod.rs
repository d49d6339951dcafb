//! CLI command implementations.

pub mod athletes;
pub mod diagnostics;
pub mod medals;
pub mod overview;
pub mod trends;

use colored::Colorize;
use podium::{Dataset, Podium, PodiumConfig, Severity};

use crate::cli::{Cli, OutputFormat};

/// A prepared dataset plus the output settings of this invocation.
pub struct Session {
    pub podium: Podium,
    pub dataset: Dataset,
    pub format: OutputFormat,
}

impl Session {
    /// Read the configuration, apply path overrides and load the data once.
    pub fn open(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &cli.config {
            Some(path) => PodiumConfig::from_json_file(path)?,
            None => PodiumConfig::default(),
        };
        if let Some(events) = &cli.events {
            config.loader.events_path = events.clone();
        }
        if let Some(regions) = &cli.regions {
            config.loader.regions_path = Some(regions.clone());
        }

        tracing::info!(
            events = %config.loader.events_path.display(),
            regions = ?config.loader.regions_path,
            "Opening dataset"
        );

        let podium = Podium::with_config(config);
        let dataset = podium.prepare();

        Ok(Self {
            podium,
            dataset,
            format: cli.format,
        })
    }

    /// Warn when `value` is not one of `known`; the view still runs and
    /// comes back empty.
    pub fn warn_if_unknown<T>(&self, what: &str, value: &T, known: &[T])
    where
        T: PartialEq + std::fmt::Display,
    {
        if known.contains(value) {
            return;
        }
        let listed: Vec<String> = known.iter().map(ToString::to_string).collect();
        eprintln!(
            "{} no {} named '{}'. Available: {}",
            "Warning:".yellow().bold(),
            what,
            value,
            listed.join(", ")
        );
    }

    /// True, after telling the user why, when there is nothing to show.
    pub fn report_if_empty(&self) -> bool {
        if !self.dataset.is_empty() {
            return false;
        }

        eprintln!("{}", "No data available".yellow().bold());
        for diagnostic in self
            .dataset
            .diagnostics
            .iter()
            .filter(|d| d.severity >= Severity::Warning)
        {
            eprintln!("  {} {}", format!("[{}]", diagnostic.source).dimmed(), diagnostic.message);
        }
        eprintln!(
            "Run {} for details",
            "podium diagnostics".cyan().bold()
        );
        true
    }
}
