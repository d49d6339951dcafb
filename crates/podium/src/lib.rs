//! Podium: analytics over historical Olympic Games results.
//!
//! Podium loads the athlete event records and the NOC to region lookup,
//! normalizes them into one canonical table of Summer Games entries, and
//! computes the derived views a dashboard renders: medal tallies, time
//! series, sport by year matrices, athlete rankings and age or physique
//! distributions.
//!
//! # Core Principles
//!
//! - **Total loading**: missing files, odd encodings and malformed rows end
//!   up as diagnostics, never as errors or panics
//! - **One schema pass**: the canonicalizer guarantees every column the
//!   views read, so the views never check for them
//! - **Pure views**: every aggregation borrows the shared table and
//!   returns a new value
//!
//! # Example
//!
//! ```no_run
//! use podium::analysis::{self, Selection, ToFrame};
//! use podium::{LoaderConfig, Podium, PodiumConfig};
//!
//! let config = PodiumConfig {
//!     loader: LoaderConfig::new("athlete_events.csv", Some("noc_regions.csv".into())),
//!     ..PodiumConfig::default()
//! };
//! let dataset = Podium::with_config(config).prepare();
//! if dataset.is_empty() {
//!     println!("No data available");
//!     return;
//! }
//!
//! let tally = analysis::fetch_medal_tally(dataset.table(), &Selection::Only(2016), &Selection::Overall);
//! println!("Regions: {}", tally.to_frame().len());
//! ```

pub mod analysis;
pub mod canonical;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod schema;

mod podium;

pub use crate::podium::{Dataset, DiagnosticCounts, Podium, PodiumConfig};
pub use canonical::{CanonicalizeConfig, CanonicalizeOutcome, CanonicalizeReport, Canonicalizer};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
pub use error::{PodiumError, Result};
pub use input::{DataTable, Loader, LoaderConfig, RawDataset, RegionLookup, SourceMetadata};
pub use schema::{AthleteRecord, CanonicalTable, Medal, Sex};
