//! Canonicalization of the raw event table.

mod engine;
mod report;

pub use engine::{CanonicalizeConfig, Canonicalizer};
pub use report::{CanonicalizeOutcome, CanonicalizeReport, RegionFallback};
