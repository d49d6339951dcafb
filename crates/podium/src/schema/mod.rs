//! Canonical schema: column names, typed rows and the canonical table.

pub mod columns;
mod record;
mod table;

pub use record::{AthleteRecord, Medal, Sex};
pub use table::CanonicalTable;

pub(crate) use record::{TeamKey, bits};
