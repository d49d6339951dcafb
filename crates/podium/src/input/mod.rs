//! Source loading: files to raw tables.

mod loader;
mod regions;
mod source;

pub use loader::{Loader, LoaderConfig, RawDataset};
pub use regions::RegionLookup;
pub use source::{DataTable, SourceMetadata};
