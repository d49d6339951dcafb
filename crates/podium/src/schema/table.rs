//! The canonical analysis table.

use crate::input::DataTable;

use super::columns::CANONICAL_COLUMNS;
use super::record::AthleteRecord;

/// Normalized, de-duplicated, schema-complete event records.
///
/// Built once per load and never mutated afterwards; every view reads it
/// through a shared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    rows: Vec<AthleteRecord>,
}

impl CanonicalTable {
    /// Wrap already-canonical rows as they are.
    pub fn new(rows: Vec<AthleteRecord>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[AthleteRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AthleteRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a string table with the canonical columns, in order.
    ///
    /// Feeding the result back through the canonicalizer reproduces this
    /// table.
    pub fn to_data_table(&self) -> DataTable {
        DataTable::new(
            CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            self.rows.iter().map(AthleteRecord::to_cells).collect(),
        )
    }
}

impl FromIterator<AthleteRecord> for CanonicalTable {
    fn from_iter<I: IntoIterator<Item = AthleteRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a AthleteRecord;
    type IntoIter = std::slice::Iter<'a, AthleteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
