//! First-occurrence de-duplication over canonical rows.

use std::collections::HashSet;
use std::hash::Hash;

use crate::schema::{AthleteRecord, CanonicalTable};

/// Keep the first row for every distinct key, preserving order.
pub(crate) fn unique_by<'a, K, I, F>(rows: I, mut key: F) -> Vec<&'a AthleteRecord>
where
    I: IntoIterator<Item = &'a AthleteRecord>,
    K: Hash + Eq,
    F: FnMut(&'a AthleteRecord) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|r| seen.insert(key(*r))).collect()
}

/// Rows collapsed on the team key, so one team medal counts once.
pub(crate) fn team_rows(table: &CanonicalTable) -> Vec<&AthleteRecord> {
    unique_by(table, AthleteRecord::team_key)
}
