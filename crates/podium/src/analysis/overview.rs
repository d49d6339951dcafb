//! Headline counts and distinct-value lists.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::schema::{AthleteRecord, CanonicalTable};

use super::frame::{Frame, ToFrame};
use super::selection::Selection;

/// Top-level statistics of the loaded games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Distinct years.
    pub editions: usize,
    /// Distinct host cities.
    pub hosts: usize,
    pub sports: usize,
    pub events: usize,
    /// Distinct regions.
    pub nations: usize,
    /// Distinct athlete names.
    pub athletes: usize,
}

fn distinct<'a, K: Ord>(table: &'a CanonicalTable, key: impl Fn(&'a AthleteRecord) -> K) -> BTreeSet<K> {
    table.iter().map(key).collect()
}

pub fn overview(table: &CanonicalTable) -> Overview {
    Overview {
        editions: distinct(table, |r| r.year).len(),
        hosts: distinct(table, |r| r.city.as_str()).len(),
        sports: distinct(table, |r| r.sport.as_str()).len(),
        events: distinct(table, |r| r.event.as_str()).len(),
        nations: distinct(table, |r| r.region.as_str()).len(),
        athletes: distinct(table, |r| r.name.as_str()).len(),
    }
}

/// Sorted distinct sports.
pub fn sports(table: &CanonicalTable) -> Vec<String> {
    distinct(table, |r| r.sport.as_str())
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `Overall`, then the sorted distinct sports.
pub fn sport_list(table: &CanonicalTable) -> Vec<Selection<String>> {
    std::iter::once(Selection::Overall)
        .chain(sports(table).into_iter().map(Selection::Only))
        .collect()
}

/// Sorted distinct regions.
pub fn countries(table: &CanonicalTable) -> Vec<String> {
    distinct(table, |r| r.region.as_str())
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl ToFrame for Overview {
    fn to_frame(&self) -> Frame {
        let stats = [
            ("Editions", self.editions),
            ("Hosts", self.hosts),
            ("Sports", self.sports),
            ("Events", self.events),
            ("Nations", self.nations),
            ("Athletes", self.athletes),
        ];
        Frame::new()
            .text("Statistic", stats.iter().map(|(name, _)| *name))
            .integer("Value", stats.iter().map(|(_, value)| *value as i64))
    }
}
