//! Sport by year count matrices.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::schema::CanonicalTable;

use super::dedup::{team_rows, unique_by};
use super::frame::{Frame, ToFrame};

/// Counts with sports as rows and years as columns.
///
/// Rows and columns are both ascending; absent combinations are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<i32>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<u32>>,
}

impl PivotTable {
    /// Count every (row, year) pair.
    fn count<'a>(pairs: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut counts: BTreeMap<&str, BTreeMap<i32, u32>> = BTreeMap::new();
        let mut years = BTreeSet::new();
        for (label, year) in pairs {
            *counts.entry(label).or_default().entry(year).or_default() += 1;
            years.insert(year);
        }

        let column_labels: Vec<i32> = years.into_iter().collect();
        let mut row_labels = Vec::with_capacity(counts.len());
        let mut cells = Vec::with_capacity(counts.len());
        for (label, by_year) in counts {
            row_labels.push(label.to_string());
            cells.push(
                column_labels
                    .iter()
                    .map(|y| by_year.get(y).copied().unwrap_or(0))
                    .collect(),
            );
        }

        Self {
            row_labels,
            column_labels,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty()
    }

    /// Cell for a row label and year; zero when either is absent.
    pub fn get(&self, row: &str, year: i32) -> u32 {
        let r = self.row_labels.iter().position(|l| l == row);
        let c = self.column_labels.iter().position(|&y| y == year);
        match (r, c) {
            (Some(r), Some(c)) => self.cells[r][c],
            _ => 0,
        }
    }
}

/// Distinct events per sport in each year.
pub fn events_per_sport_over_time(table: &CanonicalTable) -> PivotTable {
    let rows = unique_by(table, |r| (r.year, r.sport.as_str(), r.event.as_str()));
    PivotTable::count(rows.into_iter().map(|r| (r.sport.as_str(), r.year)))
}

/// Medals a country won per sport and year, team medals counted once.
pub fn country_sport_heatmap(table: &CanonicalTable, country: &str) -> PivotTable {
    let pivot = PivotTable::count(
        team_rows(table)
            .into_iter()
            .filter(|r| r.has_medal() && r.region == country)
            .map(|r| (r.sport.as_str(), r.year)),
    );
    tracing::debug!(country, sports = pivot.row_labels.len(), "country sport heatmap");
    pivot
}

impl ToFrame for PivotTable {
    fn to_frame(&self) -> Frame {
        if self.is_empty() {
            return Frame::new();
        }
        let mut frame = Frame::new().text("Sport", self.row_labels.iter().map(|l| l.as_str()));
        for (c, year) in self.column_labels.iter().enumerate() {
            frame = frame.integer(year.to_string(), self.cells.iter().map(|row| row[c]));
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AthleteRecord, Medal};

    fn entry(sport: &str, event: &str, year: i32) -> AthleteRecord {
        AthleteRecord::new("X")
            .with_sport(sport)
            .with_event(event)
            .with_games(year, "Host")
            .with_region("A")
    }

    #[test]
    fn test_events_per_sport() {
        let table: CanonicalTable = vec![
            entry("Swimming", "100m", 2000),
            entry("Swimming", "100m", 2000),
            entry("Swimming", "200m", 2000),
            entry("Archery", "Individual", 2004),
        ]
        .into_iter()
        .collect();

        let pivot = events_per_sport_over_time(&table);
        assert_eq!(pivot.row_labels, vec!["Archery", "Swimming"]);
        assert_eq!(pivot.column_labels, vec![2000, 2004]);
        assert_eq!(pivot.cells, vec![vec![0, 1], vec![2, 0]]);
        assert_eq!(pivot.get("Swimming", 2000), 2);
        assert_eq!(pivot.get("Fencing", 2000), 0);

        let frame = pivot.to_frame();
        assert_eq!(
            frame.column_names().collect::<Vec<_>>(),
            vec!["Sport", "2000", "2004"]
        );
    }

    #[test]
    fn test_heatmap_for_country_without_medals() {
        let table: CanonicalTable = vec![entry("Swimming", "100m", 2000)].into_iter().collect();

        let pivot = country_sport_heatmap(&table, "A");
        assert!(pivot.is_empty());
        assert!(pivot.column_labels.is_empty());
        assert_eq!(pivot.to_frame().column_count(), 0);
    }

    #[test]
    fn test_heatmap_counts_medals() {
        let table: CanonicalTable = vec![
            entry("Swimming", "100m", 2000).with_medal(Medal::Gold),
            entry("Swimming", "200m", 2000).with_medal(Medal::Bronze),
            entry("Rowing", "Eights", 2004).with_medal(Medal::Silver),
            entry("Rowing", "Eights", 2004)
                .with_medal(Medal::Silver)
                .with_region("B"),
        ]
        .into_iter()
        .collect();

        let pivot = country_sport_heatmap(&table, "A");
        assert_eq!(pivot.get("Swimming", 2000), 2);
        assert_eq!(pivot.get("Rowing", 2004), 1);
    }
}
