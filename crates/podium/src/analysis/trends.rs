//! Per-edition time series.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PodiumError;
use crate::schema::{AthleteRecord, CanonicalTable, Sex, columns};

use super::dedup::unique_by;
use super::frame::{Frame, ToFrame};

/// The column counted by [`data_over_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Participating nations.
    Region,
    /// Events held.
    Event,
    /// Athletes competing.
    Name,
}

impl TrendMetric {
    /// Canonical column the metric counts.
    pub fn column(&self) -> &'static str {
        match self {
            TrendMetric::Region => columns::REGION,
            TrendMetric::Event => columns::EVENT,
            TrendMetric::Name => columns::NAME,
        }
    }

    fn value<'a>(&self, record: &'a AthleteRecord) -> &'a str {
        match self {
            TrendMetric::Region => &record.region,
            TrendMetric::Event => &record.event,
            TrendMetric::Name => &record.name,
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for TrendMetric {
    type Err = PodiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" | "nations" | "countries" => Ok(TrendMetric::Region),
            "event" | "events" => Ok(TrendMetric::Event),
            "name" | "athletes" => Ok(TrendMetric::Name),
            other => Err(PodiumError::Config(format!(
                "unknown trend metric '{}' (expected nations, events or athletes)",
                other
            ))),
        }
    }
}

/// Distinct count for one edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub edition: i32,
    pub count: usize,
}

/// A metric's distinct count per year, with its column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub metric: TrendMetric,
    pub points: Vec<TrendPoint>,
}

/// Distinct male and female athletes for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenderPoint {
    pub year: i32,
    pub male: usize,
    pub female: usize,
}

/// Number of distinct values of `metric` in each year, ascending.
pub fn data_over_time(table: &CanonicalTable, metric: TrendMetric) -> Trend {
    let mut years: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();
    for record in table {
        years
            .entry(record.year)
            .or_default()
            .insert(metric.value(record));
    }

    let points: Vec<TrendPoint> = years
        .into_iter()
        .map(|(edition, values)| TrendPoint {
            edition,
            count: values.len(),
        })
        .collect();
    tracing::debug!(%metric, editions = points.len(), "data over time");
    Trend { metric, points }
}

/// Distinct male and female athletes per year, optionally within one sport.
///
/// Each (name, year) pair counts once, under the sex of its first row.
/// Every year with any athlete of known sex gets a row; the missing side
/// is zero.
pub fn gender_participation(table: &CanonicalTable, sport: Option<&str>) -> Vec<GenderPoint> {
    let athletes = unique_by(
        table.iter().filter(|r| sport.is_none_or(|s| r.sport == s)),
        |r| (r.name.as_str(), r.year),
    );

    let mut years: BTreeMap<i32, GenderPoint> = BTreeMap::new();
    for record in athletes {
        let Some(sex) = record.sex else { continue };
        let point = years.entry(record.year).or_insert(GenderPoint {
            year: record.year,
            male: 0,
            female: 0,
        });
        match sex {
            Sex::Male => point.male += 1,
            Sex::Female => point.female += 1,
        }
    }
    years.into_values().collect()
}

impl ToFrame for Trend {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .integer("Edition", self.points.iter().map(|p| p.edition))
            .integer(
                self.metric.column(),
                self.points.iter().map(|p| p.count as i64),
            )
    }
}

impl ToFrame for [GenderPoint] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .integer("Year", self.iter().map(|p| p.year))
            .integer("Male", self.iter().map(|p| p.male as i64))
            .integer("Female", self.iter().map(|p| p.female as i64))
    }
}
