//! Most successful athletes.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::{AthleteRecord, CanonicalTable};

use super::frame::{Frame, ToFrame};
use super::selection::Selection;

/// Maximum athletes returned by a ranking.
pub const TOP_ATHLETES: usize = 15;

/// One ranked athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteWins {
    pub name: String,
    /// Medal rows for this athlete.
    pub total_wins: usize,
    /// Sport of the athlete's first medal row.
    pub sport: String,
    /// Region of the athlete's first medal row.
    pub region: String,
}

/// Rank medal rows by athlete name.
///
/// Ties keep the order in which athletes first appear.
fn rank<'a>(rows: impl IntoIterator<Item = &'a AthleteRecord>) -> Vec<AthleteWins> {
    let mut athletes: IndexMap<&str, (usize, &AthleteRecord)> = IndexMap::new();
    for record in rows {
        athletes.entry(record.name.as_str()).or_insert((0, record)).0 += 1;
    }

    let mut ranked: Vec<AthleteWins> = athletes
        .into_values()
        .map(|(wins, first)| AthleteWins {
            name: first.name.clone(),
            total_wins: wins,
            sport: first.sport.clone(),
            region: first.region.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.total_wins.cmp(&a.total_wins));
    ranked.truncate(TOP_ATHLETES);
    ranked
}

/// Top athletes by medal count, optionally within one sport.
pub fn most_successful(table: &CanonicalTable, sport: &Selection<String>) -> Vec<AthleteWins> {
    rank(
        table
            .iter()
            .filter(|r| r.has_medal() && sport.admits(r.sport.as_str())),
    )
}

/// Top athletes by medal count, optionally within one country.
pub fn most_successful_by_country(
    table: &CanonicalTable,
    country: &Selection<String>,
) -> Vec<AthleteWins> {
    rank(
        table
            .iter()
            .filter(|r| r.has_medal() && country.admits(r.region.as_str())),
    )
}

impl ToFrame for [AthleteWins] {
    fn to_frame(&self) -> Frame {
        Frame::new()
            .text("Name", self.iter().map(|a| a.name.as_str()))
            .integer("Total Wins", self.iter().map(|a| a.total_wins as i64))
            .text("Sport", self.iter().map(|a| a.sport.as_str()))
            .text("region", self.iter().map(|a| a.region.as_str()))
    }
}
