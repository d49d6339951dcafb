//! Typed canonical rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::columns::UNKNOWN;

/// Medal outcome of an event entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn label(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }

    /// Parse a medal value, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Medal> {
        let value = value.trim();
        Medal::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recorded sex of an athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Single-letter code used by the source data.
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn parse(value: &str) -> Option<Sex> {
        match value.trim() {
            "M" | "m" => Some(Sex::Male),
            "F" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Key used to count a team medal once per country, games and event.
pub(crate) type TeamKey<'a> = (
    &'a str,
    &'a str,
    &'a str,
    i32,
    &'a str,
    &'a str,
    &'a str,
    Option<Medal>,
);

/// One athlete-event entry of the canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRecord {
    /// Athlete identifier, when the source carries one.
    pub id: Option<String>,
    pub name: String,
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    /// Height in centimetres.
    pub height: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,
    pub team: String,
    pub noc: String,
    /// Games label, e.g. "2000 Summer".
    pub games: String,
    pub year: i32,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
    pub region: String,
}

impl AthleteRecord {
    /// A record with every field other than the name set to its fill value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            sex: None,
            age: None,
            height: None,
            weight: None,
            team: UNKNOWN.to_string(),
            noc: UNKNOWN.to_string(),
            games: UNKNOWN.to_string(),
            year: 0,
            city: UNKNOWN.to_string(),
            sport: UNKNOWN.to_string(),
            event: UNKNOWN.to_string(),
            medal: None,
            region: UNKNOWN.to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn with_noc(mut self, noc: impl Into<String>) -> Self {
        self.noc = noc.into();
        self
    }

    /// Set the games label and year together.
    pub fn with_games(mut self, year: i32, city: impl Into<String>) -> Self {
        self.year = year;
        self.games = format!("{} Summer", year);
        self.city = city.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    pub fn with_medal(mut self, medal: Medal) -> Self {
        self.medal = Some(medal);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Gold indicator (0 or 1).
    pub fn gold(&self) -> u32 {
        u32::from(self.medal == Some(Medal::Gold))
    }

    /// Silver indicator (0 or 1).
    pub fn silver(&self) -> u32 {
        u32::from(self.medal == Some(Medal::Silver))
    }

    /// Bronze indicator (0 or 1).
    pub fn bronze(&self) -> u32 {
        u32::from(self.medal == Some(Medal::Bronze))
    }

    pub fn has_medal(&self) -> bool {
        self.medal.is_some()
    }

    pub(crate) fn team_key(&self) -> TeamKey<'_> {
        (
            self.team.as_str(),
            self.noc.as_str(),
            self.games.as_str(),
            self.year,
            self.city.as_str(),
            self.sport.as_str(),
            self.event.as_str(),
            self.medal,
        )
    }

    /// Every field, in a hashable form.
    pub(crate) fn identity(&self) -> RowIdentity<'_> {
        RowIdentity {
            id: self.id.as_deref(),
            name: &self.name,
            sex: self.sex,
            measures: [bits(self.age), bits(self.height), bits(self.weight)],
            team_key: self.team_key(),
            region: &self.region,
        }
    }

    /// Render the record as canonical string cells.
    pub(crate) fn to_cells(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_default(),
            self.name.clone(),
            self.sex.map(|s| s.code().to_string()).unwrap_or_default(),
            format_measure(self.age),
            format_measure(self.height),
            format_measure(self.weight),
            self.team.clone(),
            self.noc.clone(),
            self.games.clone(),
            self.year.to_string(),
            super::columns::SUMMER.to_string(),
            self.city.clone(),
            self.sport.clone(),
            self.event.clone(),
            self.medal.map(|m| m.label().to_string()).unwrap_or_default(),
            self.region.clone(),
            self.gold().to_string(),
            self.silver().to_string(),
            self.bronze().to_string(),
        ]
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct RowIdentity<'a> {
    id: Option<&'a str>,
    name: &'a str,
    sex: Option<Sex>,
    measures: [Option<u64>; 3],
    team_key: TeamKey<'a>,
    region: &'a str,
}

/// Bit pattern of a measurement, so it can take part in hashing.
pub(crate) fn bits(value: Option<f64>) -> Option<u64> {
    value.map(f64::to_bits)
}

fn format_measure(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
