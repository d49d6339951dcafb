//! Time series commands.

use podium::analysis::{self, ToFrame, TrendMetric};

use super::Session;
use crate::output;

pub fn trend(session: &Session, metric: TrendMetric) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let title = match metric {
        TrendMetric::Region => "Participating Nations over the years",
        TrendMetric::Event => "Events over the years",
        TrendMetric::Name => "Athletes over the years",
    };
    let trend = analysis::data_over_time(session.dataset.table(), metric);
    output::emit(&trend.to_frame(), session.format, title)
}

pub fn events(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let pivot = analysis::events_per_sport_over_time(session.dataset.table());
    output::emit(
        &pivot.to_frame(),
        session.format,
        "No. of Events over time (every sport)",
    )
}

pub fn gender(session: &Session, sport: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let title = match sport {
        Some(sport) => format!("Men vs Women participation in {}", sport),
        None => "Men vs Women participation over the years".to_string(),
    };
    let points = analysis::gender_participation(session.dataset.table(), sport);
    output::emit(&points.to_frame(), session.format, &title)
}
