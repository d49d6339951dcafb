//! Athlete commands - rankings and age or physique distributions.

use podium::analysis::{
    self, AGE_BIN_SIZE, DEFAULT_FEATURED_SPORTS, Distribution, Frame, Selection, ToFrame,
};

use super::Session;
use crate::output;

/// Points evaluated per density curve.
const DENSITY_POINTS: usize = 100;

pub fn top(
    session: &Session,
    sport: Option<Selection<String>>,
    country: Option<Selection<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let table = session.dataset.table();
    let (ranked, title) = match country {
        Some(country) => {
            let title = format!("Most successful athletes ({})", country);
            (analysis::most_successful_by_country(table, &country), title)
        }
        None => {
            let sport = sport.unwrap_or_default();
            session.warn_if_unknown("sport", &sport, &analysis::sport_list(table));
            let title = format!("Most successful athletes ({})", sport);
            (analysis::most_successful(table, &sport), title)
        }
    };
    output::emit(&ranked.to_frame(), session.format, &title)
}

pub fn ages(
    session: &Session,
    histogram: bool,
    density: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let ages = analysis::age_distribution(session.dataset.table()).sampled(session.podium.analysis());
    let frame = if histogram {
        histogram_frame(&ages.distributions())
    } else if density {
        density_frame(&ages.distributions())
    } else {
        summary_frame(&ages.distributions())
    };
    output::emit(&frame, session.format, "Distribution of Age")
}

pub fn gold_ages(session: &Session, sports: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let table = session.dataset.table();
    let known = analysis::sports(table);
    for sport in &sports {
        session.warn_if_unknown("sport", sport, &known);
    }

    let config = session.podium.analysis();
    let distributions: Vec<Distribution> = if sports.is_empty() {
        analysis::gold_age_distribution_by_sport(table, &DEFAULT_FEATURED_SPORTS)
    } else {
        analysis::gold_age_distribution_by_sport(table, &sports)
    }
    .into_iter()
    .map(|d| config.sample(d))
    .collect();

    let refs: Vec<&Distribution> = distributions.iter().collect();
    output::emit(
        &summary_frame(&refs),
        session.format,
        "Distribution of Age wrt Sports (Gold Medalist)",
    )
}

pub fn physique(session: &Session, sport: &str) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let table = session.dataset.table();
    session.warn_if_unknown("sport", &sport.to_string(), &analysis::sports(table));

    let points = analysis::height_weight_scatter(table, sport);
    output::emit(
        &points.to_frame(),
        session.format,
        &format!("Height vs Weight ({})", sport),
    )
}

/// One row per group with its five-number summary and mean.
fn summary_frame(distributions: &[&Distribution]) -> Frame {
    let rows: Vec<_> = distributions
        .iter()
        .filter_map(|d| d.summary().map(|s| (d.label.as_str(), s)))
        .collect();

    Frame::new()
        .text("Group", rows.iter().map(|(label, _)| *label))
        .integer("Count", rows.iter().map(|(_, s)| s.count as i64))
        .float("Min", rows.iter().map(|(_, s)| Some(s.min)))
        .float("Q1", rows.iter().map(|(_, s)| Some(s.q1)))
        .float("Median", rows.iter().map(|(_, s)| Some(s.median)))
        .float("Q3", rows.iter().map(|(_, s)| Some(s.q3)))
        .float("Max", rows.iter().map(|(_, s)| Some(s.max)))
        .float("Mean", rows.iter().map(|(_, s)| Some(s.mean)))
}

/// Long format: one row per group and evaluation point.
fn density_frame(distributions: &[&Distribution]) -> Frame {
    let mut groups = Vec::new();
    let mut ages = Vec::new();
    let mut densities = Vec::new();

    for distribution in distributions {
        for point in distribution.density(DENSITY_POINTS) {
            groups.push(distribution.label.clone());
            ages.push(Some(point.x));
            densities.push(Some(point.density));
        }
    }

    Frame::new()
        .text("Group", groups)
        .float("Age", ages)
        .float("Density", densities)
}

/// Long format: one row per group and bin.
fn histogram_frame(distributions: &[&Distribution]) -> Frame {
    let mut groups = Vec::new();
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut counts = Vec::new();

    for distribution in distributions {
        for bin in distribution.histogram(AGE_BIN_SIZE) {
            groups.push(distribution.label.clone());
            starts.push(Some(bin.start));
            ends.push(Some(bin.end));
            counts.push(bin.count as i64);
        }
    }

    Frame::new()
        .text("Group", groups)
        .float("From", starts)
        .float("To", ends)
        .integer("Count", counts)
}
