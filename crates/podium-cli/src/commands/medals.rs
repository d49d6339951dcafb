//! Medal commands - filtered tallies and the per-country view.

use podium::analysis::{self, Selection, ToFrame};

use super::Session;
use crate::output;

pub fn tally(
    session: &Session,
    year: Selection<i32>,
    country: Selection<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let title = match (&year, &country) {
        (Selection::Overall, Selection::Overall) => "Overall Tally".to_string(),
        (Selection::Only(y), Selection::Overall) => format!("Medal Tally in {} Olympics", y),
        (Selection::Overall, Selection::Only(c)) => format!("{} overall performance", c),
        (Selection::Only(y), Selection::Only(c)) => {
            format!("{} performance in {} Olympics", c, y)
        }
    };

    let result = analysis::fetch_medal_tally(session.dataset.table(), &year, &country);
    output::emit(&result.to_frame(), session.format, &title)
}

pub fn country(session: &Session, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let table = session.dataset.table();
    session.warn_if_unknown("region", &name.to_string(), &analysis::countries(table));

    let yearwise = analysis::yearwise_medal_tally(table, name);
    let heatmap = analysis::country_sport_heatmap(table, name);
    let athletes = analysis::most_successful_by_country(table, &Selection::only(name));

    let medals_title = format!("{} Medal Tally over the years", name);
    let heatmap_title = format!("{} excels in the following sports", name);
    let athletes_title = format!("Top 15 athletes of {}", name);
    output::emit_all(
        &[
            (medals_title.as_str(), yearwise.to_frame()),
            (heatmap_title.as_str(), heatmap.to_frame()),
            (athletes_title.as_str(), athletes.to_frame()),
        ],
        session.format,
    )
}
