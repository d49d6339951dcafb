//! Overview command - headline counts of the loaded games.

use podium::analysis::{self, ToFrame};

use super::Session;
use crate::output;

pub fn run(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if session.report_if_empty() {
        return Ok(());
    }

    let stats = analysis::overview(session.dataset.table());
    output::emit(&stats.to_frame(), session.format, "Top Statistics")
}
