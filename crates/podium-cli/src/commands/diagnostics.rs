//! Diagnostics command - what the loader and canonicalizer absorbed.

use chrono::SecondsFormat;
use colored::Colorize;
use serde::Serialize;

use podium::analysis::Frame;
use podium::{CanonicalizeReport, Diagnostic, DiagnosticCounts, Severity, SourceMetadata};

use super::Session;
use crate::cli::OutputFormat;
use crate::output;

#[derive(Serialize)]
struct DiagnosticsReport<'a> {
    sources: &'a [SourceMetadata],
    report: &'a CanonicalizeReport,
    counts: DiagnosticCounts,
    diagnostics: &'a [Diagnostic],
}

pub fn run(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = &session.dataset;

    match session.format {
        OutputFormat::Json => {
            let report = DiagnosticsReport {
                sources: &dataset.sources,
                report: &dataset.report,
                counts: dataset.diagnostic_counts(),
                diagnostics: &dataset.diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        OutputFormat::Csv => output::emit(&diagnostics_frame(&dataset.diagnostics), session.format, "Diagnostics"),
        OutputFormat::Table => {
            print_text(session);
            Ok(())
        }
    }
}

fn diagnostics_frame(diagnostics: &[Diagnostic]) -> Frame {
    Frame::new()
        .text("Recorded", diagnostics.iter().map(timestamp))
        .text("Severity", diagnostics.iter().map(|d| d.severity.label()))
        .text("Kind", diagnostics.iter().map(|d| d.kind.label()))
        .text("Source", diagnostics.iter().map(|d| d.source.as_str()))
        .text("Message", diagnostics.iter().map(|d| d.message.as_str()))
        .integer("Occurrences", diagnostics.iter().map(|d| d.occurrences.unwrap_or(1) as i64))
}

fn timestamp(diagnostic: &Diagnostic) -> String {
    diagnostic.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn print_text(session: &Session) {
    let dataset = &session.dataset;

    println!("{}", "Sources".bold());
    if dataset.sources.is_empty() {
        println!("  {}", "none loaded".dimmed());
    }
    for source in &dataset.sources {
        println!(
            "  {} ({}, {}, {} rows, {} malformed)",
            source.file.cyan(),
            source.format,
            source.encoding,
            source.row_count,
            source.malformed_rows
        );
        println!("    sha256 {}", source.hash.dimmed());
    }

    let report = &dataset.report;
    println!();
    println!("{}", "Canonicalization".bold());
    println!("  Input rows:          {}", report.input_rows);
    println!("  Other seasons:       {}", report.season_filtered);
    println!("  Duplicates removed:  {}", report.duplicates_removed);
    println!("  Output rows:         {}", report.output_rows);
    println!("  Region source:       {:?}", report.region_fallback);
    if !report.backfilled_columns.is_empty() {
        println!("  Backfilled columns:  {}", report.backfilled_columns.join(", "));
    }

    let counts = dataset.diagnostic_counts();
    println!();
    println!(
        "{} ({} errors, {} warnings, {} info)",
        "Diagnostics".bold(),
        counts.error,
        counts.warning,
        counts.info
    );
    for diagnostic in &dataset.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => diagnostic.severity.label().red().bold(),
            Severity::Warning => diagnostic.severity.label().yellow(),
            Severity::Info => diagnostic.severity.label().blue(),
        };
        println!(
            "  {} {:<8} {} [{}] {}",
            timestamp(diagnostic).dimmed(),
            severity,
            diagnostic.kind.label(),
            diagnostic.source,
            diagnostic.message
        );
        if let Some(n) = diagnostic.occurrences {
            println!("      {} occurrences, sample rows {:?}", n, diagnostic.sample_rows);
        }
    }
}
