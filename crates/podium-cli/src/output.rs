//! Rendering of frames as aligned text, CSV or JSON.

use std::io::{self, Write};

use colored::Colorize;
use podium::analysis::Frame;

use crate::cli::OutputFormat;

/// Print one frame in the selected format.
pub fn emit(frame: &Frame, format: OutputFormat, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_table(frame, title);
            Ok(())
        }
        OutputFormat::Csv => {
            frame.write_csv(io::stdout().lock())?;
            Ok(())
        }
        OutputFormat::Json => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, frame)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Print several frames; JSON output becomes one object keyed by title.
pub fn emit_all(
    frames: &[(&str, Frame)],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == OutputFormat::Json {
        let object: serde_json::Map<String, serde_json::Value> = frames
            .iter()
            .map(|(title, frame)| Ok((title.to_string(), serde_json::to_value(frame)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }

    for (i, (title, frame)) in frames.iter().enumerate() {
        if i > 0 {
            println!();
        }
        emit(frame, format, title)?;
    }
    Ok(())
}

fn print_table(frame: &Frame, title: &str) {
    println!("{}", title.cyan().bold());

    if frame.is_empty() {
        println!("{}", "No data".dimmed());
        return;
    }

    let headers: Vec<&str> = frame.column_names().collect();
    let rows = frame.rows();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(c, h)| {
            rows.iter()
                .map(|r| r[c].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", line.join("  "));
    }
}
