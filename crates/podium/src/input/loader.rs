//! Streaming loader for the event and region source files.
//!
//! Every candidate encoding is tried in order. An attempt streams the file
//! record by record and decodes each field strictly; the first encoding
//! that decodes the whole file wins. Loading never fails: problems end up
//! in the returned diagnostics and, at worst, an explicitly empty table.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, Severity};
use crate::error::{PodiumError, Result};

use super::regions::RegionLookup;
use super::source::{DataTable, SourceMetadata};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Bytes inspected for delimiter detection.
const SNIFF_BYTES: u64 = 8 * 1024;

/// Loader configuration: where the sources live and how to decode them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Athlete event records.
    pub events_path: PathBuf,
    /// NOC to region lookup (None = no lookup).
    pub regions_path: Option<PathBuf>,
    /// Encoding labels to try, in priority order.
    ///
    /// Labels resolve through the WHATWG label table, so `"latin1"` and
    /// `"iso-8859-1"` both mean windows-1252. The default fallback is named
    /// `"windows-1252"` so it matches the encoding recorded in
    /// [`SourceMetadata`].
    pub encodings: Vec<String>,
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Maximum malformed row numbers kept per diagnostic.
    pub malformed_sample_limit: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from("athlete_events.csv"),
            regions_path: Some(PathBuf::from("noc_regions.csv")),
            encodings: vec!["utf-8".to_string(), "windows-1252".to_string()],
            delimiter: None,
            malformed_sample_limit: 5,
        }
    }
}

impl LoaderConfig {
    /// Configuration for an explicit pair of files.
    pub fn new(events_path: impl Into<PathBuf>, regions_path: Option<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
            regions_path,
            ..Self::default()
        }
    }
}

/// Everything the loader produced.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    /// Event records; empty when the source was unavailable.
    pub events: DataTable,
    /// Region lookup; None when absent or unusable.
    pub regions: Option<RegionLookup>,
    /// Metadata for each source that loaded.
    pub sources: Vec<SourceMetadata>,
    /// Problems encountered while loading.
    pub diagnostics: Vec<Diagnostic>,
}

impl RawDataset {
    /// Raw data from in-memory tables, bypassing the file system.
    pub fn from_tables(events: DataTable, regions: Option<RegionLookup>) -> Self {
        Self {
            events,
            regions,
            sources: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// True when no event rows were loaded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Result of one decoding attempt over a file.
struct ReadOutcome {
    table: DataTable,
    malformed_rows: usize,
    malformed_sample: Vec<usize>,
    hash: String,
    bytes_read: u64,
}

/// Loads the raw sources described by a [`LoaderConfig`].
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load both sources.
    pub fn load(&self) -> RawDataset {
        let mut log = DiagnosticLog::new();
        let mut sources = Vec::new();

        let events_path = &self.config.events_path;
        let events = match self.read_source(events_path, &mut log) {
            Ok((table, metadata)) => {
                tracing::info!(
                    file = %metadata.file,
                    rows = metadata.row_count,
                    encoding = %metadata.encoding,
                    "Loaded event records"
                );
                sources.push(metadata);
                table
            }
            Err(e) => {
                log.push(Diagnostic::new(
                    DiagnosticKind::SourceUnavailable,
                    Severity::Error,
                    display_name(events_path),
                    format!("Event records unavailable: {}", e),
                ));
                DataTable::empty()
            }
        };

        let regions = match &self.config.regions_path {
            None => {
                log.push(Diagnostic::new(
                    DiagnosticKind::SourceUnavailable,
                    Severity::Info,
                    "regions",
                    "No region lookup configured; regions fall back to NOC codes",
                ));
                None
            }
            Some(path) => match self.read_source(path, &mut log) {
                Ok((table, metadata)) => {
                    let source = metadata.file.clone();
                    sources.push(metadata);
                    match RegionLookup::from_table(&table) {
                        Ok(lookup) => {
                            tracing::info!(file = %source, codes = lookup.len(), "Loaded region lookup");
                            Some(lookup)
                        }
                        Err(missing) => {
                            log.push(Diagnostic::new(
                                DiagnosticKind::SchemaDrift,
                                Severity::Warning,
                                source,
                                format!(
                                    "Region lookup lacks column(s) {}; regions fall back to NOC codes",
                                    missing.join(", ")
                                ),
                            ));
                            None
                        }
                    }
                }
                Err(e) => {
                    log.push(Diagnostic::new(
                        DiagnosticKind::SourceUnavailable,
                        Severity::Warning,
                        display_name(path),
                        format!("Region lookup unavailable: {}; regions fall back to NOC codes", e),
                    ));
                    None
                }
            },
        };

        RawDataset {
            events,
            regions,
            sources,
            diagnostics: log.into_vec(),
        }
    }

    /// Read one delimited file, probing the configured encodings in order.
    pub fn read_source(
        &self,
        path: &Path,
        log: &mut DiagnosticLog,
    ) -> Result<(DataTable, SourceMetadata)> {
        let file_metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
        let source = display_name(path);

        let delimiter = match self.config.delimiter {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => {
                return Err(PodiumError::Config(format!(
                    "delimiter '{}' is not a single-byte character",
                    c
                )));
            }
            None => detect_delimiter(&sniff(path)?)?,
        };

        let encodings = self.resolve_encodings(&source, log)?;
        let mut last_error = None;

        for (attempt, encoding) in encodings.iter().enumerate() {
            match self.read_with_encoding(path, encoding, delimiter) {
                Ok(outcome) => {
                    if attempt > 0 {
                        log.push(Diagnostic::new(
                            DiagnosticKind::EncodingFallback,
                            Severity::Info,
                            source.clone(),
                            format!("Decoded as {}", encoding.name()),
                        ));
                    }
                    if outcome.malformed_rows > 0 {
                        log.push(
                            Diagnostic::new(
                                DiagnosticKind::MalformedRow,
                                Severity::Warning,
                                source.clone(),
                                format!(
                                    "Skipped {} row(s) with more fields than the header",
                                    outcome.malformed_rows
                                ),
                            )
                            .with_occurrences(outcome.malformed_rows)
                            .with_sample_rows(outcome.malformed_sample.clone()),
                        );
                    }

                    let metadata = SourceMetadata::new(
                        path.to_path_buf(),
                        outcome.hash,
                        file_metadata.len().max(outcome.bytes_read),
                        format_name(delimiter),
                        encoding.name().to_string(),
                        &outcome.table,
                        outcome.malformed_rows,
                    );
                    return Ok((outcome.table, metadata));
                }
                Err(e @ PodiumError::Undecodable { .. }) => {
                    log.push(Diagnostic::new(
                        DiagnosticKind::EncodingFallback,
                        Severity::Info,
                        source.clone(),
                        format!("{}; trying next candidate encoding", e),
                    ));
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            PodiumError::Config("no candidate encodings configured".to_string())
        }))
    }

    /// Map configured labels to encodings, dropping unknown labels and repeats.
    fn resolve_encodings(
        &self,
        source: &str,
        log: &mut DiagnosticLog,
    ) -> Result<Vec<&'static Encoding>> {
        let mut resolved: Vec<&'static Encoding> = Vec::new();
        for label in &self.config.encodings {
            match Encoding::for_label(label.trim().as_bytes()) {
                Some(encoding) => {
                    if !resolved.contains(&encoding) {
                        resolved.push(encoding);
                    }
                }
                None => log.push(Diagnostic::new(
                    DiagnosticKind::EncodingFallback,
                    Severity::Warning,
                    source,
                    PodiumError::UnknownEncoding(label.clone()).to_string(),
                )),
            }
        }

        if resolved.is_empty() {
            return Err(PodiumError::UnknownEncoding(self.config.encodings.join(", ")));
        }
        Ok(resolved)
    }

    /// Stream the file once, decoding every field with `encoding`.
    fn read_with_encoding(
        &self,
        path: &Path,
        encoding: &'static Encoding,
        delimiter: u8,
    ) -> Result<ReadOutcome> {
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(HashingReader::new(file));

        let header_record = reader.byte_headers()?.clone();
        let mut headers = decode_record(&header_record, encoding, 1)?;
        if let Some(first) = headers.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        for header in &mut headers {
            *header = header.trim().to_string();
        }
        if headers.iter().all(String::is_empty) {
            return Err(PodiumError::EmptyData(format!(
                "no header row in {}",
                path.display()
            )));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        let mut malformed_rows = 0;
        let mut malformed_sample = Vec::new();
        let mut record = csv::ByteRecord::new();
        let mut row_number = 1;

        while reader.read_byte_record(&mut record)? {
            row_number += 1;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_number);

            if record.len() > expected_cols {
                malformed_rows += 1;
                if malformed_sample.len() < self.config.malformed_sample_limit {
                    malformed_sample.push(line);
                }
                continue;
            }

            let mut row = decode_record(&record, encoding, line)?;
            // Pad short rows
            while row.len() < expected_cols {
                row.push(String::new());
            }
            rows.push(row);
        }

        let (hash, bytes_read) = reader.into_inner().finish();

        Ok(ReadOutcome {
            table: DataTable::new(headers, rows),
            malformed_rows,
            malformed_sample,
            hash,
            bytes_read,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Passes bytes through while hashing them, so the hash costs no extra read.
struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
    bytes: u64,
}

impl<R: Read> HashingReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            bytes: 0,
        }
    }

    fn finish(self) -> (String, u64) {
        (format!("sha256:{:x}", self.hasher.finalize()), self.bytes)
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }
}

/// Decode every field of a record, failing on the first invalid one.
fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
    row: usize,
) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| {
            encoding
                .decode_without_bom_handling_and_without_replacement(field)
                .map(|s| s.into_owned())
                .ok_or_else(|| PodiumError::Undecodable {
                    encoding: encoding.name().to_string(),
                    row,
                })
        })
        .collect()
}

/// Read the head of a file for delimiter detection.
fn sniff(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut head = Vec::new();
    file.take(SNIFF_BYTES)
        .read_to_end(&mut head)
        .map_err(|e| io_error(path, e))?;
    Ok(head)
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .split(b'\n')
        .take(10)
        .filter_map(|l| l.ok())
        .map(|l| String::from_utf8_lossy(&l).into_owned())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(PodiumError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat raw frequency
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

fn format_name(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn io_error(path: &Path, source: io::Error) -> PodiumError {
    PodiumError::Io {
        path: path.to_path_buf(),
        source,
    }
}
