use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::performance::PerformanceRecord;
use crate::services::column_detection::{
    detect_header, map_columns_heuristically, map_exact_columns, ColumnField, ColumnMapping,
    HeaderDetection,
};
use crate::services::csv_fields::{clean_number, extract_csat, is_no_data_marker, parse_csv_line, NO_DATA_MARKER};

/// Files above this size are rejected before parsing.
pub const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),
    #[error("input file {path} is {size} bytes, the limit is {limit}")]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to read input file: {0}")]
    Read(#[from] io::Error),
    #[error("csv input is empty")]
    EmptyInput,
    #[error("missing \"{0}\" column")]
    MissingColumn(&'static str),
    #[error("could not find a {0} column, select one explicitly")]
    UnresolvedColumn(ColumnField),
    #[error("{field} column {index} is out of range, the header has {columns} columns")]
    ColumnOutOfRange {
        field: ColumnField,
        index: usize,
        columns: usize,
    },
}

/// Caller-chosen column indices that take precedence over detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub name: Option<usize>,
    pub closed_conversations: Option<usize>,
    pub csat: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// All three canonical labels must be present; anything else is fatal.
    Standalone,
    /// Heuristic mapping with optional caller overrides.
    Interactive(ColumnOverrides),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    InsufficientColumns,
    SummaryRow,
    MissingName,
    InactiveAgent,
    NoValidData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestSummary {
    /// Non-blank lines after the header.
    pub rows_read: usize,
    pub blank_lines: usize,
    pub skipped_insufficient_columns: usize,
    pub skipped_summary: usize,
    pub skipped_missing_name: usize,
    pub skipped_inactive: usize,
    pub skipped_no_valid_data: usize,
    pub retained: usize,
    pub with_chats: usize,
    pub with_csat: usize,
    pub complete: usize,
    pub partial: usize,
    pub average_conversations: Option<f64>,
    pub average_csat: Option<f64>,
}

impl IngestSummary {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::InsufficientColumns => self.skipped_insufficient_columns += 1,
            SkipReason::SummaryRow => self.skipped_summary += 1,
            SkipReason::MissingName => self.skipped_missing_name += 1,
            SkipReason::InactiveAgent => self.skipped_inactive += 1,
            SkipReason::NoValidData => self.skipped_no_valid_data += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_insufficient_columns
            + self.skipped_summary
            + self.skipped_missing_name
            + self.skipped_inactive
            + self.skipped_no_valid_data
    }

    fn finish(&mut self, records: &[PerformanceRecord]) {
        let chats: Vec<f64> = records.iter().filter_map(|r| r.closed_conversations).collect();
        let csat: Vec<f64> = records.iter().filter_map(|r| r.csat_score).collect();

        self.retained = records.len();
        self.with_chats = chats.len();
        self.with_csat = csat.len();
        self.complete = records.iter().filter(|r| r.is_complete()).count();
        self.partial = self.retained - self.complete;
        self.average_conversations = average(&chats);
        self.average_csat = average(&csat);
    }
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutcome {
    pub records: Vec<PerformanceRecord>,
    /// 1-based line number of the header in the raw text.
    pub header_line: usize,
    pub header: Vec<String>,
    pub detection: HeaderDetection,
    pub mapping: ColumnMapping,
    pub summary: IngestSummary,
}

impl IngestOutcome {
    /// True when no header could be recognised and the first line was assumed.
    pub fn is_degraded(&self) -> bool {
        self.detection == HeaderDetection::FirstLine
    }
}

/// Standalone ingestion: exact-match columns, records only.
pub fn ingest(raw_text: &str) -> Result<Vec<PerformanceRecord>, IngestError> {
    ingest_with_mode(raw_text, IngestMode::Standalone).map(|outcome| outcome.records)
}

pub fn ingest_file<P: AsRef<Path>>(path: P, mode: IngestMode) -> Result<IngestOutcome, IngestError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::InputNotFound(path.to_path_buf()));
    }
    let size = std::fs::metadata(path)?.len();
    if size > MAX_INPUT_BYTES {
        return Err(IngestError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_INPUT_BYTES,
        });
    }
    let raw_text = std::fs::read_to_string(path)?;
    ingest_with_mode(&raw_text, mode)
}

pub fn ingest_with_mode(raw_text: &str, mode: IngestMode) -> Result<IngestOutcome, IngestError> {
    let mut summary = IngestSummary::default();
    let mut lines: Vec<(usize, &str)> = Vec::new();
    for (idx, line) in raw_text.split('\n').enumerate() {
        if line.trim().is_empty() {
            summary.blank_lines += 1;
        } else {
            lines.push((idx + 1, line));
        }
    }

    let candidates: Vec<&str> = lines.iter().map(|(_, line)| *line).collect();
    let header = detect_header(&candidates).ok_or(IngestError::EmptyInput)?;
    let header_line = lines[header.index].0;
    match header.detection {
        HeaderDetection::FirstLine => {
            warn!("could not detect a header row, using line {header_line}")
        }
        detection => info!(?detection, "header row found at line {header_line}"),
    }
    for (line_number, _) in &lines[..header.index] {
        debug!("skipping metadata line {line_number}");
    }

    let mapping = resolve_mapping(&header.fields, mode)?;
    debug!(?mapping, "column mapping resolved");

    let mut records = Vec::new();
    for (line_number, line) in &lines[header.index + 1..] {
        summary.rows_read += 1;
        let fields = parse_csv_line(line);
        match extract_record(&fields, &mapping) {
            Ok(record) => {
                if !record.is_complete() {
                    warn!(
                        "line {line_number}: {} has partial data (chats: {}, CSAT: {})",
                        record.name, fields[mapping.closed_conversations], fields[mapping.csat]
                    );
                }
                records.push(record);
            }
            Err(reason) => {
                debug!(?reason, "skipping line {line_number}");
                summary.record_skip(reason);
            }
        }
    }

    summary.finish(&records);
    info!(
        retained = summary.retained,
        skipped = summary.skipped(),
        "ingestion complete"
    );

    Ok(IngestOutcome {
        records,
        header_line,
        header: header.fields,
        detection: header.detection,
        mapping,
        summary,
    })
}

fn resolve_mapping(header: &[String], mode: IngestMode) -> Result<ColumnMapping, IngestError> {
    match mode {
        IngestMode::Standalone => map_exact_columns(header)
            .complete()
            .map_err(|field| IngestError::MissingColumn(field.canonical_label())),
        IngestMode::Interactive(overrides) => {
            let mut mapping = map_columns_heuristically(header);
            let requested = [
                (ColumnField::Name, overrides.name),
                (ColumnField::ClosedConversations, overrides.closed_conversations),
                (ColumnField::Csat, overrides.csat),
            ];
            for (field, index) in requested {
                if let Some(index) = index {
                    if index >= header.len() {
                        return Err(IngestError::ColumnOutOfRange {
                            field,
                            index,
                            columns: header.len(),
                        });
                    }
                    mapping.set(field, index);
                }
            }
            mapping.complete().map_err(IngestError::UnresolvedColumn)
        }
    }
}

/// Applies the row filters and field cleaning to one parsed data line.
fn extract_record(fields: &[String], mapping: &ColumnMapping) -> Result<PerformanceRecord, SkipReason> {
    if fields.len() < mapping.required_width() {
        return Err(SkipReason::InsufficientColumns);
    }

    let raw_name = &fields[mapping.name];
    if raw_name.to_lowercase().contains("summary") {
        return Err(SkipReason::SummaryRow);
    }
    let name = raw_name.trim();
    if name.is_empty() || name == NO_DATA_MARKER {
        return Err(SkipReason::MissingName);
    }

    let raw_chats = &fields[mapping.closed_conversations];
    let raw_csat = &fields[mapping.csat];
    if is_no_data_marker(raw_chats) && is_no_data_marker(raw_csat) {
        return Err(SkipReason::InactiveAgent);
    }

    let closed_conversations = clean_number(raw_chats);
    let csat_score = extract_csat(raw_csat).filter(|score| (0.0..=100.0).contains(score));

    let record = PerformanceRecord::new(name, closed_conversations, csat_score);
    if record.has_any_data() {
        Ok(record)
    } else {
        Err(SkipReason::NoValidData)
    }
}
