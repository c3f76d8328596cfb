use once_cell::sync::Lazy;
use regex::Regex;

/// Marker the helpdesk export writes into cells that do not apply.
pub const NO_DATA_MARKER: &str = "-";

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("valid number regex"));
static LEADING_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*)\s*%").expect("valid percent regex"));

/// Splits a single CSV line into fields.
///
/// Double-quoted fields may contain commas and `""` escapes. A line the reader
/// cannot make sense of is returned as a single raw field so that callers can
/// drop it instead of failing.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        Ok(false) => vec![String::new()],
        Err(_) => vec![line.to_string()],
    }
}

pub fn is_no_data_marker(value: &str) -> bool {
    value.trim() == NO_DATA_MARKER
}

/// Extracts a count such as `"1,234"` or `"1 234 chats"`.
///
/// Commas and whitespace are removed first, then the first decimal number in
/// what remains is parsed. Empty cells and the `-` marker yield `None`.
pub fn clean_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NO_DATA_MARKER {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    FIRST_NUMBER
        .find(&cleaned)
        .and_then(|found| found.as_str().parse::<f64>().ok())
}

/// Reads the percentage at the start of a CSAT cell, e.g. `"87.7% (822/937)"`.
pub fn extract_csat(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NO_DATA_MARKER {
        return None;
    }

    LEADING_PERCENT
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse::<f64>().ok())
}
