use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::domain::history::StoredResult;

pub const EXPORT_HEADERS: [&str; 7] = [
    "Date",
    "Agent Name",
    "Closed Chats",
    "CSAT",
    "Bonus (EUR)",
    "Total Cost (EUR)",
    "Cost per Chat (EUR)",
];

#[derive(Error, Debug)]
pub enum ReportExportError {
    #[error("no results to export")]
    Empty,
    #[error("failed to write csv report: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write csv report: {0}")]
    Io(#[from] std::io::Error),
}

pub fn export_results_csv<W: Write>(writer: W, results: &[StoredResult]) -> Result<(), ReportExportError> {
    if results.is_empty() {
        return Err(ReportExportError::Empty);
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;
    for result in results {
        let agent_name = if result.has_agent_name() {
            result.agent_name.as_str()
        } else {
            "-"
        };
        csv_writer.write_record([
            result.date.format("%Y-%m-%d").to_string(),
            agent_name.to_string(),
            result.closed_chats.to_string(),
            result.csat.to_string(),
            format!("{:.2}", result.bonus),
            format!("{:.2}", result.total_cost),
            format!("{:.2}", result.cost_per_chat),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_results_csv_file<P: AsRef<Path>>(path: P, results: &[StoredResult]) -> Result<(), ReportExportError> {
    if results.is_empty() {
        return Err(ReportExportError::Empty);
    }
    let file = std::fs::File::create(path)?;
    export_results_csv(file, results)
}
