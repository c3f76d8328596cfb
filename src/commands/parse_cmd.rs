use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_ingest_summary;
use crate::services::intercom_csv::{ingest_file, IngestMode};

pub fn parse_command(cmd: Commands) -> ExitCode {
    if let Commands::Parse { input, output } = cmd {
        let outcome = match ingest_file(&input, IngestMode::Standalone) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Failed to parse Intercom export: {e}");
                return ExitCode::FAILURE;
            }
        };

        let json = match serde_json::to_string_pretty(&outcome.records) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize records: {e}");
                return ExitCode::FAILURE;
            }
        };

        if let Err(e) = std::fs::write(&output, json) {
            eprintln!("Failed to write output file: {e}");
            return ExitCode::FAILURE;
        }
        println!("Saved {} records to {output}", outcome.records.len());
        println!("{}", format_ingest_summary(&outcome.summary));
    }
    ExitCode::SUCCESS
}
