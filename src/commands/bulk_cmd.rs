use std::process::ExitCode;

use chrono::Local;

use crate::commands::base_commands::{CommandContext, Commands};
use crate::commands::report_format::{format_history, format_ingest_summary};
use crate::services::bonus_calculator::BonusCalculator;
use crate::services::bulk_calculation::calculate_bulk;
use crate::services::history_store::HistoryStore;
use crate::services::intercom_csv::{ingest_file, ColumnOverrides, IngestMode};

pub fn bulk_command(cmd: Commands, context: &CommandContext) -> ExitCode {
    if let Commands::Bulk {
        input,
        name_column,
        chats_column,
        csat_column,
        dry_run,
    } = cmd
    {
        let overrides = ColumnOverrides {
            name: name_column,
            closed_conversations: chats_column,
            csat: csat_column,
        };
        let outcome = match ingest_file(&input, IngestMode::Interactive(overrides)) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Failed to read CSV export: {e}");
                return ExitCode::FAILURE;
            }
        };
        if outcome.is_degraded() {
            eprintln!("Warning: no header recognised, the first line was used as header");
        }
        println!(
            "Columns: name={} chats={} csat={} (header on line {})",
            outcome.mapping.name,
            outcome.mapping.closed_conversations,
            outcome.mapping.csat,
            outcome.header_line
        );

        let calculator = BonusCalculator::new(&context.policy);
        let bulk = calculate_bulk(&outcome.records, &calculator, Local::now().date_naive());
        if bulk.results.is_empty() {
            eprintln!("Failed to calculate bonuses: no agent in {input} has closed chats");
            return ExitCode::FAILURE;
        }

        println!("{}", format_ingest_summary(&outcome.summary));
        println!("{}", format_history(&bulk.results));
        println!(
            "Processed {} agents, {} team members qualified for a bonus, {} skipped without closed chats",
            bulk.processed, bulk.qualified, bulk.skipped_without_chats
        );

        if dry_run {
            return ExitCode::SUCCESS;
        }

        let mut store = match HistoryStore::load(&context.store_path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Failed to load history: {e}");
                return ExitCode::FAILURE;
            }
        };
        store.append(bulk.results);
        if let Err(e) = store.save() {
            eprintln!("Failed to save history: {e}");
            return ExitCode::FAILURE;
        }
        println!("Results recorded in {}", store.path().display());
    }
    ExitCode::SUCCESS
}
