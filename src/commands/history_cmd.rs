use std::process::ExitCode;

use crate::commands::base_commands::{CommandContext, Commands};
use crate::commands::report_format::format_history;
use crate::services::history_store::HistoryStore;
use crate::services::results_export::export_results_csv_file;

pub fn history_command(cmd: Commands, context: &CommandContext) -> ExitCode {
    let mut store = match HistoryStore::load(&context.store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load history: {e}");
            return ExitCode::FAILURE;
        }
    };

    let changed = match cmd {
        Commands::History => {
            if store.results().is_empty() {
                println!("No calculations recorded yet");
            } else {
                println!("{}", format_history(store.results()));
            }
            false
        }
        Commands::ClearHistory => {
            let removed = store.clear_results();
            println!("Removed {removed} recorded calculations");
            true
        }
        Commands::Exclude { name } => {
            if store.exclude(&name) {
                println!("{} excluded from the podium", name.trim());
                true
            } else {
                println!("{} is already excluded", name.trim());
                false
            }
        }
        Commands::Include { name } => {
            if store.include(&name) {
                println!("{} is back on the podium", name.trim());
                true
            } else {
                println!("{} was not excluded", name.trim());
                false
            }
        }
        Commands::Export { output } => {
            return match export_results_csv_file(&output, store.results()) {
                Ok(()) => {
                    println!("Report written to {output}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to export history: {e}");
                    ExitCode::FAILURE
                }
            };
        }
        _ => false,
    };

    if changed {
        if let Err(e) = store.save() {
            eprintln!("Failed to save history: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
