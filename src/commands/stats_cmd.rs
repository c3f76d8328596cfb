use std::process::ExitCode;

use crate::commands::base_commands::{CommandContext, Commands};
use crate::commands::report_format::{format_podium, format_team_statistics};
use crate::services::history_store::HistoryStore;
use crate::services::podium::top_performers;
use crate::services::team_statistics::team_statistics;

pub fn stats_command(cmd: Commands, context: &CommandContext) -> ExitCode {
    let store = match HistoryStore::load(&context.store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load history: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cmd {
        Commands::Stats => match team_statistics(store.results(), &context.policy) {
            Some(stats) => println!("{}", format_team_statistics(&stats)),
            None => println!("No calculations recorded yet"),
        },
        Commands::Podium { limit } => {
            let podium = top_performers(store.results(), store.exclusions(), limit);
            if podium.is_empty() {
                println!("No agent meets the podium criteria yet");
            } else {
                println!("{}", format_podium(&podium));
            }
        }
        _ => {}
    }
    ExitCode::SUCCESS
}
