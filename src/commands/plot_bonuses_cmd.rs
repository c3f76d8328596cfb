use std::process::ExitCode;

use crate::commands::base_commands::{CommandContext, Commands};
use crate::services::bonus_chart::write_bonus_chart_png;
use crate::services::history_store::HistoryStore;

pub fn plot_bonuses_command(cmd: Commands, context: &CommandContext) -> ExitCode {
    if let Commands::PlotBonuses { output } = cmd {
        let store = match HistoryStore::load(&context.store_path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Failed to load history: {e}");
                return ExitCode::FAILURE;
            }
        };
        match write_bonus_chart_png(&output, store.results()) {
            Ok(()) => println!("Bonus chart written to {output}"),
            Err(e) => {
                eprintln!("Failed to plot bonuses: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
