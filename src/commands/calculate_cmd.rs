use std::process::ExitCode;

use chrono::Local;

use crate::commands::base_commands::{CommandContext, Commands};
use crate::commands::report_format::{format_breakdown, format_tier_progress};
use crate::services::bonus_calculator::BonusCalculator;
use crate::services::bulk_calculation::stored_result;
use crate::services::history_store::HistoryStore;
use crate::services::motivation::motivational_message;

pub fn calculate_command(cmd: Commands, context: &CommandContext) -> ExitCode {
    if let Commands::Calculate {
        chats,
        csat,
        name,
        no_save,
    } = cmd
    {
        if !chats.is_finite() || chats <= 0.0 {
            eprintln!("Failed to calculate bonus: closed chats must be a positive number");
            return ExitCode::FAILURE;
        }
        if !(0.0..=100.0).contains(&csat) {
            eprintln!("Failed to calculate bonus: CSAT must be between 0 and 100");
            return ExitCode::FAILURE;
        }

        let calculator = BonusCalculator::new(&context.policy);
        let breakdown = calculator.compute(Some(chats), Some(csat));
        let steps = calculator.tier_steps(chats);

        println!(
            "{}",
            format_breakdown(&name, chats, csat, &breakdown, &steps, &context.policy)
        );
        if let Some(progress) = calculator.tier_progress(chats) {
            println!("{}", format_tier_progress(&progress));
        }
        println!("{}", motivational_message(breakdown.total_bonus));

        if no_save {
            return ExitCode::SUCCESS;
        }

        let mut store = match HistoryStore::load(&context.store_path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Failed to load history: {e}");
                return ExitCode::FAILURE;
            }
        };
        let today = Local::now().date_naive();
        store.append([stored_result(today, &name, chats, Some(csat), &breakdown)]);
        if let Err(e) = store.save() {
            eprintln!("Failed to save history: {e}");
            return ExitCode::FAILURE;
        }
        println!("Calculation recorded in {}", store.path().display());
    }
    ExitCode::SUCCESS
}
