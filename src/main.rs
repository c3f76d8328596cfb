use std::process::ExitCode;

use agent_bonus::commands::base_commands::{CliArgs, CommandContext, Commands};
use agent_bonus::commands::bulk_cmd::bulk_command;
use agent_bonus::commands::calculate_cmd::calculate_command;
use agent_bonus::commands::history_cmd::history_command;
use agent_bonus::commands::parse_cmd::parse_command;
use agent_bonus::commands::plot_bonuses_cmd::plot_bonuses_command;
use agent_bonus::commands::stats_cmd::stats_command;
use agent_bonus::domain::bonus::BonusPolicy;
use agent_bonus::services::policy_yaml::load_policy_from_yaml_file;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"));
    if let Ok(filter) = filter {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = CliArgs::parse();

    let policy = match &args.policy {
        Some(path) => match load_policy_from_yaml_file(path) {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("Failed to load bonus policy: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => BonusPolicy::default(),
    };
    let context = CommandContext {
        store_path: args.store,
        policy,
    };

    match args.command {
        cmd @ Commands::Parse { .. } => parse_command(cmd),
        cmd @ Commands::Calculate { .. } => calculate_command(cmd, &context),
        cmd @ Commands::Bulk { .. } => bulk_command(cmd, &context),
        cmd @ (Commands::History
        | Commands::ClearHistory
        | Commands::Exclude { .. }
        | Commands::Include { .. }
        | Commands::Export { .. }) => history_command(cmd, &context),
        cmd @ (Commands::Stats | Commands::Podium { .. }) => stats_command(cmd, &context),
        cmd @ Commands::PlotBonuses { .. } => plot_bonuses_command(cmd, &context),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            clap_complete::generate(shell, &mut command, "agent-bonus", &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
