use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::bonus::BonusPolicy;
use crate::services::history_store::DEFAULT_STORE_PATH;
use crate::services::podium::PODIUM_SIZE;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// History store (JSON) used by commands that read or record results
    #[arg(long, global = true, default_value = DEFAULT_STORE_PATH)]
    pub store: String,
    /// Optional YAML file overriding the bonus policy
    #[arg(long, global = true)]
    pub policy: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an Intercom CSV export into a JSON array of agent records
    Parse {
        /// Intercom CSV export
        input: String,
        /// Output JSON file
        #[arg(default_value = "output.json")]
        output: String,
    },
    /// Calculate the bonus for a single agent
    Calculate {
        /// Closed conversations in the period
        #[arg(short, long)]
        chats: f64,
        /// CSAT score in percent
        #[arg(short = 's', long)]
        csat: f64,
        /// Agent name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Do not record the calculation in the history
        #[arg(long)]
        no_save: bool,
    },
    /// Calculate bonuses for every agent in a CSV export
    Bulk {
        /// CSV export
        input: String,
        /// Column index (0-based) holding the agent name
        #[arg(long)]
        name_column: Option<usize>,
        /// Column index (0-based) holding closed conversations
        #[arg(long)]
        chats_column: Option<usize>,
        /// Column index (0-based) holding the CSAT score
        #[arg(long)]
        csat_column: Option<usize>,
        /// Show the results without recording them
        #[arg(long)]
        dry_run: bool,
    },
    /// List recorded calculations, most recent first
    History,
    /// Remove every recorded calculation
    ClearHistory,
    /// Show team statistics over the recorded history
    Stats,
    /// Show the top performers
    Podium {
        /// Number of places
        #[arg(short, long, default_value_t = PODIUM_SIZE)]
        limit: usize,
    },
    /// Exclude an agent from the podium
    Exclude {
        name: String,
    },
    /// Bring an excluded agent back onto the podium
    Include {
        name: String,
    },
    /// Export the recorded history as CSV
    Export {
        /// Output CSV file
        #[arg(short, long, default_value_t = default_export_path())]
        output: String,
    },
    /// Plot total bonus per agent into a PNG chart
    PlotBonuses {
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings shared by every command that touches the history or the bonus rules.
pub struct CommandContext {
    pub store_path: String,
    pub policy: BonusPolicy,
}

fn default_export_path() -> String {
    format!("bonus_report_{}.csv", chrono::Local::now().date_naive().format("%Y-%m-%d"))
}
