pub mod base_commands;
pub mod bulk_cmd;
pub mod calculate_cmd;
pub mod history_cmd;
pub mod parse_cmd;
pub mod plot_bonuses_cmd;
pub mod report_format;
pub mod stats_cmd;
