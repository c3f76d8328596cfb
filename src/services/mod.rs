pub mod bonus_calculator;
pub mod bonus_chart;
pub mod bulk_calculation;
pub mod column_detection;
pub mod csv_fields;
pub mod history_store;
pub mod intercom_csv;
pub mod motivation;
pub mod podium;
pub mod policy_yaml;
pub mod results_export;
pub mod team_statistics;
