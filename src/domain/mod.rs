pub mod bonus;
pub mod history;
pub mod performance;
