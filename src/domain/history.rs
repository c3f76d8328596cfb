use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calculation that has been recorded in the history.
///
/// Entries are never mutated once written; the history only grows at the
/// front or is cleared as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub date: NaiveDate,
    #[serde(default)]
    pub agent_name: String,
    pub closed_chats: f64,
    pub csat: f64,
    pub bonus: f64,
    pub cost_per_chat: f64,
    pub total_cost: f64,
}

impl StoredResult {
    pub fn has_agent_name(&self) -> bool {
        !self.agent_name.trim().is_empty()
    }
}
