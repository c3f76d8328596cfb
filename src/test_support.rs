use chrono::NaiveDate;

use crate::domain::history::StoredResult;

/// Intercom-style export with metadata lines, a summary row, an inactive
/// agent and a row without a name.
pub const INTERCOM_EXPORT: &str = "Comparison of Teammate performance
\"Date range: Jan 1, 2026 - Jan 31, 2026\"
Teammate,Teammate ID,Closed conversations by teammates,Replies sent,Teammate CSAT score
Alice Martin,101,\"1,234\",\"2,001\",96.9%
Bob Stone,102,640,900,87.7% (822/937)
Chloe Park,103,320,410,-
Dan Idle,104,-,0,-
Summary,,\"2,194\",\"3,311\",92.1%
-,105,10,10,90%

";

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_stored_result(name: &str, chats: f64, csat: f64, bonus: f64) -> StoredResult {
    let total_cost = 3000.0 + bonus;
    StoredResult {
        date: on_date(2026, 2, 1),
        agent_name: name.to_string(),
        closed_chats: chats,
        csat,
        bonus,
        cost_per_chat: if chats > 0.0 { total_cost / chats } else { 0.0 },
        total_cost,
    }
}
