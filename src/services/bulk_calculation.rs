use chrono::NaiveDate;
use tracing::debug;

use crate::domain::bonus::BonusBreakdown;
use crate::domain::history::StoredResult;
use crate::domain::performance::PerformanceRecord;
use crate::services::bonus_calculator::BonusCalculator;

#[derive(Debug, Clone, PartialEq)]
pub struct BulkCalculation {
    /// In the order of the input records.
    pub results: Vec<StoredResult>,
    pub processed: usize,
    pub qualified: usize,
    pub skipped_without_chats: usize,
}

/// Builds the history entry for a single calculation.
pub fn stored_result(
    date: NaiveDate,
    agent_name: &str,
    closed_chats: f64,
    csat: Option<f64>,
    breakdown: &BonusBreakdown,
) -> StoredResult {
    StoredResult {
        date,
        agent_name: agent_name.trim().to_string(),
        closed_chats,
        csat: csat.unwrap_or(0.0),
        bonus: breakdown.total_bonus,
        cost_per_chat: breakdown.cost_per_chat,
        total_cost: breakdown.total_cost,
    }
}

/// Calculates a bonus for every ingested record that has a positive chat count.
///
/// A record without CSAT is still recorded (with CSAT 0) but never qualifies.
pub fn calculate_bulk(
    records: &[PerformanceRecord],
    calculator: &BonusCalculator,
    date: NaiveDate,
) -> BulkCalculation {
    let mut results = Vec::with_capacity(records.len());
    let mut qualified = 0;
    let mut skipped_without_chats = 0;

    for record in records {
        let chats = match record.closed_conversations {
            Some(chats) if chats > 0.0 => chats,
            _ => {
                debug!("skipping {}: no closed conversations", record.name);
                skipped_without_chats += 1;
                continue;
            }
        };

        let breakdown = calculator.compute(Some(chats), record.csat_score);
        if breakdown.qualified {
            qualified += 1;
        }
        results.push(stored_result(date, &record.name, chats, record.csat_score, &breakdown));
    }

    BulkCalculation {
        processed: results.len(),
        results,
        qualified,
        skipped_without_chats,
    }
}
