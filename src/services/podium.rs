use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::history::StoredResult;

pub const PODIUM_SIZE: usize = 3;
pub const MIN_PODIUM_CSAT: f64 = 88.0;
pub const MIN_PODIUM_CHATS: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodiumEntry {
    pub name: String,
    pub total_bonus: f64,
    pub total_chats: f64,
    pub average_csat: f64,
    pub calculations: usize,
    pub performance_score: f64,
}

#[derive(Default)]
struct AgentTotals {
    total_bonus: f64,
    total_chats: f64,
    csat_sum: f64,
    count: usize,
}

/// Ranks named agents by average CSAT × total chats.
///
/// Agents below [`MIN_PODIUM_CSAT`] average CSAT or with no more than
/// [`MIN_PODIUM_CHATS`] chats score zero and are left out, as are excluded names.
pub fn top_performers(results: &[StoredResult], exclusions: &[String], limit: usize) -> Vec<PodiumEntry> {
    let mut totals: BTreeMap<&str, AgentTotals> = BTreeMap::new();
    for result in results.iter().filter(|r| r.has_agent_name()) {
        let agent = totals.entry(result.agent_name.as_str()).or_default();
        agent.total_bonus += result.bonus;
        agent.total_chats += result.closed_chats;
        agent.csat_sum += result.csat;
        agent.count += 1;
    }

    let mut ranked: Vec<PodiumEntry> = totals
        .into_iter()
        .filter(|(name, _)| !exclusions.iter().any(|excluded| excluded == name))
        .map(|(name, agent)| {
            let average_csat = agent.csat_sum / agent.count as f64;
            let performance_score =
                if average_csat >= MIN_PODIUM_CSAT && agent.total_chats > MIN_PODIUM_CHATS {
                    average_csat * agent.total_chats
                } else {
                    0.0
                };
            PodiumEntry {
                name: name.to_string(),
                total_bonus: agent.total_bonus,
                total_chats: agent.total_chats,
                average_csat,
                calculations: agent.count,
                performance_score,
            }
        })
        .filter(|entry| entry.performance_score > 0.0)
        .collect();

    // Names are already ascending, so a stable sort keeps ties alphabetical.
    ranked.sort_by(|a, b| {
        b.performance_score
            .partial_cmp(&a.performance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}
