use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::bonus::BonusPolicy;
use crate::domain::history::StoredResult;

/// CSAT band relative to a 92% team goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsatRating {
    Excellent,
    Good,
    Warning,
    Danger,
}

impl CsatRating {
    pub fn from_csat(csat: f64) -> Self {
        if csat >= 95.0 {
            CsatRating::Excellent
        } else if csat >= 92.0 {
            CsatRating::Good
        } else if csat >= 88.0 {
            CsatRating::Warning
        } else {
            CsatRating::Danger
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CsatRating::Excellent => "excellent",
            CsatRating::Good => "good",
            CsatRating::Warning => "warning",
            CsatRating::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStatistics {
    pub entries: usize,
    pub total_bonuses: f64,
    pub average_bonus: f64,
    pub total_chats: f64,
    pub average_csat: f64,
    pub csat_rating: CsatRating,
    pub total_team_cost: f64,
    pub average_cost_per_chat: f64,
    pub team_size: usize,
    pub team_objective: f64,
    pub goal_achievement: f64,
    pub achievement_percentage: f64,
}

/// Aggregates the stored history. Returns `None` for an empty history.
pub fn team_statistics(results: &[StoredResult], policy: &BonusPolicy) -> Option<TeamStatistics> {
    if results.is_empty() {
        return None;
    }

    let entries = results.len();
    let total_bonuses: f64 = results.iter().map(|r| r.bonus).sum();
    let total_chats: f64 = results.iter().map(|r| r.closed_chats).sum();
    let average_csat = results.iter().map(|r| r.csat).sum::<f64>() / entries as f64;
    let total_team_cost = policy.base_salary * entries as f64 + total_bonuses;

    let team_size = results
        .iter()
        .filter(|r| r.has_agent_name())
        .map(|r| r.agent_name.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let team_objective = team_size as f64 * policy.min_chats;

    Some(TeamStatistics {
        entries,
        total_bonuses,
        average_bonus: total_bonuses / entries as f64,
        total_chats,
        average_csat,
        csat_rating: CsatRating::from_csat(average_csat),
        total_team_cost,
        average_cost_per_chat: if total_chats > 0.0 {
            total_team_cost / total_chats
        } else {
            0.0
        },
        team_size,
        team_objective,
        goal_achievement: total_chats - team_objective,
        achievement_percentage: if team_objective > 0.0 {
            total_chats / team_objective * 100.0
        } else {
            0.0
        },
    })
}
