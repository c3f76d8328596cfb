use crate::domain::bonus::{BonusBreakdown, BonusPolicy, TierProgress, TierStep};
use crate::domain::history::StoredResult;
use crate::services::intercom_csv::IngestSummary;
use crate::services::podium::PodiumEntry;
use crate::services::team_statistics::TeamStatistics;

pub fn format_breakdown(
    name: &str,
    chats: f64,
    csat: f64,
    breakdown: &BonusBreakdown,
    steps: &[TierStep],
    policy: &BonusPolicy,
) -> String {
    let agent = if name.trim().is_empty() { "Agent" } else { name.trim() };

    let mut lines = Vec::new();
    lines.push(format!("Bonus Breakdown: {agent}"));
    lines.push(format!("Closed chats: {chats}"));
    lines.push(format!("CSAT: {csat}%"));
    lines.push(String::new());

    if !breakdown.qualified {
        lines.push("Not qualified this month".to_string());
        lines.push(format!("Minimum: {} closed chats required", policy.min_chats));
    } else {
        lines.push("Volume bonus:".to_string());
        for step in steps {
            lines.push(format!(
                "  {range}: {chats} chats x EUR {rate:.2}/chat = EUR {bonus:.2}",
                range = step.range,
                chats = step.chats_in_tier,
                rate = step.rate,
                bonus = step.bonus
            ));
        }
        lines.push(format!("  Total: EUR {:.2}", breakdown.volume_bonus));
        if csat <= policy.csat_cutoff {
            lines.push(format!(
                "CSAT multiplier: 0.00x (CSAT {csat}% <= {}% threshold)",
                policy.csat_cutoff
            ));
        } else {
            lines.push(format!(
                "CSAT multiplier: 1 - (({} - {csat}) / {}) = {:.2}x",
                policy.csat_target, policy.csat_step, breakdown.csat_multiplier
            ));
            let sign = if breakdown.csat_adjustment >= 0.0 { "+" } else { "-" };
            lines.push(format!(
                "CSAT adjustment: {sign}EUR {:.2}",
                breakdown.csat_adjustment.abs()
            ));
        }
        let cap_note = if breakdown.is_capped {
            format!(" (capped at EUR {:.2})", policy.max_bonus)
        } else {
            String::new()
        };
        lines.push(format!("Total bonus: EUR {:.2}{cap_note}", breakdown.total_bonus));
    }

    lines.push(format!("Total cost: EUR {:.2}", breakdown.total_cost));
    lines.push(format!("Cost per chat: EUR {:.2}", breakdown.cost_per_chat));
    lines.join("\n")
}

pub fn format_tier_progress(progress: &TierProgress) -> String {
    match progress {
        TierProgress::NextMilestone {
            threshold,
            rate,
            chats_remaining,
        } => format!("{chats_remaining} chats to {threshold} (EUR {rate:.2}/chat)"),
        TierProgress::TopTier { rate } => format!("Maximum tier reached! EUR {rate:.2}/chat"),
    }
}

pub fn format_ingest_summary(summary: &IngestSummary) -> String {
    let share = |count: usize| {
        if summary.retained == 0 {
            0.0
        } else {
            count as f64 / summary.retained as f64 * 100.0
        }
    };

    let mut lines = Vec::new();
    lines.push("Summary:".to_string());
    lines.push(format!("  Rows read: {}", summary.rows_read));
    lines.push(format!("  Records retained: {}", summary.retained));
    lines.push(format!(
        "  Rows skipped: {} (summary: {}, no name: {}, inactive: {}, too few columns: {}, no valid data: {})",
        summary.skipped(),
        summary.skipped_summary,
        summary.skipped_missing_name,
        summary.skipped_inactive,
        summary.skipped_insufficient_columns,
        summary.skipped_no_valid_data
    ));
    lines.push(format!(
        "  With chat data: {} ({:.1}%)",
        summary.with_chats,
        share(summary.with_chats)
    ));
    lines.push(format!(
        "  With CSAT data: {} ({:.1}%)",
        summary.with_csat,
        share(summary.with_csat)
    ));
    lines.push(format!(
        "  Complete records: {} ({:.1}%)",
        summary.complete,
        share(summary.complete)
    ));
    lines.push(format!("  Partial records: {}", summary.partial));
    if let Some(average) = summary.average_conversations {
        lines.push(format!("  Avg conversations: {average:.0}"));
    }
    if let Some(average) = summary.average_csat {
        lines.push(format!("  Avg CSAT: {average:.1}%"));
    }
    lines.join("\n")
}

pub fn format_history(results: &[StoredResult]) -> String {
    let mut lines = Vec::new();
    lines.push("Date | Agent | Chats | CSAT | Bonus | Cost per chat".to_string());
    lines.push("-----|-------|-------|------|-------|--------------".to_string());
    for result in results {
        let agent = if result.has_agent_name() {
            result.agent_name.as_str()
        } else {
            "-"
        };
        lines.push(format!(
            "{date} | {agent} | {chats} | {csat:.1}% | EUR {bonus:.2} | EUR {cost:.2}",
            date = result.date.format("%Y-%m-%d"),
            chats = result.closed_chats,
            csat = result.csat,
            bonus = result.bonus,
            cost = result.cost_per_chat
        ));
    }
    lines.join("\n")
}

pub fn format_team_statistics(stats: &TeamStatistics) -> String {
    let sign = if stats.goal_achievement >= 0.0 { "+" } else { "" };

    let mut lines = Vec::new();
    lines.push("Team Statistics".to_string());
    lines.push(format!("Calculations: {}", stats.entries));
    lines.push(format!("Team members: {}", stats.team_size));
    lines.push(format!("Total bonuses: EUR {:.2}", stats.total_bonuses));
    lines.push(format!("Average bonus: EUR {:.2}", stats.average_bonus));
    lines.push(format!("Total chats: {}", stats.total_chats));
    lines.push(format!(
        "Average CSAT: {:.1}% ({})",
        stats.average_csat,
        stats.csat_rating.label()
    ));
    lines.push(format!("Total team cost: EUR {:.2}", stats.total_team_cost));
    lines.push(format!("Average cost per chat: EUR {:.2}", stats.average_cost_per_chat));
    lines.push(format!("Team objective: {} chats", stats.team_objective));
    lines.push(format!(
        "Goal achievement: {sign}{} chats ({:.1}% of goal)",
        stats.goal_achievement, stats.achievement_percentage
    ));
    lines.join("\n")
}

pub fn format_podium(entries: &[PodiumEntry]) -> String {
    let mut lines = Vec::new();
    lines.push("Top Performers".to_string());
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{place}. {name} - {chats} chats - {csat:.1}% CSAT (score {score:.0})",
            place = idx + 1,
            name = entry.name,
            chats = entry.total_chats,
            csat = entry.average_csat,
            score = entry.performance_score
        ));
    }
    lines.join("\n")
}
