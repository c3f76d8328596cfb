use once_cell::sync::Lazy;

use crate::domain::bonus::{BonusBreakdown, BonusPolicy, Tier, TierProgress, TierStep};

static DEFAULT_POLICY: Lazy<BonusPolicy> = Lazy::new(BonusPolicy::default);

/// Computes the bonus breakdown with the default policy.
pub fn compute_bonus(closed_conversations: Option<f64>, csat_score: Option<f64>) -> BonusBreakdown {
    BonusCalculator::new(&DEFAULT_POLICY).compute(closed_conversations, csat_score)
}

/// Tiered bonus engine bound to a policy.
///
/// The calculator does not validate its inputs. Negative chat counts or CSAT
/// values above 100 produce numerically meaningless results instead of errors,
/// so callers are expected to reject them first.
#[derive(Debug, Clone, Copy)]
pub struct BonusCalculator<'a> {
    policy: &'a BonusPolicy,
}

impl<'a> BonusCalculator<'a> {
    pub fn new(policy: &'a BonusPolicy) -> Self {
        Self { policy }
    }

    /// Both values must be present and the volume must reach `min_chats`.
    /// CSAT has no minimum here; it only drives the multiplier.
    pub fn qualifies(&self, closed_conversations: Option<f64>, csat_score: Option<f64>) -> bool {
        matches!(
            (closed_conversations, csat_score),
            (Some(chats), Some(_)) if chats >= self.policy.min_chats
        )
    }

    pub fn compute(&self, closed_conversations: Option<f64>, csat_score: Option<f64>) -> BonusBreakdown {
        let chats = closed_conversations.unwrap_or(0.0);

        let (volume_bonus, csat_multiplier, total_bonus, is_capped) =
            match (closed_conversations, csat_score) {
                (Some(chats), Some(csat)) if self.qualifies(closed_conversations, csat_score) => {
                    let volume_bonus = self.volume_bonus(chats);
                    let multiplier = self.csat_multiplier(csat);
                    let uncapped = volume_bonus * multiplier;
                    let total_bonus = uncapped.min(self.policy.max_bonus);
                    let is_capped = uncapped > self.policy.max_bonus && volume_bonus > 0.0;
                    (volume_bonus, multiplier, total_bonus, is_capped)
                }
                _ => (0.0, 0.0, 0.0, false),
            };

        let total_cost = self.policy.base_salary + total_bonus;
        let cost_per_chat = if chats > 0.0 { total_cost / chats } else { 0.0 };

        BonusBreakdown {
            qualified: self.qualifies(closed_conversations, csat_score),
            volume_bonus,
            csat_multiplier,
            csat_adjustment: volume_bonus * (csat_multiplier - 1.0),
            total_bonus,
            is_capped,
            cost_per_chat,
            total_cost,
        }
    }

    /// Marginal-rate accumulation over the tier table.
    pub fn volume_bonus(&self, chats: f64) -> f64 {
        tier_bands(&self.policy.tiers, chats)
            .map(|(tier, _, chats_in_tier)| chats_in_tier * tier.rate)
            .sum()
    }

    /// Zero at or below the cutoff, otherwise linear around the target.
    /// Not clamped above 1.0; only the total bonus is capped.
    pub fn csat_multiplier(&self, csat: f64) -> f64 {
        if csat <= self.policy.csat_cutoff {
            return 0.0;
        }
        (1.0 - (self.policy.csat_target - csat) / self.policy.csat_step).max(0.0)
    }

    pub fn tier_steps(&self, chats: f64) -> Vec<TierStep> {
        tier_bands(&self.policy.tiers, chats)
            .filter(|(_, _, chats_in_tier)| *chats_in_tier > 0.0)
            .map(|(tier, next, chats_in_tier)| TierStep {
                range: match next {
                    Some(next) => format!("{}-{}", tier.threshold, next.threshold - 1.0),
                    None => format!("{}+", tier.threshold),
                },
                chats_in_tier,
                rate: tier.rate,
                bonus: chats_in_tier * tier.rate,
            })
            .collect()
    }

    pub fn tier_progress(&self, chats: f64) -> Option<TierProgress> {
        let tiers = &self.policy.tiers;
        let last = tiers.last()?;
        let progress = match tiers.iter().find(|tier| chats < tier.threshold) {
            Some(next) => TierProgress::NextMilestone {
                threshold: next.threshold,
                rate: next.rate,
                chats_remaining: next.threshold - chats,
            },
            None => TierProgress::TopTier { rate: last.rate },
        };
        Some(progress)
    }
}

/// Yields `(tier, next_tier, chats_in_tier)` for every tier the volume reached.
fn tier_bands(tiers: &[Tier], chats: f64) -> impl Iterator<Item = (&Tier, Option<&Tier>, f64)> {
    tiers
        .iter()
        .enumerate()
        .filter(move |(_, tier)| chats >= tier.threshold)
        .map(move |(idx, tier)| {
            let next = tiers.get(idx + 1);
            let chats_in_tier = match next {
                Some(next) => chats.min(next.threshold) - tier.threshold,
                None => chats - tier.threshold,
            };
            (tier, next, chats_in_tier)
        })
}
