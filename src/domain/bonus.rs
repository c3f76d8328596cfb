use serde::{Deserialize, Serialize};

/// Lower bound of a volume band and the rate paid for every chat inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub rate: f64,
}

pub const DEFAULT_TIERS: [Tier; 6] = [
    Tier { threshold: 500.0, rate: 0.5 },
    Tier { threshold: 600.0, rate: 1.0 },
    Tier { threshold: 700.0, rate: 1.5 },
    Tier { threshold: 800.0, rate: 2.0 },
    Tier { threshold: 900.0, rate: 2.5 },
    Tier { threshold: 1000.0, rate: 3.0 },
];

pub const MIN_CHATS: f64 = 500.0;
pub const MAX_BONUS: f64 = 700.0;
pub const BASE_SALARY: f64 = 3000.0;
pub const CSAT_CUTOFF: f64 = 85.0;
pub const CSAT_TARGET: f64 = 90.0;
pub const CSAT_STEP: f64 = 10.0;

/// Every constant the bonus engine depends on.
///
/// Tiers are kept sorted by strictly increasing threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusPolicy {
    pub min_chats: f64,
    pub max_bonus: f64,
    pub base_salary: f64,
    pub csat_cutoff: f64,
    pub csat_target: f64,
    pub csat_step: f64,
    pub tiers: Vec<Tier>,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            min_chats: MIN_CHATS,
            max_bonus: MAX_BONUS,
            base_salary: BASE_SALARY,
            csat_cutoff: CSAT_CUTOFF,
            csat_target: CSAT_TARGET,
            csat_step: CSAT_STEP,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusBreakdown {
    pub qualified: bool,
    pub volume_bonus: f64,
    pub csat_multiplier: f64,
    /// Amount gained (positive) or lost (negative) through the multiplier.
    pub csat_adjustment: f64,
    pub total_bonus: f64,
    pub is_capped: bool,
    pub cost_per_chat: f64,
    pub total_cost: f64,
}

/// Contribution of a single tier band to the volume bonus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStep {
    pub range: String,
    pub chats_in_tier: f64,
    pub rate: f64,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TierProgress {
    NextMilestone { threshold: f64, rate: f64, chats_remaining: f64 },
    TopTier { rate: f64 },
}
