use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::bonus::{BonusPolicy, Tier};

#[derive(Error, Debug)]
pub enum PolicyYamlError {
    #[error("failed to read policy yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse policy yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("policy must define at least one tier")]
    NoTiers,
    #[error("tier thresholds must be strictly increasing ({previous} then {current})")]
    UnorderedTiers { previous: f64, current: f64 },
    #[error("tier rate must not be negative: {0}")]
    NegativeRate(f64),
    #[error("csat_step must be greater than zero")]
    InvalidCsatStep,
}

/// Every key is optional; missing keys keep the default policy value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyRecord {
    min_chats: Option<f64>,
    max_bonus: Option<f64>,
    base_salary: Option<f64>,
    csat_cutoff: Option<f64>,
    csat_target: Option<f64>,
    csat_step: Option<f64>,
    tiers: Option<Vec<TierRecord>>,
}

#[derive(Debug, Deserialize)]
struct TierRecord {
    threshold: f64,
    rate: f64,
}

pub fn load_policy_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<BonusPolicy, PolicyYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_policy_from_yaml_str(&contents)
}

pub fn deserialize_policy_from_yaml_str(input: &str) -> Result<BonusPolicy, PolicyYamlError> {
    let record: PolicyRecord = serde_yaml::from_str(input)?;
    let defaults = BonusPolicy::default();

    let policy = BonusPolicy {
        min_chats: record.min_chats.unwrap_or(defaults.min_chats),
        max_bonus: record.max_bonus.unwrap_or(defaults.max_bonus),
        base_salary: record.base_salary.unwrap_or(defaults.base_salary),
        csat_cutoff: record.csat_cutoff.unwrap_or(defaults.csat_cutoff),
        csat_target: record.csat_target.unwrap_or(defaults.csat_target),
        csat_step: record.csat_step.unwrap_or(defaults.csat_step),
        tiers: match record.tiers {
            Some(tiers) => tiers
                .into_iter()
                .map(|tier| Tier {
                    threshold: tier.threshold,
                    rate: tier.rate,
                })
                .collect(),
            None => defaults.tiers,
        },
    };
    validate_policy(&policy)?;
    Ok(policy)
}

pub fn validate_policy(policy: &BonusPolicy) -> Result<(), PolicyYamlError> {
    if policy.tiers.is_empty() {
        return Err(PolicyYamlError::NoTiers);
    }
    for pair in policy.tiers.windows(2) {
        if pair[1].threshold <= pair[0].threshold {
            return Err(PolicyYamlError::UnorderedTiers {
                previous: pair[0].threshold,
                current: pair[1].threshold,
            });
        }
    }
    if let Some(tier) = policy.tiers.iter().find(|tier| tier.rate < 0.0) {
        return Err(PolicyYamlError::NegativeRate(tier.rate));
    }
    if policy.csat_step <= 0.0 {
        return Err(PolicyYamlError::InvalidCsatStep);
    }
    Ok(())
}
