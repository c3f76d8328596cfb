use serde::{Deserialize, Serialize, Serializer};

/// One agent's numbers as read from a helpdesk export.
///
/// `closed_conversations` and `csat_score` are `None` when the cell was empty,
/// the `-` marker, or did not contain a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub name: String,
    #[serde(serialize_with = "serialize_number")]
    pub closed_conversations: Option<f64>,
    #[serde(serialize_with = "serialize_number")]
    pub csat_score: Option<f64>,
}

/// Whole numbers are written without a fractional part (`1234`, not `1234.0`).
fn serialize_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
    match value {
        Some(number) if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(*number as i64))
        }
        Some(number) => serializer.serialize_some(number),
        None => serializer.serialize_none(),
    }
}

impl PerformanceRecord {
    pub fn new(name: impl Into<String>, closed_conversations: Option<f64>, csat_score: Option<f64>) -> Self {
        Self {
            name: name.into(),
            closed_conversations,
            csat_score,
        }
    }

    pub fn has_any_data(&self) -> bool {
        self.closed_conversations.is_some() || self.csat_score.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.closed_conversations.is_some() && self.csat_score.is_some()
    }
}
