use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn neutral() -> f64 {
    5.0
}

/// Psychophysiological state metrics, each on a 0-10 scale.
///
/// A missing field deserializes to the neutral midpoint rather than failing
/// the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMetrics {
    // Neurotransmitters
    #[serde(default = "neutral")]
    pub dopamine: f64,
    #[serde(default = "neutral")]
    pub serotonin: f64,
    #[serde(default = "neutral")]
    pub gaba: f64,
    #[serde(default = "neutral")]
    pub noradrenaline: f64,
    #[serde(default = "neutral")]
    pub cortisol: f64,
    #[serde(default = "neutral")]
    pub testosterone: f64,
    // Cognitive metrics
    #[serde(default = "neutral")]
    pub pfc_activity: f64,
    #[serde(default = "neutral")]
    pub focus: f64,
    #[serde(default = "neutral")]
    pub energy: f64,
    #[serde(default = "neutral")]
    pub motivation: f64,
}

impl Default for StateMetrics {
    fn default() -> Self {
        Self {
            dopamine: 5.0,
            serotonin: 5.0,
            gaba: 5.0,
            noradrenaline: 5.0,
            cortisol: 5.0,
            testosterone: 5.0,
            pfc_activity: 5.0,
            focus: 5.0,
            energy: 5.0,
            motivation: 5.0,
        }
    }
}

/// One immutable snapshot of a user's state.
///
/// History is append-only; the latest record by `created_at` is "current".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: String,
    pub user_id: String,
    pub metrics: StateMetrics,
    #[serde(default)]
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}

impl StateRecord {
    pub fn new(
        user_id: impl Into<String>,
        metrics: StateMetrics,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            metrics,
            analysis: analysis.into(),
            created_at: Utc::now(),
        }
    }
}
