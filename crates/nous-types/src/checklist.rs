use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single item of a daily checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Reusable checklist template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ChecklistTemplate {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        items: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            items,
            created_at: Utc::now(),
        }
    }
}

/// Checklist for a single day, keyed by `date` in `YYYY-MM-DD` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyChecklist {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub items: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DailyChecklist {
    pub fn new(
        user_id: impl Into<String>,
        date: impl Into<String>,
        items: Vec<ChecklistItem>,
        template_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            date: date.into(),
            items,
            template_id,
            created_at: Utc::now(),
        }
    }
}

/// Model-proposed checklist tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSuggestion {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}
