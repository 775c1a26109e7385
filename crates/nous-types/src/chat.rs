use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a persisted turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single message in a chat session.
///
/// Turns are immutable once created: they are appended to their session in
/// conversation order and never edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// A chat session owned by one user.
///
/// `running_summary`, when present, digests the prefix of `turns` that has
/// been evicted from the active context window at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub turns: Vec<ChatTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub const DEFAULT_TITLE: &'static str = "New conversation";

    pub fn new(user_id: impl Into<String>, title: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.unwrap_or_else(|| Self::DEFAULT_TITLE.to_string()),
            turns: Vec::new(),
            running_summary: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
        let parsed: TurnRole = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(parsed, TurnRole::User);
    }

    #[test]
    fn session_defaults() {
        let session = ChatSession::new("user-1", None);
        assert_eq!(session.title, ChatSession::DEFAULT_TITLE);
        assert!(session.turns.is_empty());
        assert!(session.running_summary.is_none());
    }

    #[test]
    fn session_summary_omitted_when_absent() {
        let session = ChatSession::new("user-1", Some("Morning pages".to_string()));
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("running_summary").is_none());
    }
}
