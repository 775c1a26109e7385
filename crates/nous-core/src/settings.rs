use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Application settings loaded from an optional TOML file and environment
/// variables. Secrets (`OPENAI_API_KEY`, `ENCRYPTION_KEY`, `MONGO_URL`) are
/// expected to come from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // MongoDB
    #[serde(default = "default_mongo_url")]
    pub mongo_url: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,

    // OpenAI-compatible LLM endpoint
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default = "default_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_model")]
    pub openai_model: String,
    #[serde(default = "default_model_cheap")]
    pub openai_model_cheap: String,

    // Chat optimization
    /// Max raw turns kept verbatim in model context
    #[serde(default = "default_history_limit")]
    pub chat_history_limit: usize,
    /// History length past which the running summary is due for refresh
    #[serde(default = "default_summarize_after")]
    pub chat_summarize_after: usize,
    #[serde(default = "default_true")]
    pub chat_use_cheap_model_for_summary: bool,

    // Encryption
    #[serde(default = "default_encryption_key")]
    pub encryption_key: String,
}

fn default_mongo_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_db_name() -> String {
    "reflection_diary".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_model_cheap() -> String {
    "gpt-4o-mini".to_string()
}

fn default_history_limit() -> usize {
    10
}

fn default_summarize_after() -> usize {
    6
}

fn default_true() -> bool {
    true
}

fn default_encryption_key() -> String {
    "default-encryption-key-change-in-production".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongo_url: default_mongo_url(),
            db_name: default_db_name(),
            openai_api_key: String::new(),
            openai_base_url: default_base_url(),
            openai_model: default_model(),
            openai_model_cheap: default_model_cheap(),
            chat_history_limit: default_history_limit(),
            chat_summarize_after: default_summarize_after(),
            chat_use_cheap_model_for_summary: default_true(),
            encryption_key: default_encryption_key(),
        }
    }
}

impl Settings {
    /// Load configuration.
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml (optional)
    /// 2. Environment variables (e.g. `OPENAI_API_KEY`, `CHAT_HISTORY_LIMIT`)
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::default().try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Model used for history summarization
    pub fn summary_model(&self) -> &str {
        if self.chat_use_cheap_model_for_summary {
            &self.openai_model_cheap
        } else {
            &self.openai_model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chat_history_limit, 10);
        assert_eq!(settings.chat_summarize_after, 6);
        assert_eq!(settings.openai_base_url, "https://api.openai.com/v1");
        assert!(settings.chat_use_cheap_model_for_summary);
    }

    #[test]
    fn summary_model_switch() {
        let mut settings = Settings::default();
        assert_eq!(settings.summary_model(), "gpt-4o-mini");
        settings.chat_use_cheap_model_for_summary = false;
        assert_eq!(settings.summary_model(), "gpt-4o");
    }
}
