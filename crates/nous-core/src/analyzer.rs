use std::sync::Arc;

use nous_llm::{extract_json, ChatClient, ChatMessage, ChatRequest};
use nous_types::StateMetrics;

use crate::prompts::STATE_ANALYSIS_PROMPT;

/// Structured result of a state analysis call.
#[derive(Debug, Clone, PartialEq)]
pub struct StateAnalysis {
    pub metrics: StateMetrics,
    pub analysis: String,
}

/// Derives a psychophysiological snapshot from free text via a
/// constrained-JSON model call.
pub struct StateAnalyzer {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl StateAnalyzer {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Analyze `content`. Transport failures propagate; a reply that does not
    /// contain the expected JSON yields `Ok(None)` - a legitimate outcome,
    /// not an error to retry.
    pub async fn analyze(&self, content: &str) -> anyhow::Result<Option<StateAnalysis>> {
        let request = ChatRequest::new(
            self.model.as_str(),
            vec![
                ChatMessage::system(STATE_ANALYSIS_PROMPT),
                ChatMessage::human(format!("{}\n\nAssess the state and return JSON.", content)),
            ],
        );

        let response = self.client.chat(request).await?;
        let Some(text) = response.content else {
            return Ok(None);
        };
        let Some(value) = extract_json(&text) else {
            tracing::debug!("State analysis reply contained no JSON object");
            return Ok(None);
        };

        // Missing or malformed metric fields fall back to the neutral
        // midpoint instead of failing the whole analysis.
        let metrics = value
            .get("metrics")
            .map(|m| serde_json::from_value::<StateMetrics>(m.clone()).unwrap_or_default())
            .unwrap_or_default();
        let analysis = value
            .get("analysis")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Some(StateAnalysis { metrics, analysis }))
    }
}
