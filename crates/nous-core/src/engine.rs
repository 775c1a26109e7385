use std::sync::Arc;

use anyhow::anyhow;
use nous_llm::{ChatClient, ChatMessage, ChatRequest};

use crate::error::Result;
use crate::history::{HistoryOptimizer, OptimizedContext};
use crate::prompts::{CHECKLIST_MARKER, REFLECTION_SYSTEM_PROMPT};
use crate::summarizer::Summarizer;

/// Result of one reflection turn against the model.
#[derive(Debug, Clone)]
pub struct TurnOutput {
    pub reply: String,
    pub suggest_checklist: bool,
    /// A freshly generated running summary, when one was due and succeeded
    pub refreshed_summary: Option<String>,
}

/// The model-facing turn pipeline: trims history, runs the completion and
/// (when due) the summary refresh, and cleans the reply.
pub struct ReflectionEngine {
    client: Arc<dyn ChatClient>,
    optimizer: HistoryOptimizer,
    summarizer: Summarizer,
    model: String,
}

impl ReflectionEngine {
    pub fn new(
        client: Arc<dyn ChatClient>,
        optimizer: HistoryOptimizer,
        summarizer: Summarizer,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            optimizer,
            summarizer,
            model: model.into(),
        }
    }

    /// Run one turn.
    ///
    /// The completion and the summary refresh are independent and run
    /// concurrently; a refresh failure degrades to "no refresh this turn",
    /// while a completion failure fails the whole turn.
    pub async fn run_turn(
        &self,
        message: &str,
        history: &[ChatMessage],
        standing_summary: Option<&str>,
    ) -> Result<TurnOutput> {
        let OptimizedContext {
            messages: window,
            needs_refresh,
        } = self.optimizer.optimize(history, standing_summary);
        let tail = self.optimizer.tail(history);

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(ChatMessage::system(REFLECTION_SYSTEM_PROMPT));
        messages.extend(window);
        messages.push(ChatMessage::human(message));

        let completion = self
            .client
            .chat(ChatRequest::new(self.model.as_str(), messages));
        let refresh = async {
            if needs_refresh && !tail.is_empty() {
                self.summarizer.summarize(tail).await
            } else {
                None
            }
        };

        let (response, refreshed_summary) = tokio::join!(completion, refresh);
        let response = response?;
        let content = response
            .content
            .ok_or_else(|| anyhow!("Model returned no content"))?;

        let (reply, suggest_checklist) = strip_checklist_marker(&content);
        Ok(TurnOutput {
            reply,
            suggest_checklist,
            refreshed_summary,
        })
    }
}

/// Remove the checklist marker from a reply, reporting whether it was there
pub fn strip_checklist_marker(text: &str) -> (String, bool) {
    let suggest = text.contains(CHECKLIST_MARKER);
    let clean = text.replace(CHECKLIST_MARKER, "").trim().to_string();
    (clean, suggest)
}
