use std::sync::Arc;

use nous_llm::{ChatClient, ChatMessage, ChatRequest};

use crate::history::render_transcript;
use crate::prompts::HISTORY_SUMMARY_PROMPT;

/// Only the trailing part of the tail transcript is sent to the model.
const TAIL_CHAR_BUDGET: usize = 2000;

/// Collapses evicted conversation turns into a short continuation-preserving
/// digest, on the cheaper model when so configured.
pub struct Summarizer {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl Summarizer {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Produce a digest of the tail, or `None` when there is nothing to do or
    /// the model call fails. A failed refresh never propagates: the caller
    /// keeps the previous standing summary.
    pub async fn summarize(&self, tail: &[ChatMessage]) -> Option<String> {
        if tail.is_empty() {
            return None;
        }

        let transcript = render_transcript(tail);
        let truncated = truncate_to_recent(&transcript, TAIL_CHAR_BUDGET);

        let request = ChatRequest::new(
            self.model.as_str(),
            vec![
                ChatMessage::system(HISTORY_SUMMARY_PROMPT),
                ChatMessage::human(format!("Conversation:\n{}\n\nSummarize it.", truncated)),
            ],
        );

        match self.client.chat(request).await {
            Ok(response) => match response.content {
                Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                _ => {
                    tracing::warn!("Summarizer returned no content");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "History summarization failed");
                None
            }
        }
    }
}

/// Keep at most the trailing `budget` bytes, aligned to a char boundary
fn truncate_to_recent(text: &str, budget: usize) -> &str {
    if text.len() <= budget {
        return text;
    }
    let mut start = text.len() - budget;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_the_recent_end() {
        let text = "a".repeat(3000) + "THE END";
        let truncated = truncate_to_recent(&text, 2000);
        assert_eq!(truncated.len(), 2000);
        assert!(truncated.ends_with("THE END"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "ё".repeat(1500); // 2 bytes each
        let truncated = truncate_to_recent(&text, 2001);
        assert!(truncated.len() <= 2001);
        assert!(truncated.chars().all(|c| c == 'ё'));
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(truncate_to_recent("short", 2000), "short");
    }
}
