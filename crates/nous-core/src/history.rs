use nous_llm::ChatMessage;

/// Bounds the per-turn cost of the model call as a conversation grows,
/// without losing conversational continuity.
#[derive(Debug, Clone, Copy)]
pub struct HistoryOptimizer {
    window_size: usize,
    refresh_threshold: usize,
}

/// Result of trimming a conversation to the active window.
#[derive(Debug, Clone)]
pub struct OptimizedContext {
    /// Messages to send to the model, at most `window_size + 1` of them
    pub messages: Vec<ChatMessage>,
    /// Whether the running summary is due for regeneration
    pub needs_refresh: bool,
}

impl HistoryOptimizer {
    pub fn new(window_size: usize, refresh_threshold: usize) -> Self {
        Self {
            window_size,
            refresh_threshold,
        }
    }

    /// Trim `history` to the active window, prepending the standing summary
    /// as a synthetic system message when one exists.
    ///
    /// The refresh signal is keyed off total history length, not the growth
    /// since the last summary, so it fires regardless of whether a summary
    /// already exists.
    pub fn optimize(
        &self,
        history: &[ChatMessage],
        standing_summary: Option<&str>,
    ) -> OptimizedContext {
        if history.len() <= self.window_size {
            return OptimizedContext {
                messages: history.to_vec(),
                needs_refresh: false,
            };
        }

        let needs_refresh = history.len() > self.refresh_threshold;
        let window = &history[history.len() - self.window_size..];

        let mut messages = Vec::with_capacity(self.window_size + 1);
        if let Some(summary) = standing_summary {
            messages.push(ChatMessage::system(format!(
                "[Context of past conversation: {}]",
                summary
            )));
        }
        messages.extend_from_slice(window);

        OptimizedContext {
            messages,
            needs_refresh,
        }
    }

    /// Turns older than the active window, candidates for summarization
    pub fn tail<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage] {
        if history.len() <= self.window_size {
            &[]
        } else {
            &history[..history.len() - self.window_size]
        }
    }
}

/// Render messages as a plain `Role: content` transcript
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let label = match message {
                ChatMessage::System { .. } => "System",
                ChatMessage::Human { .. } => "User",
                ChatMessage::AI { .. } => "Assistant",
            };
            format!("{}: {}", label, message.content())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
