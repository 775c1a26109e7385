use std::sync::Arc;

use serde::{Deserialize, Serialize};

use nous_llm::{extract_json, ChatClient, ChatMessage, ChatRequest};
use nous_persist::PersistClient;
use nous_types::{ChatTurn, ChecklistSuggestion, Note, StateRecord, TurnRole};

use crate::analyzer::StateAnalyzer;
use crate::engine::ReflectionEngine;
use crate::error::{CoreError, Result};
use crate::history::{render_transcript, HistoryOptimizer};
use crate::prompts::{CHECKLIST_SUGGESTION_PROMPT, NOTE_SUMMARY_PROMPT};
use crate::settings::Settings;
use crate::summarizer::Summarizer;

/// How many recent notes feed a notes-based state analysis
const NOTES_FOR_ANALYSIS: i64 = 5;

/// One inbound chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatPrompt {
    pub message: String,
    /// When absent the turn is ephemeral and nothing is persisted
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub history_summary: Option<String>,
    #[serde(default)]
    pub update_state: bool,
}

/// Result of one chat turn, plain data for the caller to serialize.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub response: String,
    pub suggest_checklist: bool,
    /// Present only when the running summary was refreshed this turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_summary: Option<String>,
    pub state_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateRecord>,
}

/// Ties the turn pipeline, the state analyzer and storage together. One
/// instance is built at startup and shared by every request handler.
pub struct ReflectionService {
    client: Arc<dyn ChatClient>,
    engine: ReflectionEngine,
    analyzer: StateAnalyzer,
    persist: Arc<PersistClient>,
    model: String,
}

impl ReflectionService {
    pub fn new(
        client: Arc<dyn ChatClient>,
        persist: Arc<PersistClient>,
        settings: &Settings,
    ) -> Self {
        let optimizer =
            HistoryOptimizer::new(settings.chat_history_limit, settings.chat_summarize_after);
        let summarizer = Summarizer::new(client.clone(), settings.summary_model());
        let engine = ReflectionEngine::new(
            client.clone(),
            optimizer,
            summarizer,
            settings.openai_model.clone(),
        );
        let analyzer = StateAnalyzer::new(client.clone(), settings.openai_model.clone());

        Self {
            client,
            engine,
            analyzer,
            persist,
            model: settings.openai_model.clone(),
        }
    }

    /// Handle one chat turn: model reply, optional persistence, optional
    /// state analysis.
    pub async fn send_message(&self, user_id: &str, prompt: ChatPrompt) -> Result<ChatOutcome> {
        let output = self
            .engine
            .run_turn(
                &prompt.message,
                &prompt.history,
                prompt.history_summary.as_deref(),
            )
            .await?;

        if let Some(session_id) = &prompt.session_id {
            let user_turn = ChatTurn::user(prompt.message.clone());
            let assistant_turn = ChatTurn::assistant(output.reply.clone());
            self.persist
                .sessions()
                .append_turns(
                    session_id,
                    user_id,
                    user_turn,
                    assistant_turn,
                    output.refreshed_summary.as_deref(),
                )
                .await?;
        }

        let mut outcome = ChatOutcome {
            response: output.reply,
            suggest_checklist: output.suggest_checklist,
            history_summary: output.refreshed_summary,
            state_updated: false,
            state: None,
        };

        if prompt.update_state {
            // Best-effort side channel: never fatal to the chat reply
            match self.update_state_from_dialog(user_id, &prompt).await {
                Ok(record) => {
                    outcome.state_updated = true;
                    outcome.state = Some(record);
                }
                Err(e) => tracing::error!(error = %e, "State analysis failed"),
            }
        }

        Ok(outcome)
    }

    async fn update_state_from_dialog(
        &self,
        user_id: &str,
        prompt: &ChatPrompt,
    ) -> Result<StateRecord> {
        let mut context = render_transcript(&prompt.history);
        if !context.is_empty() {
            context.push('\n');
        }
        context.push_str(&format!("User: {}", prompt.message));

        let analysis = self
            .analyzer
            .analyze(&context)
            .await?
            .ok_or(CoreError::AnalysisUnavailable)?;

        let record = StateRecord::new(user_id, analysis.metrics, analysis.analysis);
        Ok(self.persist.states().insert_state(record).await?)
    }

    /// Propose checklist tasks from the dialog. Parse failure degrades to an
    /// empty suggestion; transport failure propagates.
    pub async fn suggest_tasks(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChecklistSuggestion> {
        let mut messages = vec![ChatMessage::system(CHECKLIST_SUGGESTION_PROMPT)];
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::human(format!(
            "Latest message: {}\n\nSuggest tasks and return JSON.",
            message
        )));

        let response = self
            .client
            .chat(ChatRequest::new(self.model.as_str(), messages))
            .await
            .map_err(CoreError::Model)?;

        let suggestion = response
            .content
            .as_deref()
            .and_then(extract_json)
            .and_then(|value| serde_json::from_value::<ChecklistSuggestion>(value).ok());

        Ok(suggestion.unwrap_or_else(|| ChecklistSuggestion {
            items: Vec::new(),
            reasoning: "Could not generate suggestions".to_string(),
        }))
    }

    /// Digest a stored session into a new encrypted note.
    pub async fn create_summary_note(&self, user_id: &str, session_id: &str) -> Result<Note> {
        let session = self
            .persist
            .sessions()
            .get_session(session_id, user_id)
            .await?
            .ok_or_else(|| CoreError::SessionNotFound(session_id.to_string()))?;

        if session.turns.len() < 2 {
            return Err(CoreError::NotEnoughTurns);
        }

        let messages: Vec<ChatMessage> = session.turns.iter().map(turn_to_message).collect();
        let dialog = render_transcript(&messages);

        let request = ChatRequest::new(
            self.model.as_str(),
            vec![
                ChatMessage::system(NOTE_SUMMARY_PROMPT),
                ChatMessage::human(format!(
                    "Dialog:\n{}\n\nCreate the digest and return JSON.",
                    dialog
                )),
            ],
        );
        let response = self.client.chat(request).await.map_err(CoreError::Model)?;

        let value = response
            .content
            .as_deref()
            .and_then(extract_json)
            .ok_or(CoreError::SummaryUnavailable)?;

        let title = value
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Conversation digest");
        let content = value
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let note = Note::new(
            user_id,
            format!("✨ {}", title),
            format!("🤖 AI digest of a conversation\n\n{}", content),
        );
        Ok(self.persist.notes().create_note(note).await?)
    }

    /// Analyze the user's state from their most recent notes and persist a
    /// new snapshot.
    pub async fn analyze_state_from_notes(&self, user_id: &str) -> Result<StateRecord> {
        let notes = self
            .persist
            .notes()
            .recent_notes(user_id, NOTES_FOR_ANALYSIS)
            .await?;
        if notes.is_empty() {
            return Err(CoreError::NoNotes);
        }

        let notes_text = notes
            .iter()
            .map(|n| format!("**{}**\n{}", n.title, n.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        let analysis = self
            .analyzer
            .analyze(&format!("The user's journal entries:\n{}", notes_text))
            .await?
            .ok_or(CoreError::AnalysisUnavailable)?;

        let record = StateRecord::new(user_id, analysis.metrics, analysis.analysis);
        Ok(self.persist.states().insert_state(record).await?)
    }
}

/// Project a persisted turn onto the wire format
pub fn turn_to_message(turn: &ChatTurn) -> ChatMessage {
    match turn.role {
        TurnRole::User => ChatMessage::human(turn.content.clone()),
        TurnRole::Assistant => ChatMessage::ai(turn.content.clone()),
    }
}
