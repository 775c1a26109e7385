//! # Nous
//!
//! Core of a personal-reflection journaling service: notes, checklists, a
//! psychophysiological state tracker and an AI chat assistant, stored
//! per-user with server-side field-level encryption.
//!
//! ## Overview
//!
//! - **Encrypt at rest** - every sensitive text field is encrypted before it
//!   reaches the document store and decrypted transparently on read, with a
//!   fail-open fallback for records predating the encryption rollout
//! - **Bound chat cost** - conversations of any length are trimmed to a
//!   fixed context window, with evicted turns folded into a short running
//!   summary generated on a cheaper model
//! - **Track state** - a constrained-JSON model call derives ten bounded
//!   metrics plus a free-text assessment from chat or journal content
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nous::{
//!     Cipher, ChatPrompt, FieldCodec, OpenAIClient, PersistClient,
//!     ReflectionService, Settings,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!
//!     let codec = FieldCodec::new(Cipher::new(&settings.encryption_key));
//!     let persist = Arc::new(
//!         PersistClient::connect(&settings.mongo_url, &settings.db_name, codec).await?,
//!     );
//!     let client = Arc::new(
//!         OpenAIClient::new(settings.openai_api_key.clone())?
//!             .with_base_url(settings.openai_base_url.clone()),
//!     );
//!
//!     let service = ReflectionService::new(client, persist, &settings);
//!     let outcome = service
//!         .send_message(
//!             "user-1",
//!             ChatPrompt {
//!                 message: "I keep replaying yesterday's meeting".to_string(),
//!                 session_id: None,
//!                 history: Vec::new(),
//!                 history_summary: None,
//!                 update_state: false,
//!             },
//!         )
//!         .await?;
//!     println!("{}", outcome.response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Nous is organized into focused crates:
//!
//! - **`nous-types`**: shared entity models
//! - **`nous-crypto`**: cipher and per-entity field codec
//! - **`nous-llm`**: chat-completion client for OpenAI-compatible endpoints
//! - **`nous-persist`**: MongoDB repositories, encrypted on every read/write
//! - **`nous-core`**: history optimization, summarization, state analysis
//!   and the per-turn orchestrator

pub use nous_types::{
    ChatSession, ChatTurn, ChecklistItem, ChecklistSuggestion, ChecklistTemplate, DailyChecklist,
    Note, NoteUpdate, StateMetrics, StateRecord, TurnRole,
};

pub use nous_crypto::{Cipher, CryptoError, DecryptOutcome, FieldCodec};

pub use nous_llm::{
    extract_json, ChatClient, ChatMessage, ChatRequest, ChatResponse, OpenAIClient, TokenUsage,
};

pub use nous_persist::{
    ChecklistRepository, NoteRepository, PersistClient, PersistError, SessionRepository,
    StateRepository, TemplateRepository,
};

pub use nous_core::{
    render_transcript, turn_to_message, ChatOutcome, ChatPrompt, CoreError, HistoryOptimizer,
    OptimizedContext, ReflectionEngine, ReflectionService, Settings, StateAnalysis, StateAnalyzer,
    Summarizer, TurnOutput,
};
