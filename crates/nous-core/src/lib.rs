pub mod analyzer;
pub mod engine;
pub mod error;
pub mod history;
pub mod prompts;
pub mod service;
pub mod settings;
pub mod summarizer;

pub use analyzer::{StateAnalysis, StateAnalyzer};
pub use engine::{strip_checklist_marker, ReflectionEngine, TurnOutput};
pub use error::CoreError;
pub use history::{render_transcript, HistoryOptimizer, OptimizedContext};
pub use service::{turn_to_message, ChatOutcome, ChatPrompt, ReflectionService};
pub use settings::Settings;
pub use summarizer::Summarizer;
