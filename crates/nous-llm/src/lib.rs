pub mod json;
pub mod openai;
pub mod traits;
pub mod types;

pub use json::extract_json;
pub use openai::OpenAIClient;
pub use traits::{ChatClient, ChatRequest, ChatResponse, TokenUsage};
pub use types::ChatMessage;
