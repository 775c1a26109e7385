use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use nous_llm::{ChatClient, ChatRequest, ChatResponse};

/// What the stub should do when a given model is called
pub enum Scripted {
    Reply(&'static str),
    Fail,
}

/// Scripted [`ChatClient`] keyed by model name, recording every request.
pub struct StubClient {
    responses: HashMap<String, Scripted>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubClient {
    pub fn new(responses: Vec<(&str, Scripted)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(model, scripted)| (model.to_string(), scripted))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All recorded requests addressed to `model`
    #[allow(dead_code)]
    pub fn requests_for(&self, model: &str) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.model == model)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ChatClient for StubClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.responses.get(&request.model) {
            Some(Scripted::Reply(text)) => Ok(ChatResponse {
                content: Some(text.to_string()),
                finish_reason: Some("stop".to_string()),
                usage: None,
            }),
            Some(Scripted::Fail) => anyhow::bail!("scripted transport failure"),
            None => anyhow::bail!("no scripted reply for model {}", request.model),
        }
    }
}
