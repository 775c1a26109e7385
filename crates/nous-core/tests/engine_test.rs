mod common;

use std::sync::Arc;

use common::{Scripted, StubClient};
use nous_core::{HistoryOptimizer, ReflectionEngine, Summarizer};
use nous_llm::ChatMessage;

const PRIMARY: &str = "primary-model";
const CHEAP: &str = "cheap-model";

fn history(len: usize) -> Vec<ChatMessage> {
    (0..len)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::human(format!("turn-{}", i))
            } else {
                ChatMessage::ai(format!("turn-{}", i))
            }
        })
        .collect()
}

fn engine(client: Arc<StubClient>) -> ReflectionEngine {
    let optimizer = HistoryOptimizer::new(10, 6);
    let summarizer = Summarizer::new(client.clone(), CHEAP);
    ReflectionEngine::new(client, optimizer, summarizer, PRIMARY)
}

#[tokio::test]
async fn long_conversation_trims_context_and_refreshes_summary() {
    let client = Arc::new(StubClient::new(vec![
        (PRIMARY, Scripted::Reply("Take a short walk. [SUGGEST_CHECKLIST]")),
        (CHEAP, Scripted::Reply("They covered sleep and stress.")),
    ]));
    let engine = engine(client.clone());

    let output = engine
        .run_turn("what now?", &history(15), None)
        .await
        .unwrap();

    assert_eq!(output.reply, "Take a short walk.");
    assert!(output.suggest_checklist);
    assert_eq!(
        output.refreshed_summary.as_deref(),
        Some("They covered sleep and stress.")
    );

    // system prompt + 10-turn window + the new user message
    let requests = client.requests_for(PRIMARY);
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages.len(), 12);
    assert!(messages[0].is_system());
    assert!(!messages[1].is_system());
    assert_eq!(messages[1].content(), "turn-5");
    assert_eq!(messages[11].content(), "what now?");

    // the summarizer saw the evicted tail, not the window
    let summary_requests = client.requests_for(CHEAP);
    assert_eq!(summary_requests.len(), 1);
    let transcript = summary_requests[0].messages[1].content();
    assert!(transcript.contains("turn-0"));
    assert!(transcript.contains("turn-4"));
    assert!(!transcript.contains("turn-5"));
}

#[tokio::test]
async fn short_conversation_passes_through_without_summarization() {
    let client = Arc::new(StubClient::new(vec![(
        PRIMARY,
        Scripted::Reply("How did that feel?"),
    )]));
    let engine = engine(client.clone());

    let output = engine.run_turn("hello", &history(4), None).await.unwrap();

    assert_eq!(output.reply, "How did that feel?");
    assert!(!output.suggest_checklist);
    assert!(output.refreshed_summary.is_none());
    assert!(client.requests_for(CHEAP).is_empty());

    let messages = &client.requests_for(PRIMARY)[0].messages;
    assert_eq!(messages.len(), 6); // system + 4 turns + user message
}

#[tokio::test]
async fn standing_summary_is_sent_ahead_of_the_window() {
    let client = Arc::new(StubClient::new(vec![
        (PRIMARY, Scripted::Reply("Go on.")),
        (CHEAP, Scripted::Reply("fresh digest")),
    ]));
    let engine = engine(client.clone());

    engine
        .run_turn("more", &history(15), Some("earlier digest"))
        .await
        .unwrap();

    let messages = &client.requests_for(PRIMARY)[0].messages;
    assert_eq!(messages.len(), 13);
    assert!(messages[1].is_system());
    assert!(messages[1]
        .content()
        .contains("[Context of past conversation: earlier digest]"));
}

#[tokio::test]
async fn summarizer_failure_degrades_to_no_refresh() {
    let client = Arc::new(StubClient::new(vec![
        (PRIMARY, Scripted::Reply("Still here for you.")),
        (CHEAP, Scripted::Fail),
    ]));
    let engine = engine(client.clone());

    let output = engine
        .run_turn("go on", &history(15), Some("old digest"))
        .await
        .unwrap();

    assert_eq!(output.reply, "Still here for you.");
    assert!(output.refreshed_summary.is_none());
}

#[tokio::test]
async fn completion_failure_fails_the_turn() {
    let client = Arc::new(StubClient::new(vec![
        (PRIMARY, Scripted::Fail),
        (CHEAP, Scripted::Reply("digest")),
    ]));
    let engine = engine(client.clone());

    let result = engine.run_turn("hello", &history(15), None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn no_refresh_while_history_fits_the_window() {
    let client = Arc::new(StubClient::new(vec![(
        PRIMARY,
        Scripted::Reply("Tell me more."),
    )]));
    let engine = engine(client.clone());

    // Past the refresh threshold but within the window: nothing to fold in
    let output = engine.run_turn("hm", &history(8), None).await.unwrap();
    assert!(output.refreshed_summary.is_none());
    assert!(client.requests_for(CHEAP).is_empty());
}
