use nous_core::{turn_to_message, ChatPrompt};
use nous_llm::ChatMessage;
use nous_types::ChatTurn;

#[test]
fn prompt_deserializes_with_defaults() {
    let prompt: ChatPrompt = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
    assert_eq!(prompt.message, "hi");
    assert!(prompt.session_id.is_none());
    assert!(prompt.history.is_empty());
    assert!(prompt.history_summary.is_none());
    assert!(!prompt.update_state);
}

#[test]
fn prompt_accepts_wire_history() {
    let prompt: ChatPrompt = serde_json::from_str(
        r#"{
            "message": "and then?",
            "session_id": "s-1",
            "history": [
                {"role": "user", "content": "I slept badly"},
                {"role": "assistant", "content": "What kept you up?"}
            ],
            "update_state": true
        }"#,
    )
    .unwrap();

    assert_eq!(prompt.history.len(), 2);
    assert_eq!(prompt.history[0], ChatMessage::human("I slept badly"));
    assert!(prompt.update_state);
}

#[test]
fn turns_project_onto_wire_roles() {
    let user = ChatTurn::user("hello");
    let assistant = ChatTurn::assistant("hi there");

    assert_eq!(turn_to_message(&user), ChatMessage::human("hello"));
    assert_eq!(turn_to_message(&assistant), ChatMessage::ai("hi there"));
}
