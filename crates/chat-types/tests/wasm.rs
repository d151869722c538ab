//! WASM-target tests for chat-types.
//!
//! Checks that the JSON shapes the backend sees are stable under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_types::message::*;
use chat_types::task::*;
use chat_types::wire::*;
use chat_types::config::*;

#[wasm_bindgen_test]
fn message_wire_shape() {
    let json = serde_json::to_string(&Message::agent("hi there")).unwrap();
    assert_eq!(json, r#"{"text":"hi there","sender":"alina"}"#);
}

#[wasm_bindgen_test]
fn transcript_roundtrip() {
    let transcript = vec![
        Message::greeting("Sam", "Alina"),
        Message::user("hello"),
        Message::agent("hi there"),
    ];
    let json = serde_json::to_string(&transcript).unwrap();
    let restored: Vec<Message> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, transcript);
}

#[wasm_bindgen_test]
fn chat_reply_without_content() {
    let reply: ChatReply = serde_json::from_str(r#"{"session_id":"abc"}"#).unwrap();
    assert!(reply.content.is_none());
    assert_eq!(reply.session_id.as_deref(), Some("abc"));
}

#[wasm_bindgen_test]
fn task_list_preserves_order() {
    let json = r#"[
        {"id": 3, "type": "a", "status": "failed", "parameters": {}, "created_at": "t", "completed_at": null},
        {"id": 1, "type": "b", "status": "completed", "parameters": {}, "created_at": "t", "completed_at": "t"}
    ]"#;
    let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(tasks[0].status, TaskStatus::Failed);
}

#[wasm_bindgen_test]
fn default_endpoint() {
    let backend = BackendConfig::default();
    assert_eq!(backend.endpoint("archive_chat"), "http://localhost:8000/archive_chat");
}
