//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Tests MemoryStorage, the storage selector, the persistence adapter on top
//! of a real backend, and response parsing under wasm32-unknown-unknown via
//! `wasm-pack test --node`.
//!
//! localStorage needs a browser; those tests live in browser.rs.

use wasm_bindgen_test::*;

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_core::store::ChatStore;
use chat_platform::backend::http::parse_body;
use chat_platform::storage::{open_storage, MemoryStorage};
use chat_types::ChatError;
use chat_types::config::StorageBackendType;
use chat_types::identity::Identity;
use chat_types::message::Message;
use chat_types::task::Task;
use chat_types::wire::ChatReply;

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    assert_eq!(MemoryStorage::new().backend_name(), "memory");
}

#[wasm_bindgen_test]
async fn memory_storage_get_missing() {
    let storage = MemoryStorage::new();
    assert!(storage.get("nonexistent").await.unwrap().is_none());
}

#[wasm_bindgen_test]
async fn memory_storage_set_get_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("key", "v1").await.unwrap();
    storage.set("key", "v2").await.unwrap();
    assert_eq!(storage.get("key").await.unwrap().as_deref(), Some("v2"));
    assert!(storage.exists("key").await.unwrap());
}

#[wasm_bindgen_test]
async fn memory_storage_delete_nonexistent() {
    let storage = MemoryStorage::new();
    storage.delete("nonexistent").await.unwrap();
}

#[wasm_bindgen_test]
async fn memory_storage_list_keys() {
    let storage = MemoryStorage::new();
    storage.set("chat-history-a", "[]").await.unwrap();
    storage.set("chat-history-b", "[]").await.unwrap();
    storage.set("session-id-a", "x").await.unwrap();

    let mut keys = storage.list_keys("chat-history-").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["chat-history-a", "chat-history-b"]);
}

#[wasm_bindgen_test]
fn open_storage_memory() {
    let storage = open_storage(&StorageBackendType::Memory).unwrap();
    assert_eq!(storage.backend_name(), "memory");
}

// ─── ChatStore over MemoryStorage ────────────────────────

#[wasm_bindgen_test]
async fn chat_store_transcript_roundtrip() {
    let store = ChatStore::new(Rc::new(MemoryStorage::new()));
    let sam = Identity::parse("Sam").unwrap();
    let transcript = vec![Message::greeting("Sam", "Alina"), Message::user("hello")];

    store.save_transcript(&sam, &transcript).await.unwrap();
    store.save_session_id(&sam, "abc").await.unwrap();
    assert_eq!(store.load_transcript(&sam).await.unwrap(), Some(transcript));
    assert_eq!(store.load_session_id(&sam).await.unwrap().as_deref(), Some("abc"));

    store.clear_conversation(&sam).await.unwrap();
    assert!(store.load_transcript(&sam).await.unwrap().is_none());
    assert!(store.load_session_id(&sam).await.unwrap().is_none());
}

// ─── Response parsing ────────────────────────────────────

#[wasm_bindgen_test]
fn parse_chat_reply() {
    let reply: ChatReply = parse_body(r#"{"content":"hi there","session_id":"abc"}"#).unwrap();
    assert_eq!(reply.content.as_deref(), Some("hi there"));
    assert_eq!(reply.session_id.as_deref(), Some("abc"));
}

#[wasm_bindgen_test]
fn parse_malformed_reply_is_invalid_response() {
    let err = parse_body::<ChatReply>("<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, ChatError::InvalidResponse(_)));

    let err = parse_body::<ChatReply>(r#"["not","an","object"]"#).unwrap_err();
    assert!(matches!(err, ChatError::InvalidResponse(_)));
}

#[wasm_bindgen_test]
fn parse_task_list() {
    let tasks: Vec<Task> = parse_body(
        r#"[{"id":1,"type":"web_search","status":"completed","parameters":{"query":"q"},
             "created_at":"2026-01-01T00:00:00","completed_at":null}]"#,
    )
    .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].query(), Some("q"));
}

#[wasm_bindgen_test]
async fn chat_store_ignores_corrupt_transcript_left_behind() {
    let storage = MemoryStorage::with_entries([
        ("user-name", "Sam"),
        ("chat-history-Sam", "{not json"),
        ("session-id-Sam", "abc"),
    ]);
    assert_eq!(storage.len(), 3);

    let store = ChatStore::new(Rc::new(storage));
    let sam = store.load_identity().await.unwrap().unwrap();
    assert_eq!(sam.as_str(), "Sam");
    assert!(store.load_transcript(&sam).await.unwrap().is_none());
    assert_eq!(store.load_session_id(&sam).await.unwrap().as_deref(), Some("abc"));
}
