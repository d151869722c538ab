//! WASM-target tests for chat-core.
//!
//! Runs the synchronous parts (EventBus, Conversation, TaskLogState)
//! under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chat_core::conversation::{Conversation, TurnOutcome};
use chat_core::event_bus::EventBus;
use chat_core::task_log::TaskLogState;
use chat_types::ChatError;
use chat_types::event::ChatEvent;
use chat_types::identity::Identity;
use chat_types::message::Message;
use chat_types::wire::ChatReply;

fn sam_conversation() -> Conversation {
    let mut conv = Conversation::new("Alina");
    conv.load(Identity::parse("Sam").unwrap(), None, None);
    conv
}

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::TasksLoading);
    assert!(bus.has_pending());
    assert_eq!(bus.drain(), vec![ChatEvent::TasksLoading]);
    assert!(!bus.has_pending());
}

#[wasm_bindgen_test]
fn conversation_two_phase_turn() {
    let mut conv = sam_conversation();
    let turn = conv.begin_turn("hello").unwrap();
    assert_eq!(conv.messages().last(), Some(&Message::user("hello")));

    let reply = ChatReply {
        content: Some("hi there".to_string()),
        session_id: Some("abc".to_string()),
    };
    let settlement = conv.settle(turn.epoch, Ok(reply));
    conv.finish_turn();
    assert_eq!(settlement.outcome, TurnOutcome::Replied);
    assert_eq!(conv.messages().last(), Some(&Message::agent("hi there")));
    assert_eq!(conv.session_id(), Some("abc"));
    assert!(!conv.is_pending());
}

#[wasm_bindgen_test]
fn conversation_failure_appends_fallback() {
    let mut conv = sam_conversation();
    let turn = conv.begin_turn("hello").unwrap();
    conv.settle(turn.epoch, Err(ChatError::Network("offline".to_string())));
    assert_eq!(conv.messages().len(), 3);
    assert_eq!(conv.messages()[2], Message::fallback_error());
}

#[wasm_bindgen_test]
fn conversation_blank_input_rejected() {
    let mut conv = sam_conversation();
    assert!(conv.begin_turn("   ").is_none());
    assert_eq!(conv.messages().len(), 1);
}

#[wasm_bindgen_test]
fn task_log_state_variants() {
    assert_eq!(TaskLogState::from_result(Ok(Vec::new())), TaskLogState::Empty);
    let failed = TaskLogState::from_result(Err(ChatError::Http {
        status: 500,
        body: String::new(),
    }));
    assert!(matches!(failed, TaskLogState::Failed(ref m) if m.contains("500")));
}
