#[cfg(test)]
mod tests {
    use crate::message::*;
    use crate::identity::*;
    use crate::task::*;
    use crate::wire::*;
    use crate::event::*;
    use crate::config::*;
    use crate::error::*;

    // ─── Message Tests ───────────────────────────────────────

    #[test]
    fn test_message_user() {
        let msg = Message::user("hello");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "hello");
        assert!(msg.sender.is_user());
    }

    #[test]
    fn test_message_agent_serializes_as_alina() {
        let msg = Message::agent("hi there");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"text":"hi there","sender":"alina"}"#);
    }

    #[test]
    fn test_message_user_serialization() {
        let json = serde_json::to_string(&Message::user("hello")).unwrap();
        assert_eq!(json, r#"{"text":"hello","sender":"user"}"#);
    }

    #[test]
    fn test_sender_accepts_agent_alias() {
        let msg: Message = serde_json::from_str(r#"{"text":"x","sender":"agent"}"#).unwrap();
        assert_eq!(msg.sender, Sender::Agent);
    }

    #[test]
    fn test_sender_rejects_unknown() {
        let result = serde_json::from_str::<Message>(r#"{"text":"x","sender":"bot"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_greeting_mentions_both_names() {
        let msg = Message::greeting("Sam", "Alina");
        assert_eq!(msg.sender, Sender::Agent);
        assert!(msg.text.contains("Sam"));
        assert!(msg.text.contains("Alina"));
    }

    #[test]
    fn test_fallback_error() {
        let msg = Message::fallback_error();
        assert_eq!(msg.sender, Sender::Agent);
        assert_eq!(msg.text, FALLBACK_ERROR_TEXT);
    }

    // ─── Identity Tests ──────────────────────────────────────

    #[test]
    fn test_identity_trims() {
        let id = Identity::parse("  Sam \n").unwrap();
        assert_eq!(id.as_str(), "Sam");
        assert_eq!(id.to_string(), "Sam");
    }

    #[test]
    fn test_identity_rejects_blank() {
        assert!(Identity::parse("").is_none());
        assert!(Identity::parse("   \t").is_none());
    }

    #[test]
    fn test_identity_serializes_as_plain_string() {
        let id = Identity::parse("Sam").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""Sam""#);
    }

    // ─── Task Tests ──────────────────────────────────────────

    #[test]
    fn test_task_deserialization() {
        let json = r#"{
            "id": 7,
            "type": "web_search",
            "status": "completed",
            "parameters": {"query": "rust wasm"},
            "created_at": "2026-01-01T10:00:00",
            "completed_at": "2026-01-01T10:00:05"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.kind, "web_search");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.query(), Some("rust wasm"));
        assert_eq!(task.completed_at.as_deref(), Some("2026-01-01T10:00:05"));
    }

    #[test]
    fn test_task_null_completed_and_missing_parameters() {
        let json = r#"{
            "id": 1,
            "type": "summarize",
            "status": "in_progress",
            "created_at": "2026-01-01T10:00:00",
            "completed_at": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.completed_at.is_none());
        assert!(task.query().is_none());
    }

    #[test]
    fn test_task_status_unknown_is_kept() {
        let status: TaskStatus = serde_json::from_str(r#""queued""#).unwrap();
        assert_eq!(status, TaskStatus::Other("queued".to_string()));
        assert_eq!(status.label(), "queued");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""queued""#);
    }

    #[test]
    fn test_task_status_labels() {
        assert_eq!(TaskStatus::Completed.label(), "Completed");
        assert_eq!(TaskStatus::InProgress.label(), "In progress");
        assert_eq!(TaskStatus::Failed.label(), "Failed");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
    }

    #[test]
    fn test_format_timestamp_naive() {
        assert_eq!(format_timestamp("2026-03-04T05:06:07.123456"), "2026-03-04 05:06:07");
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        assert_eq!(format_timestamp("2026-03-04T05:06:07Z"), "2026-03-04 05:06:07");
    }

    #[test]
    fn test_format_timestamp_unparseable_passthrough() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    // ─── Wire Tests ──────────────────────────────────────────

    #[test]
    fn test_chat_request_shape() {
        let req = ChatRequest {
            user_id: "Sam".to_string(),
            user_input: "hello".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["user_id"], "Sam");
        assert_eq!(json["user_input"], "hello");
    }

    #[test]
    fn test_chat_reply_fields_optional() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.content.is_none());
        assert!(reply.session_id.is_none());

        let reply: ChatReply =
            serde_json::from_str(r#"{"content":"hi there","session_id":"abc"}"#).unwrap();
        assert_eq!(reply.content.as_deref(), Some("hi there"));
        assert_eq!(reply.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_archive_request_shape() {
        let req = ArchiveRequest {
            session_id: "abc".to_string(),
            transcript: vec![Message::agent("hi"), Message::user("yo")],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json["transcript"][0]["sender"], "alina");
        assert_eq!(json["transcript"][1]["sender"], "user");
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_chat_event_serialization() {
        let event = ChatEvent::MessageAppended { message: Message::user("hey") };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("MessageAppended"));
        assert!(json.contains("hey"));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.storage.backend, StorageBackendType::Auto);
        assert_eq!(config.assistant_name, "Alina");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = ClientConfig::default();
        config.backend.base_url = "https://chat.example.com".to_string();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let mut backend = BackendConfig::default();
        backend.base_url = "https://chat.example.com/api/".to_string();
        assert_eq!(backend.endpoint("/chat"), "https://chat.example.com/api/chat");
        assert_eq!(backend.endpoint("tasks"), "https://chat.example.com/api/tasks");
    }

    #[test]
    fn test_endpoint_empty_base_is_same_origin() {
        let backend = BackendConfig { base_url: String::new() };
        assert_eq!(backend.endpoint("chat"), "/chat");
    }

    #[test]
    fn test_storage_backend_labels() {
        assert_eq!(StorageBackendType::all().len(), 3);
        assert_eq!(StorageBackendType::Auto.label(), "Auto");
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = ChatError::Http { status: 500, body: "boom".to_string() };
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = ChatError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");

        let err = ChatError::InvalidResponse("missing field".to_string());
        assert_eq!(err.to_string(), "Invalid response: missing field");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{{invalid}}").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }
}
