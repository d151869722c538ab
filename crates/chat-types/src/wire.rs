//! JSON bodies exchanged with the chat backend.

use serde::{Deserialize, Serialize};
use crate::message::Message;

/// `POST /chat` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub user_input: String,
}

/// `POST /chat` response body. Both fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /archive_chat` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub session_id: String,
    pub transcript: Vec<Message>,
}
