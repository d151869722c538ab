//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).

use async_trait::async_trait;
use chat_types::{
    Result,
    task::Task,
    wire::{ArchiveRequest, ChatReply, ChatRequest},
};

// ─── Storage Port ────────────────────────────────────────────

/// Durable client-side key/value storage holding UTF-8 strings.
#[async_trait(?Send)]
pub trait StoragePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Chat Backend Port ───────────────────────────────────────

/// The remote chat service. Every call is a single attempt.
#[async_trait(?Send)]
pub trait ChatBackendPort {
    /// `POST /chat`
    async fn send_chat(&self, req: ChatRequest) -> Result<ChatReply>;

    /// `POST /archive_chat` — the response body is ignored
    async fn archive_chat(&self, req: ArchiveRequest) -> Result<()>;

    /// `GET /tasks`
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;
}
