//! HTTP adapter for the chat backend.
//!
//! Uses browser `fetch()` via gloo-net. One attempt per call: no retry,
//! no timeout, no cancellation.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use chat_core::ports::ChatBackendPort;
use chat_types::{
    ChatError, Result,
    config::BackendConfig,
    task::Task,
    wire::{ArchiveRequest, ChatReply, ChatRequest},
};

pub struct HttpChatBackend {
    config: BackendConfig,
}

impl HttpChatBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait(?Send)]
impl ChatBackendPort for HttpChatBackend {
    async fn send_chat(&self, req: ChatRequest) -> Result<ChatReply> {
        let url = self.config.endpoint("chat");
        let response = Request::post(&url)
            .json(&req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        read_json(ensure_success(response).await?).await
    }

    async fn archive_chat(&self, req: ArchiveRequest) -> Result<()> {
        let url = self.config.endpoint("archive_chat");
        let response = Request::post(&url)
            .json(&req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let url = self.config.endpoint("tasks");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        read_json(ensure_success(response).await?).await
    }
}

/// Turn a non-2xx response into [`ChatError::Http`], keeping the body for the message.
async fn ensure_success(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => response.status_text(),
    };
    Err(ChatError::Http { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response
        .text()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;
    parse_body(&text)
}

/// Parse a response body; anything that is not the expected shape is
/// [`ChatError::InvalidResponse`].
pub fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| ChatError::InvalidResponse(e.to_string()))
}
