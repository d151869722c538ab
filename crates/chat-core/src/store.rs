//! Persistence adapter: maps conversation state onto storage keys.
//!
//! Keys are namespaced by identity so that switching display name leaves
//! the previous user's transcript in place for a later return visit.

use std::rc::Rc;
use chat_types::{Result, identity::Identity, message::Message};
use crate::ports::StoragePort;

pub const DISPLAY_NAME_KEY: &str = "user-name";
pub const HISTORY_KEY_PREFIX: &str = "chat-history-";
pub const SESSION_KEY_PREFIX: &str = "session-id-";

pub fn history_key(identity: &Identity) -> String {
    format!("{}{}", HISTORY_KEY_PREFIX, identity)
}

pub fn session_key(identity: &Identity) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, identity)
}

#[derive(Clone)]
pub struct ChatStore {
    storage: Rc<dyn StoragePort>,
}

impl ChatStore {
    pub fn new(storage: Rc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    // ─── Identity ────────────────────────────────────────────

    pub async fn load_identity(&self) -> Result<Option<Identity>> {
        let raw = self.storage.get(DISPLAY_NAME_KEY).await?;
        Ok(raw.as_deref().and_then(Identity::parse))
    }

    pub async fn save_identity(&self, identity: &Identity) -> Result<()> {
        self.storage.set(DISPLAY_NAME_KEY, identity.as_str()).await
    }

    pub async fn forget_identity(&self) -> Result<()> {
        self.storage.delete(DISPLAY_NAME_KEY).await
    }

    /// Display names that have a stored transcript, sorted.
    pub async fn known_identities(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .storage
            .list_keys(HISTORY_KEY_PREFIX)
            .await?
            .into_iter()
            .filter_map(|k| k.strip_prefix(HISTORY_KEY_PREFIX).map(String::from))
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        Ok(names)
    }

    // ─── Transcript ──────────────────────────────────────────

    /// Load the stored transcript.
    ///
    /// Returns `None` when nothing usable is stored: no key, malformed JSON,
    /// or an empty array. Malformed data is logged, never returned as an error.
    pub async fn load_transcript(&self, identity: &Identity) -> Result<Option<Vec<Message>>> {
        let Some(raw) = self.storage.get(&history_key(identity)).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) if messages.is_empty() => Ok(None),
            Ok(messages) => Ok(Some(messages)),
            Err(e) => {
                log::warn!("Discarding corrupt transcript for {}: {}", identity, e);
                Ok(None)
            }
        }
    }

    pub async fn save_transcript(&self, identity: &Identity, messages: &[Message]) -> Result<()> {
        let json = serde_json::to_string(messages)?;
        self.storage.set(&history_key(identity), &json).await
    }

    // ─── Session id ──────────────────────────────────────────

    pub async fn load_session_id(&self, identity: &Identity) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(&session_key(identity))
            .await?
            .filter(|s| !s.is_empty()))
    }

    pub async fn save_session_id(&self, identity: &Identity, session_id: &str) -> Result<()> {
        self.storage.set(&session_key(identity), session_id).await
    }

    /// Remove the transcript and session id of one identity.
    /// The stored display name is untouched.
    pub async fn clear_conversation(&self, identity: &Identity) -> Result<()> {
        self.storage.delete(&history_key(identity)).await?;
        self.storage.delete(&session_key(identity)).await
    }
}
