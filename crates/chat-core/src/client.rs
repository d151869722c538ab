//! Chat client — drives the conversation through the backend and storage ports.
//!
//! All methods take `&self` so the client can sit in an `Rc` shared between
//! the UI and futures spawned with `wasm_bindgen_futures::spawn_local`.
//! No `RefCell` borrow is ever held across an `.await`.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use chat_types::{
    ChatError, Result,
    event::ChatEvent,
    identity::Identity,
};
use crate::conversation::{Conversation, TurnOutcome};
use crate::event_bus::EventBus;
use crate::ports::ChatBackendPort;
use crate::store::ChatStore;
use crate::task_log::{self, TaskLogState};

pub struct ChatClient {
    conversation: RefCell<Conversation>,
    store: ChatStore,
    backend: RefCell<Rc<dyn ChatBackendPort>>,
    event_bus: EventBus,
    turn_counter: Cell<u64>,
    /// A "new chat" is between its archival request and the reset
    resetting: Cell<bool>,
}

/// Clears the pending flag and announces the end of a turn when dropped,
/// whichever way the turn finished.
struct PendingGuard<'a> {
    client: &'a ChatClient,
    turn_id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.client.conversation.borrow_mut().finish_turn();
        self.client.event_bus.emit(ChatEvent::TurnEnd { turn_id: self.turn_id });
    }
}

/// Ends a "new chat" however it finished.
struct ResetGuard<'a> {
    client: &'a ChatClient,
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        self.client.resetting.set(false);
        self.client.event_bus.emit(ChatEvent::ResetEnd);
    }
}

impl ChatClient {
    pub fn new(
        store: ChatStore,
        backend: Rc<dyn ChatBackendPort>,
        event_bus: EventBus,
        assistant_name: &str,
    ) -> Self {
        Self {
            conversation: RefCell::new(Conversation::new(assistant_name)),
            store,
            backend: RefCell::new(backend),
            event_bus,
            turn_counter: Cell::new(0),
            resetting: Cell::new(false),
        }
    }

    /// Read-only view of the current conversation.
    pub fn conversation(&self) -> Ref<'_, Conversation> {
        self.conversation.borrow()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn is_resetting(&self) -> bool {
        self.resetting.get()
    }

    /// Swap the backend, e.g. after the base URL changed. A request already
    /// in flight finishes against the old one.
    pub fn set_backend(&self, backend: Rc<dyn ChatBackendPort>) {
        *self.backend.borrow_mut() = backend;
    }

    /// Used by greetings created from now on.
    pub fn set_assistant_name(&self, name: &str) {
        self.conversation.borrow_mut().set_assistant_name(name);
    }

    fn backend(&self) -> Rc<dyn ChatBackendPort> {
        self.backend.borrow().clone()
    }

    // ─── Identity ────────────────────────────────────────────

    /// Resolve the stored display name and restore its conversation.
    /// Without one, emits [`ChatEvent::IdentityRequired`] and returns `None`.
    pub async fn restore(&self) -> Option<Identity> {
        let stored = self.store.load_identity().await.unwrap_or_else(|e| {
            log::warn!("Could not read display name: {}", e);
            None
        });

        match stored {
            Some(identity) => {
                log::info!("Restoring conversation for {}", identity);
                self.load_conversation(identity.clone()).await;
                Some(identity)
            }
            None => {
                self.event_bus.emit(ChatEvent::IdentityRequired);
                None
            }
        }
    }

    /// Set (or switch to) a display name. The previous name's stored data is
    /// left alone; the new name gets its own stored conversation, or a greeting.
    pub async fn sign_in(&self, raw_name: &str) -> Result<Identity> {
        let identity = Identity::parse(raw_name)
            .ok_or_else(|| ChatError::Config("Display name must not be empty".to_string()))?;

        self.store.save_identity(&identity).await?;
        self.load_conversation(identity.clone()).await;
        Ok(identity)
    }

    /// Forget the stored display name and lock chat behind the name prompt.
    pub async fn sign_out(&self) -> Result<()> {
        self.store.forget_identity().await?;
        self.conversation.borrow_mut().clear_identity();
        self.event_bus.emit(ChatEvent::IdentityRequired);
        Ok(())
    }

    /// Display names that have a stored transcript on this device.
    pub async fn known_identities(&self) -> Vec<String> {
        self.store.known_identities().await.unwrap_or_else(|e| {
            log::warn!("Could not list stored conversations: {}", e);
            Vec::new()
        })
    }

    async fn load_conversation(&self, identity: Identity) {
        let stored = self.store.load_transcript(&identity).await.unwrap_or_else(|e| {
            log::warn!("Could not read transcript for {}: {}", identity, e);
            None
        });
        let restored = stored.is_some();
        let session_id = self.store.load_session_id(&identity).await.unwrap_or_else(|e| {
            log::warn!("Could not read session id for {}: {}", identity, e);
            None
        });

        self.conversation
            .borrow_mut()
            .load(identity, stored, session_id);
        self.emit_loaded();

        if !restored {
            self.persist().await;
        }
    }

    fn emit_loaded(&self) {
        let event = {
            let conv = self.conversation.borrow();
            let Some(identity) = conv.identity() else {
                return;
            };
            ChatEvent::ConversationLoaded {
                identity: identity.to_string(),
                messages: conv.messages().to_vec(),
                session_id: conv.session_id().map(String::from),
            }
        };
        self.event_bus.emit(event);
    }

    // ─── Chat turn ───────────────────────────────────────────

    /// Send one user utterance.
    ///
    /// The user's message is appended before the first `.await`. Blank input,
    /// a turn already in flight or a "new chat" in progress is rejected
    /// without any side effect.
    pub async fn send(&self, input: &str) -> TurnOutcome {
        if self.resetting.get() {
            return TurnOutcome::Rejected;
        }
        let Some(turn) = self.conversation.borrow_mut().begin_turn(input) else {
            return TurnOutcome::Rejected;
        };

        let turn_id = self.turn_counter.get() + 1;
        self.turn_counter.set(turn_id);
        self.event_bus.emit(ChatEvent::MessageAppended {
            message: turn.user_message.clone(),
        });
        self.event_bus.emit(ChatEvent::TurnStart { turn_id });
        let _guard = PendingGuard { client: self, turn_id };

        self.persist().await;

        let result = self.backend().send_chat(turn.request).await;
        if let Err(e) = &result {
            log::error!("Chat turn {} failed: {}", turn_id, e);
        }

        let settlement = self.conversation.borrow_mut().settle(turn.epoch, result);
        match settlement.outcome {
            TurnOutcome::Discarded => {
                log::info!("Dropping reply to turn {}: conversation was reset", turn_id);
                return settlement.outcome;
            }
            TurnOutcome::NoContent => {
                log::warn!("Chat turn {} returned no content", turn_id);
            }
            _ => {}
        }

        if let Some(message) = settlement.appended {
            self.event_bus.emit(ChatEvent::MessageAppended { message });
        }
        if let Some(session_id) = settlement.session_changed {
            self.event_bus.emit(ChatEvent::SessionChanged { session_id });
        }
        self.persist().await;

        settlement.outcome
    }

    // ─── New chat ───────────────────────────────────────────

    /// Archive the current conversation (best effort), then clear its stored
    /// transcript and session id and start again from a greeting.
    ///
    /// The identity and epoch are captured before archival. If the user
    /// switched identity (or otherwise replaced the transcript) meanwhile,
    /// only the captured identity's stored conversation is cleared and the
    /// current one is left alone. A second call while one is running is
    /// ignored.
    ///
    /// Returns whether an archival request was attempted.
    pub async fn new_chat(&self) -> bool {
        if self.resetting.get() {
            log::info!("New chat already in progress");
            return false;
        }
        let (identity, epoch, archive) = {
            let conv = self.conversation.borrow();
            (conv.identity().cloned(), conv.epoch(), conv.archive_request())
        };
        let Some(identity) = identity else {
            return false;
        };

        self.resetting.set(true);
        self.event_bus.emit(ChatEvent::ResetStart);
        let _guard = ResetGuard { client: self };

        let attempted = archive.is_some();
        if let Some(req) = archive {
            let session_id = req.session_id.clone();
            match self.backend().archive_chat(req).await {
                Ok(()) => log::info!("Archived session {}", session_id),
                Err(e) => log::warn!("Archiving session {} failed: {}", session_id, e),
            }
        }

        if let Err(e) = self.store.clear_conversation(&identity).await {
            log::warn!("Could not clear stored conversation for {}: {}", identity, e);
        }

        if self.conversation.borrow().epoch() != epoch {
            log::info!(
                "Conversation changed while archiving {}; leaving the current one as is",
                identity
            );
            return attempted;
        }

        self.conversation.borrow_mut().reset();
        self.emit_loaded();
        self.persist().await;

        attempted
    }

    // ─── Task log ────────────────────────────────────────────

    /// Fetch a fresh task snapshot and announce the result.
    pub async fn refresh_tasks(&self) -> TaskLogState {
        self.event_bus.emit(ChatEvent::TasksLoading);
        let backend = self.backend();
        let state = task_log::fetch_snapshot(backend.as_ref()).await;
        match &state {
            TaskLogState::Loaded(tasks) => self.event_bus.emit(ChatEvent::TasksLoaded {
                tasks: tasks.clone(),
            }),
            TaskLogState::Empty => self.event_bus.emit(ChatEvent::TasksLoaded { tasks: Vec::new() }),
            TaskLogState::Failed(message) => self.event_bus.emit(ChatEvent::TasksFailed {
                message: message.clone(),
            }),
            TaskLogState::NotLoaded | TaskLogState::Loading => {}
        }
        state
    }

    // ─── Persistence ─────────────────────────────────────────

    /// Write the transcript and session id of the current identity.
    /// Failures are logged; the in-memory conversation stays authoritative.
    async fn persist(&self) {
        let (identity, messages, session_id) = {
            let conv = self.conversation.borrow();
            let Some(identity) = conv.identity().cloned() else {
                return;
            };
            (
                identity,
                conv.messages().to_vec(),
                conv.session_id().map(String::from),
            )
        };

        if let Err(e) = self.store.save_transcript(&identity, &messages).await {
            log::warn!("Could not save transcript for {}: {}", identity, e);
        }
        if let Some(session_id) = session_id {
            if let Err(e) = self.store.save_session_id(&identity, &session_id).await {
                log::warn!("Could not save session id for {}: {}", identity, e);
            }
        }
    }
}
