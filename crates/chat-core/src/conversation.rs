//! Conversation state — identity, transcript, session id and the pending flag.
//!
//! Pure and synchronous: no I/O happens here. [`crate::client::ChatClient`]
//! drives the transitions and persists the result after each one.
//!
//! A chat turn is two-phase: [`Conversation::begin_turn`] appends the user's
//! message immediately, [`Conversation::settle`] appends whatever the backend
//! answered. A failed turn never removes the user's message; it only adds a
//! fallback error message after it.

use chat_types::{
    Result,
    identity::Identity,
    message::Message,
    wire::{ArchiveRequest, ChatReply, ChatRequest},
};

pub struct Conversation {
    identity: Option<Identity>,
    messages: Vec<Message>,
    session_id: Option<String>,
    pending: bool,
    /// Bumped whenever the transcript is replaced; replies to turns
    /// started under an older epoch are dropped.
    epoch: u64,
    assistant_name: String,
}

/// A chat request that has been admitted and is waiting for the backend.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub epoch: u64,
    pub user_message: Message,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input was blank, a request was already in flight, or no identity is set
    Rejected,
    /// An agent reply was appended
    Replied,
    /// The backend answered without `content`; nothing was appended
    NoContent,
    /// The fallback error message was appended
    Failed,
    /// The transcript was replaced while the request was in flight
    Discarded,
}

/// What [`Conversation::settle`] changed.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub outcome: TurnOutcome,
    pub appended: Option<Message>,
    pub session_changed: Option<String>,
}

impl Conversation {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            identity: None,
            messages: Vec::new(),
            session_id: None,
            pending: false,
            epoch: 0,
            assistant_name: assistant_name.into(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Changes whenever the transcript is replaced wholesale.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn set_assistant_name(&mut self, name: impl Into<String>) {
        self.assistant_name = name.into();
    }

    fn greeting(&self, identity: &Identity) -> Message {
        Message::greeting(identity.as_str(), &self.assistant_name)
    }

    /// Install an identity with whatever was restored from storage.
    /// `None` (nothing usable stored) starts from a fresh greeting.
    pub fn load(
        &mut self,
        identity: Identity,
        stored: Option<Vec<Message>>,
        session_id: Option<String>,
    ) {
        self.messages = stored.unwrap_or_else(|| vec![self.greeting(&identity)]);
        self.session_id = session_id;
        self.identity = Some(identity);
        self.epoch += 1;
    }

    /// Drop the identity and its in-memory transcript.
    pub fn clear_identity(&mut self) {
        self.identity = None;
        self.messages.clear();
        self.session_id = None;
        self.epoch += 1;
    }

    /// Phase one of a chat turn.
    ///
    /// Returns `None` without touching the transcript when the trimmed input
    /// is empty, a request is already pending, or no identity is set.
    pub fn begin_turn(&mut self, raw_input: &str) -> Option<PendingTurn> {
        let input = raw_input.trim();
        if input.is_empty() || self.pending {
            return None;
        }
        let identity = self.identity.as_ref()?;

        let request = ChatRequest {
            user_id: identity.as_str().to_string(),
            user_input: input.to_string(),
        };
        let user_message = Message::user(input);
        self.messages.push(user_message.clone());
        self.pending = true;

        Some(PendingTurn {
            epoch: self.epoch,
            user_message,
            request,
        })
    }

    /// Phase two of a chat turn. Does not clear the pending flag; that is
    /// [`Conversation::finish_turn`]'s job so it happens on every exit path.
    pub fn settle(&mut self, epoch: u64, result: Result<ChatReply>) -> Settlement {
        if epoch != self.epoch {
            return Settlement {
                outcome: TurnOutcome::Discarded,
                appended: None,
                session_changed: None,
            };
        }

        let reply = match result {
            Ok(reply) => reply,
            Err(_) => {
                let message = Message::fallback_error();
                self.messages.push(message.clone());
                return Settlement {
                    outcome: TurnOutcome::Failed,
                    appended: Some(message),
                    session_changed: None,
                };
            }
        };

        let session_changed = reply
            .session_id
            .filter(|s| !s.is_empty() && self.session_id.as_deref() != Some(s.as_str()));
        if let Some(id) = &session_changed {
            self.session_id = Some(id.clone());
        }

        match reply.content.filter(|c| !c.is_empty()) {
            Some(content) => {
                let message = Message::agent(content);
                self.messages.push(message.clone());
                Settlement {
                    outcome: TurnOutcome::Replied,
                    appended: Some(message),
                    session_changed,
                }
            }
            None => Settlement {
                outcome: TurnOutcome::NoContent,
                appended: None,
                session_changed,
            },
        }
    }

    pub fn finish_turn(&mut self) {
        self.pending = false;
    }

    /// The archival payload, if this conversation is worth archiving:
    /// something beyond the greeting was said and the backend issued a session.
    pub fn archive_request(&self) -> Option<ArchiveRequest> {
        if self.messages.len() <= 1 {
            return None;
        }
        let session_id = self.session_id.clone()?;
        Some(ArchiveRequest {
            session_id,
            transcript: self.messages.clone(),
        })
    }

    /// Start over with a fresh greeting and no session.
    pub fn reset(&mut self) {
        self.session_id = None;
        self.messages = match &self.identity {
            Some(identity) => vec![self.greeting(identity)],
            None => Vec::new(),
        };
        self.epoch += 1;
    }
}
