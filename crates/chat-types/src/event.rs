use serde::{Deserialize, Serialize};
use crate::message::Message;
use crate::task::Task;

/// Events emitted by the chat client.
/// The UI drains these each frame and projects them into its own state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// No display name is stored; chat is locked behind the name prompt
    IdentityRequired,

    /// A whole transcript replaced the current one (restore, identity switch, new chat)
    ConversationLoaded {
        identity: String,
        messages: Vec<Message>,
        session_id: Option<String>,
    },

    /// One message was appended to the transcript
    MessageAppended { message: Message },

    /// A chat request went out
    TurnStart { turn_id: u64 },

    /// The chat request settled, successfully or not
    TurnEnd { turn_id: u64 },

    /// "New chat" started: archival may be in flight
    ResetStart,

    /// "New chat" finished, whether or not the transcript was replaced
    ResetEnd,

    /// The backend issued (or re-issued) a session id
    SessionChanged { session_id: String },

    /// A task snapshot fetch started
    TasksLoading,

    /// A task snapshot arrived
    TasksLoaded { tasks: Vec<Task> },

    /// The task snapshot could not be fetched
    TasksFailed { message: String },
}
