use serde::{Deserialize, Serialize};

/// Who authored a message.
///
/// The agent serialises as `"alina"`, matching what the backend archives;
/// `"agent"` is accepted when reading older transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "alina", alias = "agent")]
    Agent,
}

impl Sender {
    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

/// A single line of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

/// Shown when a chat turn fails for any reason.
pub const FALLBACK_ERROR_TEXT: &str =
    "Sorry, I couldn't reach the server. Please try again in a moment.";

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Agent,
        }
    }

    /// The synthesized first message of every fresh transcript.
    pub fn greeting(display_name: &str, assistant_name: &str) -> Self {
        Self::agent(format!(
            "Hi {}! I'm {}. How can I help you today?",
            display_name, assistant_name
        ))
    }

    pub fn fallback_error() -> Self {
        Self::agent(FALLBACK_ERROR_TEXT)
    }
}
