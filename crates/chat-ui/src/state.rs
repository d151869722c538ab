//! UI-level state that drives rendering.
//! This is a read-only projection of the chat client state,
//! updated each frame by draining the EventBus.

use chat_core::task_log::TaskLogState;
use chat_types::event::ChatEvent;
use chat_types::message::Message;

/// Which main view is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    Tasks,
}

/// State visible to UI panels
pub struct UiState {
    /// Current display name; `None` while restoring or signed out
    pub identity: Option<String>,
    /// No name is stored; show the name prompt
    pub identity_required: bool,
    /// Names with a stored transcript, offered on the name prompt
    pub known_identities: Vec<String>,
    /// Name prompt content
    pub name_input: String,
    /// Displayed transcript
    pub messages: Vec<Message>,
    pub session_id: Option<String>,
    /// A chat request is in flight
    pub pending: bool,
    /// "New chat" is archiving and resetting
    pub resetting: bool,
    /// Chat input field content
    pub input_text: String,
    pub view: View,
    pub show_settings: bool,
    pub status_text: String,
    pub task_log: TaskLogState,
    pub assistant_name: String,
}

impl UiState {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            identity: None,
            identity_required: false,
            known_identities: Vec::new(),
            name_input: String::new(),
            messages: Vec::new(),
            session_id: None,
            pending: false,
            resetting: false,
            input_text: String::new(),
            view: View::Chat,
            show_settings: false,
            status_text: "Loading...".to_string(),
            task_log: TaskLogState::NotLoaded,
            assistant_name: assistant_name.into(),
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::IdentityRequired => {
                    self.identity = None;
                    self.identity_required = true;
                    self.messages.clear();
                    self.session_id = None;
                    self.status_text = "Enter your name to start".to_string();
                }
                ChatEvent::ConversationLoaded {
                    identity,
                    messages,
                    session_id,
                } => {
                    self.identity = Some(identity);
                    self.identity_required = false;
                    self.name_input.clear();
                    self.messages = messages;
                    self.session_id = session_id;
                    if !self.pending {
                        self.status_text = "Ready".to_string();
                    }
                }
                ChatEvent::MessageAppended { message } => {
                    self.messages.push(message);
                }
                ChatEvent::TurnStart { .. } => {
                    self.pending = true;
                    self.status_text = format!("Waiting for {}...", self.assistant_name);
                }
                ChatEvent::TurnEnd { .. } => {
                    self.pending = false;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::ResetStart => {
                    self.resetting = true;
                    self.status_text = "Starting a new chat...".to_string();
                }
                ChatEvent::ResetEnd => {
                    self.resetting = false;
                    if !self.pending {
                        self.status_text = "Ready".to_string();
                    }
                }
                ChatEvent::SessionChanged { session_id } => {
                    self.session_id = Some(session_id);
                }
                ChatEvent::TasksLoading => {
                    self.task_log = TaskLogState::Loading;
                }
                ChatEvent::TasksLoaded { tasks } => {
                    self.task_log = TaskLogState::from_result(Ok(tasks));
                }
                ChatEvent::TasksFailed { message } => {
                    self.task_log = TaskLogState::Failed(message);
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending || self.resetting
    }

    /// The submit control is live: signed in, idle, and something typed.
    pub fn can_send(&self) -> bool {
        self.identity.is_some() && !self.is_busy() && !self.input_text.trim().is_empty()
    }

    /// Take the input for submission and lock the submit control until the
    /// turn ends. Returns `None` when [`UiState::can_send`] is false.
    pub fn take_input(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let text = self.input_text.trim().to_string();
        self.input_text.clear();
        self.pending = true;
        Some(text)
    }

    /// Undo the lock [`UiState::take_input`] took when the client turned the
    /// submission down before it became a turn.
    pub fn release_input(&mut self) {
        self.pending = false;
        if !self.resetting {
            self.status_text = "Ready".to_string();
        }
    }
}
