//! Queue of [`ChatEvent`]s from the chat client to the UI.
//!
//! The client pushes from inside spawned futures; the UI takes the whole
//! backlog once per frame. Single-threaded, so a shared `RefCell` suffices.

use std::cell::RefCell;
use std::rc::Rc;
use chat_types::event::ChatEvent;

/// Cloning shares the same queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<Vec<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        log::trace!("event: {:?}", event);
        self.queue.borrow_mut().push(event);
    }

    /// Everything emitted since the last drain, in emission order.
    pub fn drain(&self) -> Vec<ChatEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}
