//! Chat client core.
//!
//! Everything here is plain Rust: browser adapters live in `chat-platform`
//! and reach the core only through the traits in [`ports`].

pub mod ports;
pub mod event_bus;
pub mod store;
pub mod conversation;
pub mod client;
pub mod task_log;
