//! Browser adapters for the chat client.
//!
//! `storage` implements [`chat_core::ports::StoragePort`],
//! `backend` implements [`chat_core::ports::ChatBackendPort`].

pub mod storage;
pub mod backend;
