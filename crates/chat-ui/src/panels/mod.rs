pub mod identity;
pub mod chat;
pub mod tasks;
pub mod settings;
