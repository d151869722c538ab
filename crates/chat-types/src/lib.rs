pub mod message;
pub mod identity;
pub mod task;
pub mod wire;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;
