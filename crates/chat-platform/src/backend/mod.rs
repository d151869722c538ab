pub mod http;

pub use http::HttpChatBackend;
