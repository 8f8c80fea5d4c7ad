//! Chat module
//!
//! The remote chat backend: its session contract and an HTTP client for it.

pub mod error;
pub mod http_client;
pub mod service;

pub use error::ChatServiceError;
pub use http_client::HttpChatService;
pub use service::{ChatService, ChatUser, ConnectedUser};
