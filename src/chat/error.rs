//! Chat backend error types
//!
//! Errors a chat service can report when opening a session.

use thiserror::Error;

/// Errors that can occur while connecting to the chat backend
#[derive(Error, Debug)]
pub enum ChatServiceError {
    /// The backend could not be reached
    #[error("Chat backend unreachable: {0}")]
    Network(String),

    /// The backend rejected the user's token
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// The backend answered with an error status
    #[error("Chat backend returned error status {status}: {body}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The backend answered with a body that could not be understood
    #[error("Invalid response from chat backend: {0}")]
    InvalidResponse(String),
}
