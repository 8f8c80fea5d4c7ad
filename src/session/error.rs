//! Session gateway error types

use crate::chat::ChatServiceError;
use thiserror::Error;

/// Errors that can end a connect attempt
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The participant cannot be used to open a session
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    /// The chat backend refused or failed the connection
    #[error("Connect failed: {0}")]
    Connect(#[from] ChatServiceError),

    /// The background task ended without producing an outcome
    #[error("Session task aborted: {0}")]
    Aborted(String),
}
