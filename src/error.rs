//! Error types and error handling for the HTTP layer
//!
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Participant with the given ID is not in the local store
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    /// Request body or parameters are invalid
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The chat backend did not produce a session
    #[error("Connection failed for participant: {0}")]
    ConnectionFailed(String),

    /// Error occurred while reading or writing the local store
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status the error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ParticipantNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConnectionFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
