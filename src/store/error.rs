//! Local store error types
//!
//! Errors that can occur while reading or writing persisted participants.

use thiserror::Error;

/// Errors that can occur during local store access
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying database rejected the operation
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted record could not be interpreted
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Failed to prepare the database location on disk
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
