//! API utility functions
//!
//! Helpers shared by the session and room handlers.

use crate::error::AppError;
use crate::store::{ParticipantDb, StoredParticipant};

/// Maximum participant ID length in characters
pub const MAX_PARTICIPANT_ID_LENGTH: usize = 128;

/// Validate a participant ID taken from a request
///
/// # Returns
/// * `Ok(&str)` - The trimmed ID
/// * `Err(AppError)` - ID is empty or too long
pub fn validate_participant_id(id: &str) -> Result<&str, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(
            "Participant ID cannot be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_PARTICIPANT_ID_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Participant ID exceeds maximum length of {} characters",
            MAX_PARTICIPANT_ID_LENGTH
        )));
    }
    Ok(trimmed)
}

/// Resolve a participant ID against the local store
pub async fn lookup_participant(
    db: &ParticipantDb,
    id: &str,
) -> Result<StoredParticipant, AppError> {
    let id = validate_participant_id(id)?;
    db.get_participant(id)
        .await?
        .ok_or_else(|| AppError::ParticipantNotFound(id.to_string()))
}
