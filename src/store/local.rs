//! Local store contract
//!
//! The read side of participant persistence as seen by the session gateway.

use crate::store::error::StoreError;
use crate::store::models::StoredParticipant;
use async_trait::async_trait;

/// Persisted collection of known participants and their room state
///
/// Implementations may block on disk access; callers are expected to run
/// reads off the interactive task.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read every persisted participant, in roster order
    async fn get_all_participants(&self) -> Result<Vec<StoredParticipant>, StoreError>;
}
