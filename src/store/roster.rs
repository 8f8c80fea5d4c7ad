// Roster seeding module
// Loads the bundled participant roster from a JSON file into the local store

use super::db::ParticipantDb;
use super::error::StoreError;
use super::models::StoredParticipant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error types for roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    /// File I/O error
    #[error("IO Error: {0}")]
    Io(String),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    Json(String),
    /// Invalid data format
    #[error("Invalid Data: {0}")]
    InvalidData(String),
    /// Writing the roster into the store failed
    #[error("Store Error: {0}")]
    Store(#[from] StoreError),
}

/// One participant entry in a roster file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Unique identifier of the participant
    pub id: String,
    /// Display name
    pub name: String,
    /// Bearer token for the chat backend
    pub token: String,
    /// Extra profile metadata
    #[serde(default)]
    pub extra_data: serde_json::Map<String, serde_json::Value>,
    /// Identifier of the participant's live room
    pub room_id: String,
    /// Display name of the live room
    pub room_name: String,
    /// Whether the room is currently live
    #[serde(default)]
    pub room_live: bool,
}

/// Serializable structure for a roster file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterData {
    /// Version of the roster format (for future migration support)
    version: u32,
    /// Participants, in display order
    participants: Vec<RosterEntry>,
}

/// Participant roster file operations
pub struct Roster;

impl Roster {
    /// Load roster entries from a JSON file
    ///
    /// # Returns
    /// * `Ok(Vec<RosterEntry>)` in file order; empty if the file does not exist
    /// * `Err(RosterError)` if the file is unreadable or malformed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>, RosterError> {
        if !path.as_ref().exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(path.as_ref()).map_err(|e| RosterError::Io(e.to_string()))?;

        let data: RosterData =
            serde_json::from_str(&json).map_err(|e| RosterError::Json(e.to_string()))?;

        if data.version != 1 {
            return Err(RosterError::InvalidData(format!(
                "Unsupported roster version: {}",
                data.version
            )));
        }

        if let Some(entry) = data
            .participants
            .iter()
            .find(|e| e.id.is_empty() || e.token.is_empty())
        {
            return Err(RosterError::InvalidData(format!(
                "Roster entry '{}' is missing an id or token",
                entry.name
            )));
        }

        Ok(data.participants)
    }

    /// Write roster entries to the store, preserving file order
    ///
    /// Returns the number of participants written.
    pub async fn seed(db: &ParticipantDb, entries: Vec<RosterEntry>) -> Result<usize, RosterError> {
        let count = entries.len();
        for (position, entry) in entries.into_iter().enumerate() {
            let mut record = StoredParticipant::new(
                entry.id,
                entry.name,
                entry.token,
                entry.room_id,
                entry.room_name,
            );
            record.extra_data = serde_json::Value::Object(entry.extra_data).to_string();
            record.room_live = entry.room_live;
            record.sort_order = position as i64;
            db.upsert_participant(&record).await?;
        }
        Ok(count)
    }
}
