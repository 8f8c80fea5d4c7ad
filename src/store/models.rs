//! Participant data models
//!
//! Defines the caller-facing participant identity, the persisted participant
//! record and the room summary projected from it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Extra profile metadata attached to a participant
pub type ExtraData = Map<String, Value>;

/// A chat user identity with credentials, as used to open a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier of the user on the chat backend
    pub id: String,
    /// Opaque bearer token used to authenticate the user
    pub token: String,
    /// Arbitrary metadata that enriches the backend-visible profile
    #[serde(default)]
    pub extra_data: ExtraData,
}

impl Participant {
    /// Create a participant without extra metadata
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            extra_data: ExtraData::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }
}

/// Read-only projection of a participant's live room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    /// ID of the participant hosting the room
    pub participant_id: String,
    /// Backend identifier of the room
    pub room_id: String,
    /// Display name of the room
    pub room_name: String,
    /// Whether the room is currently live
    pub is_live: bool,
}

/// A participant record as persisted in the local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredParticipant {
    /// Unique identifier of the participant
    pub id: String,
    /// Display name
    pub name: String,
    /// Bearer token used to connect as this participant
    pub token: String,
    /// JSON object with extra profile metadata, stored as text
    pub extra_data: String,
    /// Identifier of the participant's live room
    pub room_id: String,
    /// Display name of the participant's live room
    pub room_name: String,
    /// Whether the room is currently live
    pub room_live: bool,
    /// Position in the roster; reads are ordered by it
    pub sort_order: i64,
    /// When the record was last written (Unix timestamp)
    pub updated_at: i64,
}

impl StoredParticipant {
    /// Create a new record with empty extra metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
        room_id: impl Into<String>,
        room_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            token: token.into(),
            extra_data: "{}".to_string(),
            room_id: room_id.into(),
            room_name: room_name.into(),
            room_live: false,
            sort_order: 0,
            updated_at: Utc::now().timestamp(),
        }
    }

    /// Parse the stored extra metadata
    ///
    /// Anything that is not a JSON object is treated as empty.
    pub fn extra_data(&self) -> ExtraData {
        match serde_json::from_str::<Value>(&self.extra_data) {
            Ok(Value::Object(map)) => map,
            _ => ExtraData::new(),
        }
    }

    /// Build the identity used to connect as this participant
    ///
    /// The display name is always published as the `name` metadata entry.
    pub fn to_participant(&self) -> Participant {
        let mut extra_data = self.extra_data();
        extra_data.insert("name".to_string(), Value::String(self.name.clone()));
        Participant {
            id: self.id.clone(),
            token: self.token.clone(),
            extra_data,
        }
    }

    /// Project the record to its live room summary
    pub fn room_summary(&self) -> RoomSummary {
        RoomSummary {
            participant_id: self.id.clone(),
            room_id: self.room_id.clone(),
            room_name: self.room_name.clone(),
            is_live: self.room_live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_participant_merges_name_into_extra_data() {
        let mut record = StoredParticipant::new("thor", "Thor", "tok", "room-thor", "Asgard");
        record.extra_data = json!({"image": "thor.png"}).to_string();

        let participant = record.to_participant();

        assert_eq!(participant.id, "thor");
        assert_eq!(participant.token, "tok");
        assert_eq!(participant.extra_data["image"], json!("thor.png"));
        assert_eq!(participant.extra_data["name"], json!("Thor"));
    }

    #[test]
    fn test_extra_data_ignores_non_object_json() {
        let mut record = StoredParticipant::new("hulk", "Hulk", "tok", "room-hulk", "Lab");
        record.extra_data = "[1, 2, 3]".to_string();
        assert!(record.extra_data().is_empty());

        record.extra_data = "not json".to_string();
        assert!(record.extra_data().is_empty());
    }

    #[test]
    fn test_room_summary_projection() {
        let mut record = StoredParticipant::new("loki", "Loki", "tok", "room-loki", "Tricks");
        record.room_live = true;

        let summary = record.room_summary();
        assert_eq!(
            summary,
            RoomSummary {
                participant_id: "loki".to_string(),
                room_id: "room-loki".to_string(),
                room_name: "Tricks".to_string(),
                is_live: true,
            }
        );
    }
}
