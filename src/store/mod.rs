//! Local store module
//!
//! Persisted participants and their live room state, backed by SQLite.

pub mod db;
pub mod error;
pub mod local;
pub mod models;
pub mod roster;

pub use db::ParticipantDb;
pub use error::StoreError;
pub use local::LocalStore;
pub use models::{ExtraData, Participant, RoomSummary, StoredParticipant};
pub use roster::{Roster, RosterEntry, RosterError};
