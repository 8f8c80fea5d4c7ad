//! Shared handler state

use crate::session::SessionGateway;
use crate::store::ParticipantDb;
use std::sync::Arc;

/// State shared by all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Session gateway over the chat backend and the local store
    pub gateway: Arc<SessionGateway>,
    /// Participant database, for resolving participant IDs
    pub participants: Arc<ParticipantDb>,
}

impl AppState {
    /// Bundle the gateway with the participant database it reads from
    pub fn new(gateway: Arc<SessionGateway>, participants: Arc<ParticipantDb>) -> Self {
        Self {
            gateway,
            participants,
        }
    }
}
