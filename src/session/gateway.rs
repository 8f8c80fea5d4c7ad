//! Session gateway
//!
//! Mediates between the caller and the two collaborators: the chat service,
//! which owns the active session, and the local store of known participants.
//! Everything that may suspend on I/O runs on the dispatcher handed in at
//! construction and is delivered as a [`SingleShot`] stream.

use crate::chat::{ChatService, ChatUser, ConnectedUser};
use crate::session::error::GatewayError;
use crate::session::single_shot::SingleShot;
use crate::store::{LocalStore, Participant, RoomSummary, StoreError};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Repository-layer facade over the chat service and the local store
///
/// Holds nothing but its collaborators and the dispatcher; the session
/// itself lives in the chat service.
pub struct SessionGateway {
    chat: Arc<dyn ChatService>,
    store: Arc<dyn LocalStore>,
    dispatcher: Handle,
}

impl SessionGateway {
    /// Create a gateway
    ///
    /// # Arguments
    /// * `chat` - Remote session backend
    /// * `store` - Persisted participants
    /// * `dispatcher` - Runtime that blocking and network work is offloaded to
    pub fn new(chat: Arc<dyn ChatService>, store: Arc<dyn LocalStore>, dispatcher: Handle) -> Self {
        debug!("Session gateway created");
        Self {
            chat,
            store,
            dispatcher,
        }
    }

    /// Connect `participant`, replacing any session it already holds
    ///
    /// Yields the connected user once on success. Any failure is logged and
    /// the stream completes without an item; use [`Self::try_connect`] to
    /// get the reason.
    pub fn connect(&self, participant: Participant) -> SingleShot<ConnectedUser> {
        let chat = self.chat.clone();
        SingleShot::spawn(&self.dispatcher, async move {
            let participant_id = participant.id.clone();
            match connect_sequence(chat, participant).await {
                Ok(connected) => Some(connected),
                Err(e) => {
                    warn!(
                        participant_id = %participant_id,
                        error = %e,
                        "Connect failed, completing without a session"
                    );
                    None
                }
            }
        })
    }

    /// Connect `participant` and report the outcome either way
    ///
    /// Dropping the returned future cancels the attempt.
    pub async fn try_connect(&self, participant: Participant) -> Result<ConnectedUser, GatewayError> {
        let chat = self.chat.clone();
        let mut outcome = SingleShot::spawn(&self.dispatcher, async move {
            Some(connect_sequence(chat, participant).await)
        });

        outcome.next().await.unwrap_or_else(|| {
            Err(GatewayError::Aborted(
                "connect task ended without an outcome".to_string(),
            ))
        })
    }

    /// Close the active session if, and only if, it belongs to `participant`
    pub fn disconnect(&self, participant: &Participant) {
        disconnect_if_owner(self.chat.as_ref(), &participant.id);
    }

    /// The user of the active session, if any
    pub fn current_user(&self) -> Option<ChatUser> {
        self.chat.current_user()
    }

    /// Room summaries of every persisted participant except `excluding`
    ///
    /// Yields one list in store order. Store failures are yielded as the
    /// item's error.
    pub fn list_room_summaries(
        &self,
        excluding: &Participant,
    ) -> SingleShot<Result<Vec<RoomSummary>, StoreError>> {
        let store = self.store.clone();
        let excluded_id = excluding.id.clone();
        SingleShot::spawn(&self.dispatcher, async move {
            let summaries = store.get_all_participants().await.map(|participants| {
                participants
                    .iter()
                    .filter(|p| p.id != excluded_id)
                    .map(|p| p.room_summary())
                    .collect::<Vec<_>>()
            });

            match &summaries {
                Ok(rooms) => debug!(
                    excluded_id = %excluded_id,
                    count = rooms.len(),
                    "Listed room summaries"
                ),
                Err(e) => warn!(
                    excluded_id = %excluded_id,
                    error = %e,
                    "Failed to read participants from local store"
                ),
            }
            Some(summaries)
        })
    }
}

/// Tear down the active session when it is owned by `participant_id`
fn disconnect_if_owner(chat: &dyn ChatService, participant_id: &str) {
    match chat.current_user() {
        Some(current) if current.id == participant_id => {
            info!(participant_id = %participant_id, "Disconnecting current user");
            chat.disconnect();
        }
        Some(current) => {
            debug!(
                participant_id = %participant_id,
                current_user_id = %current.id,
                "Active session belongs to another user, leaving it alone"
            );
        }
        None => {}
    }
}

/// Guard, then connect. Runs on the dispatcher.
async fn connect_sequence(
    chat: Arc<dyn ChatService>,
    participant: Participant,
) -> Result<ConnectedUser, GatewayError> {
    if participant.id.is_empty() {
        return Err(GatewayError::InvalidParticipant(
            "participant id is empty".to_string(),
        ));
    }

    disconnect_if_owner(chat.as_ref(), &participant.id);

    if participant.token.is_empty() {
        return Err(GatewayError::InvalidParticipant(format!(
            "participant {} has an empty token",
            participant.id
        )));
    }

    let Participant {
        id,
        token,
        extra_data,
    } = participant;

    debug!(participant_id = %id, "Connecting user");
    let connected = chat.connect_user(ChatUser { id, extra_data }, &token).await?;
    Ok(connected)
}
