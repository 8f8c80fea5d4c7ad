//! Chat service contract
//!
//! The remote session backend as seen by the session gateway. The service
//! owns the process-wide "current user" and is the only thing that mutates it.

use crate::chat::error::ChatServiceError;
use crate::store::models::ExtraData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User identity as known to the chat backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatUser {
    /// Unique identifier of the user
    pub id: String,
    /// Profile metadata published with the user
    #[serde(default)]
    pub extra_data: ExtraData,
}

/// Result of a successful connect: the live session's user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedUser {
    /// Backend identifier of the connection
    pub connection_id: String,
    /// The connected user, as echoed by the backend
    pub user: ChatUser,
}

/// Remote session and messaging backend client
#[async_trait]
pub trait ChatService: Send + Sync {
    /// The user of the active session, if any
    ///
    /// Reads in-memory state only; never blocks on I/O.
    fn current_user(&self) -> Option<ChatUser>;

    /// Open a session for `user` authenticated by `token`
    ///
    /// A successful connect replaces any previous session.
    async fn connect_user(
        &self,
        user: ChatUser,
        token: &str,
    ) -> Result<ConnectedUser, ChatServiceError>;

    /// Tear down the active session
    fn disconnect(&self);
}
