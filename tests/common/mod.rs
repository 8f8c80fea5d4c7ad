//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use live_room_gateway::chat::{ChatService, ChatServiceError, ChatUser, ConnectedUser};
use live_room_gateway::store::{LocalStore, StoreError, StoredParticipant};
use std::sync::Mutex;
use std::time::Duration;

/// Calls observed by `RecordingChatService`, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    Connect(String),
    Disconnect,
}

/// In-memory chat service that records every call
pub struct RecordingChatService {
    current: Mutex<Option<ChatUser>>,
    calls: Mutex<Vec<Call>>,
    fail_connect: bool,
    connect_delay: Option<Duration>,
}

impl RecordingChatService {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            fail_connect: false,
            connect_delay: None,
        }
    }

    /// Start with `user_id` already connected
    pub fn with_session(self, user_id: &str) -> Self {
        *self.current.lock().unwrap() = Some(chat_user(user_id));
        self
    }

    /// Reject every connect attempt
    pub fn failing(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Suspend this long inside every connect attempt
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn disconnect_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::Disconnect)
            .count()
    }

    pub fn session_user_id(&self) -> Option<String> {
        self.current.lock().unwrap().as_ref().map(|u| u.id.clone())
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatService for RecordingChatService {
    fn current_user(&self) -> Option<ChatUser> {
        self.record(Call::CurrentUser);
        self.current.lock().unwrap().clone()
    }

    async fn connect_user(
        &self,
        user: ChatUser,
        token: &str,
    ) -> Result<ConnectedUser, ChatServiceError> {
        self.record(Call::Connect(user.id.clone()));

        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_connect {
            return Err(ChatServiceError::AuthRejected(format!(
                "token {} rejected",
                token
            )));
        }

        *self.current.lock().unwrap() = Some(user.clone());
        Ok(ConnectedUser {
            connection_id: format!("conn-{}", user.id),
            user,
        })
    }

    fn disconnect(&self) {
        self.record(Call::Disconnect);
        *self.current.lock().unwrap() = None;
    }
}

/// Local store serving a fixed participant list
pub struct InMemoryStore {
    participants: Vec<StoredParticipant>,
    fail: bool,
}

impl InMemoryStore {
    pub fn new(participants: Vec<StoredParticipant>) -> Self {
        Self {
            participants,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            participants: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl LocalStore for InMemoryStore {
    async fn get_all_participants(&self) -> Result<Vec<StoredParticipant>, StoreError> {
        if self.fail {
            return Err(StoreError::InvalidData("disk unavailable".to_string()));
        }
        Ok(self.participants.clone())
    }
}

pub fn chat_user(id: &str) -> ChatUser {
    ChatUser {
        id: id.to_string(),
        extra_data: Default::default(),
    }
}

pub fn stored(id: &str) -> StoredParticipant {
    StoredParticipant::new(
        id,
        id.to_uppercase(),
        format!("token-{}", id),
        format!("room-{}", id),
        format!("{} live", id),
    )
}
