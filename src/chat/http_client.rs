//! Chat backend HTTP client
//!
//! `ChatService` implementation that opens and closes sessions through the
//! chat backend's REST endpoints and keeps the active session in memory.

use crate::chat::error::ChatServiceError;
use crate::chat::service::{ChatService, ChatUser, ConnectedUser};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// Body of `POST /connect`
#[derive(Debug, Serialize)]
struct ConnectRequest<'a> {
    user: &'a ChatUser,
}

/// Body of `POST /disconnect`
#[derive(Debug, Serialize)]
struct DisconnectRequest {
    connection_id: String,
}

/// A live backend connection and the credential that opened it
#[derive(Debug, Clone)]
struct ActiveSession {
    connected: ConnectedUser,
    token: String,
}

/// Chat service client speaking to a remote backend over HTTP
pub struct HttpChatService {
    client: reqwest::Client,
    base_url: String,
    /// The active session; at most one
    session: RwLock<Option<ActiveSession>>,
}

impl HttpChatService {
    /// Create a client for the backend at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Backend root URL, without trailing slash
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatServiceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        })
    }

    /// The active session, if any
    pub fn session(&self) -> Option<ConnectedUser> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.connected.clone())
    }

    /// Close `session` on the backend without waiting for the answer
    fn close_remote(&self, session: ActiveSession) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(
                connection_id = %session.connected.connection_id,
                "No runtime available, backend connection left to expire"
            );
            return;
        };

        let client = self.client.clone();
        let url = format!("{}/disconnect", self.base_url);
        runtime.spawn(async move {
            let connection_id = session.connected.connection_id;
            let result = client
                .post(&url)
                .bearer_auth(&session.token)
                .json(&DisconnectRequest {
                    connection_id: connection_id.clone(),
                })
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => debug!(
                    connection_id = %connection_id,
                    "Backend connection closed"
                ),
                Ok(response) => warn!(
                    connection_id = %connection_id,
                    status_code = response.status().as_u16(),
                    "Chat backend rejected disconnect"
                ),
                Err(e) => warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to send disconnect request"
                ),
            }
        });
    }

    async fn request_connect(
        &self,
        user: &ChatUser,
        token: &str,
    ) -> Result<ConnectedUser, ChatServiceError> {
        let url = format!("{}/connect", self.base_url);

        debug!(
            url = %url,
            user_id = %user.id,
            "Requesting chat session"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&ConnectRequest { user })
            .send()
            .await
            .map_err(|e| {
                ChatServiceError::Network(format!("Failed to send connect request: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            error!(
                status_code = status_code,
                error_body = %body,
                "Chat backend rejected connect"
            );

            if status_code == 401 || status_code == 403 {
                return Err(ChatServiceError::AuthRejected(body));
            }
            return Err(ChatServiceError::Backend {
                status: status_code,
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            ChatServiceError::Network(format!("Failed to read connect response: {}", e))
        })?;

        let connected: ConnectedUser = serde_json::from_str(&body).map_err(|e| {
            ChatServiceError::InvalidResponse(format!("{} - Response body: {}", e, body))
        })?;

        if connected.user.id != user.id {
            return Err(ChatServiceError::InvalidResponse(format!(
                "Backend connected user '{}' instead of '{}'",
                connected.user.id, user.id
            )));
        }

        Ok(connected)
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    fn current_user(&self) -> Option<ChatUser> {
        self.session().map(|s| s.user)
    }

    async fn connect_user(
        &self,
        user: ChatUser,
        token: &str,
    ) -> Result<ConnectedUser, ChatServiceError> {
        let connected = self.request_connect(&user, token).await?;

        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(ActiveSession {
                connected: connected.clone(),
                token: token.to_string(),
            });

        if let Some(previous) = previous {
            info!(
                previous_user_id = %previous.connected.user.id,
                user_id = %connected.user.id,
                "Replaced existing chat session"
            );
            self.close_remote(previous);
        }

        info!(
            user_id = %connected.user.id,
            connection_id = %connected.connection_id,
            "Chat session established"
        );
        Ok(connected)
    }

    fn disconnect(&self) {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match previous {
            Some(session) => {
                info!(
                    user_id = %session.connected.user.id,
                    connection_id = %session.connected.connection_id,
                    "Chat session closed"
                );
                self.close_remote(session);
            }
            None => debug!("Disconnect requested without an active chat session"),
        }
    }
}
