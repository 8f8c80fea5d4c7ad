//! Session API endpoints
//!
//! Connect and disconnect stored participants against the chat backend.

use crate::api::utils::lookup_participant;
use crate::chat::{ChatUser, ConnectedUser};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request naming a stored participant
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// ID of the participant in the local store
    pub participant_id: String,
}

/// Current session response
#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    /// The connected user, or `null` when no session is active
    pub user: Option<ChatUser>,
}

/// GET /api/session - Who is connected
pub async fn get_session(State(state): State<AppState>) -> Json<CurrentSessionResponse> {
    Json(CurrentSessionResponse {
        user: state.gateway.current_user(),
    })
}

/// POST /api/session/connect - Connect a stored participant
///
/// A connect stream that completes without a value is reported as 502.
pub async fn connect_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<ConnectedUser>, AppError> {
    let stored = lookup_participant(&state.participants, &request.participant_id).await?;

    let connected = state
        .gateway
        .connect(stored.to_participant())
        .next()
        .await
        .ok_or_else(|| AppError::ConnectionFailed(stored.id.clone()))?;

    info!(
        participant_id = %stored.id,
        connection_id = %connected.connection_id,
        "Participant connected"
    );
    Ok(Json(connected))
}

/// POST /api/session/disconnect - Disconnect a stored participant
///
/// No-op unless the participant owns the active session.
pub async fn disconnect_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<StatusCode, AppError> {
    let stored = lookup_participant(&state.participants, &request.participant_id).await?;
    state.gateway.disconnect(&stored.to_participant());
    Ok(StatusCode::NO_CONTENT)
}
