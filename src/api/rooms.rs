//! Room API endpoints

use crate::api::utils::lookup_participant;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::RoomSummary;
use axum::{
    extract::{Path, State},
    response::Json,
};
use futures_util::StreamExt;
use serde::Serialize;

/// Rooms list response
#[derive(Debug, Serialize)]
pub struct RoomsListResponse {
    /// Live rooms of every other participant, in roster order
    pub rooms: Vec<RoomSummary>,
    /// Total number of rooms
    pub count: usize,
}

/// GET /api/rooms/:participant_id - Rooms visible to a participant
pub async fn list_rooms(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<RoomsListResponse>, AppError> {
    let stored = lookup_participant(&state.participants, &participant_id).await?;

    let rooms = state
        .gateway
        .list_room_summaries(&stored.to_participant())
        .next()
        .await
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Room listing was aborted")))??;

    Ok(Json(RoomsListResponse {
        count: rooms.len(),
        rooms,
    }))
}
