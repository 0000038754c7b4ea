//! Session management endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::server::state::AppState;
use crate::types::StatusMessage;

/// POST /reset/:session_id - forget a session's history
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<StatusMessage> {
    Json(StatusMessage::new(state.conversation().reset(&session_id)))
}
