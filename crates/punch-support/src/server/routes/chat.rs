//! Chat endpoints

use axum::{extract::State, Json};

use crate::conversation::WELCOME_MESSAGES;
use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{ChatReply, ChatRequest, MessagesResponse, StatusMessage};

/// GET / - liveness banner
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage::new("Punch Support Bot is running!"))
}

/// GET /welcome - greeting bubbles for a new chat window
pub async fn welcome() -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: WELCOME_MESSAGES.iter().map(|m| m.to_string()).collect(),
    })
}

/// POST /chat - answer a question within a session
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let reply = state
        .conversation()
        .reply(&request.session_id, &request.query)
        .await?;

    Ok(Json(reply))
}
