//! HTTP routes for the support bot

pub mod chat;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Build all bot routes
pub fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::root))
        .route("/welcome", get(chat::welcome))
        .route("/chat", post(chat::chat))
        .route("/reset/:session_id", post(session::reset_session))
}
