//! HTTP surface tests driving the router directly

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{
    config_for, corpus_file, sample_records, state_with, EchoLlm, FailingLlm, UnreachableStore,
};
use punch_support::error::GENERIC_FAILURE;
use punch_support::server::build_router;
use punch_support::server::state::{AppState, ProviderHealth};
use punch_support::InMemorySessionStore;
use punch_support::types::ChatMessage;
use punch_support::SessionStore;

// =============================================================================
// Helpers
// =============================================================================

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn bootstrapped(llm: Arc<EchoLlm>) -> (AppState, tempfile::NamedTempFile) {
    let corpus = corpus_file(&sample_records());
    let state = state_with(config_for(&corpus), llm);
    state.bootstrap().await.unwrap();
    (state, corpus)
}

// =============================================================================
// Static endpoints
// =============================================================================

#[tokio::test]
async fn test_root_banner() {
    let (state, _corpus) = bootstrapped(Arc::new(EchoLlm::default())).await;
    let (status, body) = send(&state, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Punch Support Bot is running!"}));
}

#[tokio::test]
async fn test_welcome_is_fixed() {
    let (state, _corpus) = bootstrapped(Arc::new(EchoLlm::default())).await;

    let (status, first) = send(&state, get("/welcome")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["messages"].as_array().unwrap().len(), 2);
    assert_eq!(first["messages"][1], "How can I help you today?");

    send(
        &state,
        post_json("/chat", json!({"session_id": "s1", "query": "hello"})),
    )
    .await;

    let (_, second) = send(&state, get("/welcome")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_readiness_follows_bootstrap() {
    let corpus = corpus_file(&sample_records());
    let state = state_with(config_for(&corpus), Arc::new(EchoLlm::default()));

    let response = build_router(state.clone()).oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.bootstrap().await.unwrap();

    let response = build_router(state.clone()).oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_provider_checks_report_each_backend() {
    let corpus = corpus_file(&sample_records());

    let healthy = state_with(config_for(&corpus), Arc::new(EchoLlm::default()));
    assert!(healthy.check_providers().await.all_healthy());

    let failing_llm = state_with(config_for(&corpus), Arc::new(FailingLlm));
    assert_eq!(
        failing_llm.check_providers().await,
        ProviderHealth {
            vector_store: true,
            completion: false,
        }
    );

    let no_store = AppState::from_parts(
        config_for(&corpus),
        Arc::new(UnreachableStore),
        Arc::new(EchoLlm::default()),
        Arc::new(InMemorySessionStore::new()),
    );
    let health = no_store.check_providers().await;
    assert!(!health.vector_store);
    assert!(!health.all_healthy());

    // Probing never marks the server ready
    assert!(!no_store.is_ready());
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_answers_from_retrieved_faq() {
    let (state, _corpus) = bootstrapped(Arc::new(EchoLlm::default())).await;

    let (status, body) = send(
        &state,
        post_json(
            "/chat",
            json!({"session_id": "s1", "query": "How do I reset my password?"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "s1");

    let messages = body["messages"].as_array().unwrap();
    assert!(!messages.is_empty());
    let first = messages[0].as_str().unwrap();
    assert!(first.starts_with("Context:\nQ: How do I reset my password?"));
    assert!(first.contains("Go to Settings > Security > Reset Password."));
    assert!(messages
        .last()
        .unwrap()
        .as_str()
        .unwrap()
        .starts_with("User Question: How do I reset my password?"));
}

#[tokio::test]
async fn test_second_chat_sees_first_exchange() {
    let llm = Arc::new(EchoLlm::default());
    let (state, _corpus) = bootstrapped(Arc::clone(&llm)).await;

    send(
        &state,
        post_json("/chat", json!({"session_id": "s1", "query": "Do you ship abroad?"})),
    )
    .await;
    let first_answer = llm.last_prompt().last().unwrap().content().to_string();

    send(
        &state,
        post_json("/chat", json!({"session_id": "s1", "query": "And refunds?"})),
    )
    .await;

    let prompt = llm.last_prompt();
    assert_eq!(prompt.len(), 4);
    assert_eq!(prompt[1], ChatMessage::user("Do you ship abroad?"));
    assert_eq!(prompt[2], ChatMessage::assistant(first_answer));
    assert!(prompt[3].content().ends_with("User Question: And refunds?"));
}

#[tokio::test]
async fn test_sessions_do_not_share_history() {
    let llm = Arc::new(EchoLlm::default());
    let (state, _corpus) = bootstrapped(Arc::clone(&llm)).await;

    send(&state, post_json("/chat", json!({"session_id": "a", "query": "one"}))).await;
    send(&state, post_json("/chat", json!({"session_id": "b", "query": "two"}))).await;

    assert_eq!(llm.last_prompt().len(), 2);
}

#[tokio::test]
async fn test_completion_failure_is_request_error() {
    let corpus = corpus_file(&sample_records());
    let state = state_with(config_for(&corpus), Arc::new(FailingLlm));
    state.bootstrap().await.unwrap();

    let response = build_router(state.clone())
        .oneshot(post_json("/chat", json!({"session_id": "s1", "query": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(body, GENERIC_FAILURE);
    assert!(!body.contains("rate limit"));
    assert!(serde_json::from_str::<Value>(&body).is_err());

    assert!(state.conversation().sessions().get("s1").is_empty());
}

#[tokio::test]
async fn test_chat_rejects_malformed_body() {
    let (state, _corpus) = bootstrapped(Arc::new(EchoLlm::default())).await;
    let (status, _) = send(&state, post_json("/chat", json!({"query": "no session"}))).await;
    assert!(status.is_client_error());
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn test_reset_unknown_session() {
    let (state, _corpus) = bootstrapped(Arc::new(EchoLlm::default())).await;
    let (status, body) = send(&state, post_empty("/reset/ghost")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Session ghost cleared."}));
}

#[tokio::test]
async fn test_reset_clears_history() {
    let llm = Arc::new(EchoLlm::default());
    let (state, _corpus) = bootstrapped(Arc::clone(&llm)).await;

    send(&state, post_json("/chat", json!({"session_id": "s1", "query": "one"}))).await;
    let (status, body) = send(&state, post_empty("/reset/s1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session s1 cleared.");

    send(&state, post_json("/chat", json!({"session_id": "s1", "query": "two"}))).await;
    assert_eq!(llm.last_prompt().len(), 2);
}
