use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::llm::LanguageModel;
use super::service::{AdvisorService, AdvisorServiceError, ChatRequest, QualifyRequest};

/// Router builder exposing the chat wizard and qualification endpoints.
pub fn advisor_router<M>(service: Arc<AdvisorService<M>>) -> Router
where
    M: LanguageModel + 'static,
{
    Router::new()
        .route("/api/v1/chat/message", post(message_handler::<M>))
        .route("/api/v1/chat/qualify", post(qualify_handler::<M>))
        .route(
            "/api/v1/chat/session/:session_id",
            get(session_handler::<M>).delete(delete_session_handler::<M>),
        )
        .with_state(service)
}

pub(crate) async fn message_handler<M>(
    State(service): State<Arc<AdvisorService<M>>>,
    axum::Json(request): axum::Json<ChatRequest>,
) -> Response
where
    M: LanguageModel + 'static,
{
    match service.chat(request).await {
        Ok(outcome) => {
            let payload = json!({
                "success": true,
                "session_id": outcome.session_id,
                "response": outcome.response,
                "model": outcome.model,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(AdvisorServiceError::EmptyMessage) => {
            let payload = json!({ "error": "message is required" });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(AdvisorServiceError::Model(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn qualify_handler<M>(
    State(service): State<Arc<AdvisorService<M>>>,
    axum::Json(request): axum::Json<QualifyRequest>,
) -> Response
where
    M: LanguageModel + 'static,
{
    match service.qualify(request).await {
        Ok(profile) => {
            let payload = json!({
                "success": true,
                "profile": profile,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(AdvisorServiceError::SessionNotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn session_handler<M>(
    State(service): State<Arc<AdvisorService<M>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: LanguageModel + 'static,
{
    match service.session(&session_id) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(AdvisorServiceError::SessionNotFound) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn delete_session_handler<M>(
    State(service): State<Arc<AdvisorService<M>>>,
    Path(session_id): Path<String>,
) -> Response
where
    M: LanguageModel + 'static,
{
    service.delete_session(&session_id);
    let payload = json!({ "success": true });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
