use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::ChatRequest;
use super::repository::SessionStore;
use super::service::ChatService;
use crate::analytics::TrendRenderer;
use crate::error::AppError;

/// Router exposing the chat endpoint.
pub fn chat_router<S, T>(service: Arc<ChatService<S, T>>) -> Router
where
    S: SessionStore + 'static,
    T: TrendRenderer + 'static,
{
    Router::new()
        .route("/api/chat", post(chat_handler::<S, T>))
        .with_state(service)
}

/// A body that is not a JSON chat request is answered with 400.
pub(crate) async fn chat_handler<S, T>(
    State(service): State<Arc<ChatService<S, T>>>,
    payload: Result<axum::Json<ChatRequest>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
    T: TrendRenderer + 'static,
{
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected chat request body");
            return AppError::BadRequest(rejection.body_text()).into_response();
        }
    };

    match service.respond(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => {
            error!(error = %err, "chat turn failed");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
