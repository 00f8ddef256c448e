//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header::ACCEPT_LANGUAGE};
use axum::response::{IntoResponse, Response};
use folio_core::{ChatRequest, LocaleTag};
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequestBody, ChatResponseBody};

/// `POST /api/chat`: answer a visitor message.
///
/// Only a missing message is rejected. Backend problems are absorbed by the
/// responder and come back as a 200 with diagnostic `demo`/`reason` fields;
/// a failure caught at the pipeline boundary is a 500 with `success: false`.
pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> AppResult<Response> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let locale = LocaleTag::from_accept_language(
        headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
    );
    let request = ChatRequest::new(body.message.unwrap_or_default(), body.context)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    debug!(%locale, context = request.context(), "chat request");

    let result = state.responder.respond(&request, locale).await;
    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(ChatResponseBody::from(result))).into_response())
}
