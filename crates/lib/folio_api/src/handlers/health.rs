//! Health endpoint.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use folio_core::LocaleTag;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health`: reports version and whether live inference is enabled.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let table = state.responder.table();
    let topics: BTreeMap<String, Vec<String>> = LocaleTag::ALL
        .iter()
        .map(|locale| {
            let keys: Vec<String> = table.keys(*locale).into_iter().map(str::to_string).collect();
            (locale.to_string(), keys)
        })
        .collect();

    Json(HealthResponse {
        status: "ok".into(),
        version: folio_core::version().to_string(),
        inference_configured: state.responder.config().is_configured(),
        locales: LocaleTag::ALL.to_vec(),
        topics,
    })
}
