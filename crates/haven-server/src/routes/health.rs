use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// `GET /health` — liveness check.
///
/// The dashboard keeps no connections of its own, so it is healthy whenever it
/// answers. The data source being down degrades pages to empty data instead.
///
/// Response shape:
/// ```json
/// { "status": "ok", "version": "0.1.0", "features": { "USE_DATABASE": true, "FALLBACK_TO_JSON": false } }
/// ```
#[tracing::instrument(skip(state))]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let features = state.config.features;
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "features": {
                "USE_DATABASE": features.use_database,
                "FALLBACK_TO_JSON": features.fallback_to_json
            }
        })),
    )
}
