use axum::{extract::State, Json};
use serde_json::json;

use pm_common::corpus::LoadState;

use crate::error::ApiError;
use crate::SharedState;

pub async fn livez() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness gates on the corpus state machine: requests are admitted only
/// once the models and index are loaded.
pub async fn readyz(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, ApiError> {
    match state.corpus.state() {
        LoadState::Ready => {
            let snapshot = state.corpus.snapshot()?;
            Ok(Json(json!({
                "status": "ok",
                "profiles": snapshot.store.len(),
                "application": env!("CARGO_PKG_NAME"),
            })))
        }
        LoadState::Failed(reason) => Err(ApiError::ServiceUnavailable(format!(
            "corpus load failed: {reason}"
        ))),
        LoadState::Loading => Err(ApiError::ServiceUnavailable("loading".into())),
        LoadState::Uninitialized => Err(ApiError::ServiceUnavailable("uninitialized".into())),
    }
}
