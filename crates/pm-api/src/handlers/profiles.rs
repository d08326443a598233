use axum::{extract::State, Json};
use serde_json::json;

use pm_common::api::{IngestResponse, NewProfileRequest};

use crate::error::ApiError;
use crate::SharedState;

/// POST /profiles — append one profile. The embedding work runs on a
/// blocking worker; the single writer gate in the corpus service serializes
/// concurrent calls.
pub async fn add_profile(
    State(state): State<SharedState>,
    Json(request): Json<NewProfileRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let corpus = state.corpus.clone();

    let outcome = tokio::task::spawn_blocking(move || corpus.ingest(request.into()))
        .await
        .map_err(|err| ApiError::Internal(format!("ingest task failed: {err}")))??;

    Ok(Json(IngestResponse::from(outcome)))
}

/// GET /jobs — known job titles from the taxonomy; 404 when no taxonomy
/// file was configured, matching the original behavior.
pub async fn list_jobs(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let taxonomy = state.engine.taxonomy();
    if taxonomy.is_empty() {
        return Err(ApiError::NotFound(
            "fichier des métiers non trouvé, fonctionnalité désactivée".into(),
        ));
    }

    Ok(Json(json!({ "jobs": taxonomy.titles() })))
}
