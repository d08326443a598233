use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tokio::time::timeout;

use pm_common::api::{MatchRequest, MatchResponse, SearchRequest};
use pm_common::matching::pipeline::DEFAULT_TOP_K;
use pm_common::matching::RankedCandidate;

use crate::error::ApiError;
use crate::SharedState;

/// POST /match — rank the corpus against a free-text offer.
pub async fn run_match(
    State(state): State<SharedState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let ranked = execute_match(
        &state,
        request.offer_text,
        request.top_k,
        request.with_explanation,
    )
    .await?;
    Ok(Json(MatchResponse::from_ranked(&ranked)))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub top_k: Option<usize>,
}

/// POST /search — structured search; the request reduces to one canonical
/// query text, or 400 when no signal was supplied.
pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let query = request.canonical_query().ok_or_else(|| {
        ApiError::BadRequest(
            "veuillez fournir une description ou au moins un critère de recherche".into(),
        )
    })?;

    let top_k = params.top_k.unwrap_or(DEFAULT_TOP_K);
    let ranked = execute_match(&state, query, top_k, true).await?;
    Ok(Json(MatchResponse::from_ranked(&ranked)))
}

/// Pin a snapshot, then run the scoring pipeline on a blocking worker under
/// the request-scoped timeout. A timed-out computation is abandoned; no
/// partial result set is ever returned.
async fn execute_match(
    state: &SharedState,
    offer_text: String,
    top_k: usize,
    with_explanation: bool,
) -> Result<Vec<RankedCandidate>, ApiError> {
    let snapshot = state.corpus.snapshot()?;
    let engine = state.engine.clone();

    let task = tokio::task::spawn_blocking(move || {
        engine.match_offer(&snapshot, &offer_text, top_k, with_explanation)
    });

    let joined = timeout(state.match_timeout, task)
        .await
        .map_err(|_| ApiError::ServiceUnavailable("match timed out".into()))?
        .map_err(|err| ApiError::Internal(format!("match task failed: {err}")))?;

    Ok(joined?)
}
