pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::header::{HeaderValue, CONTENT_TYPE},
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use pm_common::corpus::CorpusService;
use pm_common::matching::MatchEngine;

pub struct AppState {
    pub corpus: Arc<CorpusService>,
    pub engine: Arc<MatchEngine>,
    /// Request-scoped bound on embedding and scoring work.
    pub match_timeout: Duration,
}

pub type SharedState = Arc<AppState>;

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/livez", get(handlers::health::livez))
        .route("/readyz", get(handlers::health::readyz))
        .route("/match", post(handlers::matching::run_match))
        .route("/search", post(handlers::matching::search))
        .route("/profiles", post(handlers::profiles::add_profile))
        .route("/jobs", get(handlers::profiles::list_jobs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Ready-to-serve state over an in-memory corpus, for integration tests.
pub fn test_state(profiles: Vec<pm_common::Profile>) -> SharedState {
    use pm_common::embedding::{EmbeddingConfig, HashEmbedder};
    use pm_common::extraction::taxonomy::JobTaxonomy;
    use pm_common::matching::ScoringConfig;
    use pm_common::store::ProfileStore;

    let embedder: Arc<dyn pm_common::embedding::EmbeddingProvider> =
        Arc::new(HashEmbedder::new(EmbeddingConfig { dimension: 128 }));

    let corpus = Arc::new(
        CorpusService::from_store(embedder.clone(), ProfileStore::new(profiles))
            .expect("in-memory corpus build cannot fail"),
    );

    let engine = Arc::new(MatchEngine::new(
        embedder,
        JobTaxonomy::default(),
        ScoringConfig::default(),
    ));

    Arc::new(AppState {
        corpus,
        engine,
        match_timeout: Duration::from_secs(5),
    })
}
