use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use pm_api::{cors_layer, create_router, AppState};
use pm_common::corpus::CorpusService;
use pm_common::embedding::{create_provider, EmbeddingConfig, EmbeddingProvider};
use pm_common::extraction::taxonomy::JobTaxonomy;
use pm_common::logging;
use pm_common::matching::{MatchEngine, ScoringConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "pm-api", about = "HTTP API for the profile matching service")]
struct Cli {
    /// Server port
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Path to the profile seed file (JSON array). Missing file starts an
    /// empty corpus.
    #[arg(long, env = "PM_PROFILES_PATH")]
    profiles_path: Option<PathBuf>,

    /// Path to the job-title taxonomy file (JSON array of titles)
    #[arg(long, env = "PM_TAXONOMY_PATH")]
    taxonomy_path: Option<PathBuf>,

    /// Embedding provider name
    #[arg(long, env = "PM_EMBEDDER", default_value = "hash")]
    embedder: String,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "PM_CORS_ORIGINS", default_value = "http://localhost:3000")]
    cors_origins: String,

    /// Request-scoped timeout for match/search computations (ms)
    #[arg(long, env = "PM_MATCH_TIMEOUT_MS", default_value_t = 10_000)]
    match_timeout_ms: u64,
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_tracing_subscriber("pm-api");
    logging::install_tracing_panic_hook("pm-api");

    let cli = Cli::parse();

    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::from(create_provider(&cli.embedder, EmbeddingConfig::from_env()));
    let taxonomy = JobTaxonomy::load(cli.taxonomy_path.as_deref());

    let corpus = Arc::new(CorpusService::new(embedder.clone(), cli.profiles_path.clone()));
    let engine = Arc::new(MatchEngine::new(
        embedder.clone(),
        taxonomy,
        ScoringConfig::from_env(),
    ));

    // Load in the background; requests gate on readiness meanwhile.
    let loader = corpus.clone();
    tokio::task::spawn_blocking(move || {
        let _ = loader.load();
    });

    let state = Arc::new(AppState {
        corpus,
        engine,
        match_timeout: Duration::from_millis(cli.match_timeout_ms),
    });

    let origins = cli
        .cors_origins
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect::<Vec<_>>();

    let app = create_router(state).layer(cors_layer(&origins));

    let addr: SocketAddr = ([0, 0, 0, 0], cli.port).into();
    info!(%addr, embedder = embedder.name(), "pm-api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "pm-api failed");
        std::process::exit(1);
    }
}
