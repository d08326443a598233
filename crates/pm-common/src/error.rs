use thiserror::Error;

/// Failures surfaced by the embedding provider seam.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
    #[error("embedding failed: {0}")]
    Failed(String),
}

/// Failures from the vector index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Failures while loading or rebuilding the corpus at startup.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read profile store: {0}")]
    Storage(String),
    #[error("failed to embed corpus: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Request-level taxonomy for the match/search path.
///
/// Extraction never raises — a missing signal is "unconstrained". Only
/// embedding calls, index operations and I/O reach this enum.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Models or index not loaded yet; retry-safe.
    #[error("corpus not ready: {0}")]
    NotReady(String),
    /// No usable query signal, or top_k < 1.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Unexpected failure during embedding or scoring. Never yields a
    /// partial result set.
    #[error("scoring failed: {0}")]
    Scoring(String),
}

impl From<EmbeddingError> for MatchError {
    fn from(value: EmbeddingError) -> Self {
        MatchError::Scoring(value.to_string())
    }
}

/// Failures on the add-profile ingestion path.
///
/// A partial failure (durable store updated, index append failed) is NOT an
/// error variant: the system keeps serving the prior index and reports the
/// skew as a degraded outcome, see `corpus::IngestOutcome`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("corpus not ready: {0}")]
    NotReady(String),
    #[error("profile store write failed: {0}")]
    Storage(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}
