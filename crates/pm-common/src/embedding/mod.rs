pub mod config;
pub mod hash_provider;
pub mod similarity;
pub mod tokenizer;

pub use config::EmbeddingConfig;
pub use hash_provider::HashEmbedder;
pub use similarity::{cosine_similarity, inner_product, l2_normalize};

use crate::error::EmbeddingError;
use tracing::warn;

/// Abstraction over the text → vector collaborator.
///
/// Contract: deterministic for identical text and identical (name, version)
/// pair; returned vectors are unit-normalized and `dimension()` long.
///
/// Implementations:
/// - HashEmbedder: feature hashing, deterministic, no model download
///
/// `embed` is fallible because production providers sit behind a network
/// or a model runtime.
pub trait EmbeddingProvider: Send + Sync {
    /// Implementation name ("hash", ...).
    fn name(&self) -> &'static str;

    /// Version tag for model generation management.
    fn version(&self) -> &str;

    /// Embedding dimension.
    fn dimension(&self) -> usize;

    /// Embed a single text span.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed many spans. Default implementation loops; batch-capable
    /// providers should override.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Provider factory. Unknown names fall back to the hash provider so a
/// misconfigured deployment still serves.
pub fn create_provider(name: &str, config: EmbeddingConfig) -> Box<dyn EmbeddingProvider> {
    match name {
        "hash" => Box::new(HashEmbedder::new(config)),
        other => {
            warn!(provider = other, "unknown embedding provider; using hash");
            Box::new(HashEmbedder::new(config))
        }
    }
}
