#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Embedding dimension (powers of two recommended: 256, 512, 1024).
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dimension: 256 }
    }
}

impl EmbeddingConfig {
    /// Read the config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            dimension: std::env::var("PM_EMBED_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
        }
    }
}
