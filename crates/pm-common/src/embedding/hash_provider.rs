use super::{similarity::l2_normalize, tokenizer, EmbeddingConfig, EmbeddingProvider};
use crate::error::EmbeddingError;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// Fixed seeds keep the hash deterministic across processes and Rust
/// versions. Changing them changes every embedding: bump `version()`.
const HASH_SEED_K0: u64 = 0x7f4a_9c31_e85b_d200;
const HASH_SEED_K1: u64 = 0x002d_b58e_13c9_a4f7;

/// Deterministic feature-hashing embedder.
///
/// - no training, no model download
/// - O(n) in token count
/// - SipHash13 with fixed seeds for cross-build stability
///
/// Identical text always maps to the identical unit vector, which is the
/// collaborator contract the retrieval layer relies on.
pub struct HashEmbedder {
    config: EmbeddingConfig,
}

impl HashEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut cfg = config;
        cfg.dimension = cfg.dimension.max(1);
        Self { config: cfg }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.config.dimension
    }

    fn tokens_to_vector(&self, tokens: &[tokenizer::WeightedToken]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.config.dimension];

        for wt in tokens {
            let idx = self.hash_token(&wt.token);
            // Sign hashing: even hash of the sign key adds, odd subtracts.
            let sign = if self.hash_token(&format!("{}_sign", wt.token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign * wt.weight;
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl EmbeddingProvider for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        // Bump when the tokenizer or hash seeds change.
        "v1"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let tokens = tokenizer::tokenize_text(text);
        Ok(self.tokens_to_vector(&tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedder() -> HashEmbedder {
        HashEmbedder::new(EmbeddingConfig::default())
    }

    #[test]
    fn produces_normalized_vectors() {
        let emb = embedder().embed("Développeur Python avec 5 ans d'expérience").unwrap();

        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "L2 norm should be 1.0, got {norm}");
    }

    #[test]
    fn identical_text_is_deterministic() {
        let a = embedder().embed("Data engineer Spark AWS").unwrap();
        let b = embedder().embed("Data engineer Spark AWS").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn similar_texts_score_higher_than_unrelated() {
        let e = embedder();
        let offer = e.embed("python django postgresql docker").unwrap();
        let close = e.embed("python django postgresql kubernetes").unwrap();
        let far = e.embed("plombier chauffagiste zinguerie").unwrap();

        let sim_close = crate::embedding::similarity::inner_product(&offer, &close);
        let sim_far = crate::embedding::similarity::inner_product(&offer, &far);

        assert!(
            sim_close > sim_far,
            "related text should score higher: {sim_close} vs {sim_far}"
        );
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let emb = embedder().embed("").unwrap();
        assert!(emb.iter().all(|v| *v == 0.0));
    }
}
