use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::explanation::{generate_explanation, MatchExplanation};
use super::scoring::{CandidateScorer, ScoredCandidate};
use super::weights::ScoringConfig;
use crate::corpus::CorpusSnapshot;
use crate::embedding::{similarity::inner_product, similarity::l2_normalize, EmbeddingProvider};
use crate::error::MatchError;
use crate::extraction::{extract_requirements, taxonomy::JobTaxonomy};
use crate::Profile;

pub const DEFAULT_TOP_K: usize = 7;

/// Retrieval over-fetch: the scorer re-ranks a pool five times larger than
/// the requested page, bounded by the corpus size.
pub const OVERFETCH_FACTOR: usize = 5;

/// One ranked result: the profile, its scoring breakdown, and the optional
/// narrative.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub profile: Profile,
    pub score: ScoredCandidate,
    pub explanation: Option<MatchExplanation>,
}

/// The retrieval–scoring–explanation pipeline.
///
/// Holds no corpus state: callers pass the snapshot their request pinned,
/// so a concurrent append never shifts positions mid-request.
pub struct MatchEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    taxonomy: JobTaxonomy,
    scorer: CandidateScorer,
}

impl MatchEngine {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        taxonomy: JobTaxonomy,
        config: ScoringConfig,
    ) -> Self {
        Self {
            embedder,
            taxonomy,
            scorer: CandidateScorer::new(config),
        }
    }

    pub fn taxonomy(&self) -> &JobTaxonomy {
        &self.taxonomy
    }

    /// Rank the corpus against one offer.
    ///
    /// Every candidate in the over-fetched pool is scored and kept — a
    /// candidate is only ever excluded by the pool bound, never by a
    /// criteria mismatch. Sorting is stable on final_score descending, so
    /// exact ties resolve to retrieval rank.
    pub fn match_offer(
        &self,
        snapshot: &CorpusSnapshot,
        offer_text: &str,
        top_k: usize,
        with_explanation: bool,
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        let offer_text = offer_text.trim();
        if offer_text.is_empty() {
            return Err(MatchError::InvalidRequest("offer text is empty".into()));
        }
        if top_k < 1 {
            return Err(MatchError::InvalidRequest("top_k must be >= 1".into()));
        }

        let corpus_size = snapshot.store.len();
        if corpus_size == 0 {
            return Ok(Vec::new());
        }

        let requirements = extract_requirements(offer_text, &self.taxonomy);
        debug!(?requirements, "extracted offer requirements");

        let mut offer_vector = self.embedder.embed(offer_text)?;
        l2_normalize(&mut offer_vector);

        let skills_text = if requirements.required_skills.is_empty() {
            offer_text.to_string()
        } else {
            requirements.required_skills.join(", ")
        };
        let mut offer_skills_vector = self.embedder.embed(&skills_text)?;
        l2_normalize(&mut offer_skills_vector);

        let pool = top_k.saturating_mul(OVERFETCH_FACTOR).min(corpus_size);
        let hits = snapshot.index.search(&offer_vector, pool);

        let mut ranked = Vec::with_capacity(hits.len());
        for (retrieval_rank, hit) in hits.iter().enumerate() {
            let profile = snapshot.store.get(hit.position).ok_or_else(|| {
                MatchError::Scoring(format!(
                    "index position {} outside profile store",
                    hit.position
                ))
            })?;

            let skills_similarity = snapshot
                .skills
                .vector(hit.position)
                .map(|row| inner_product(&offer_skills_vector, row));

            let score = self.scorer.score(
                &requirements,
                profile,
                skills_similarity,
                retrieval_rank,
                hit.score,
                hit.position,
            );
            let explanation = with_explanation.then(|| {
                generate_explanation(&requirements, profile, score.skills_score, score.exp_score)
            });

            ranked.push(RankedCandidate {
                profile: profile.clone(),
                score,
                explanation,
            });
        }

        // Stable sort: pool order is retrieval order, so exact score ties
        // keep their retrieval rank.
        ranked.sort_by(|a, b| {
            b.score
                .final_score
                .partial_cmp(&a.score.final_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(top_k.min(corpus_size));

        Ok(ranked)
    }
}
