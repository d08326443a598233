pub mod explanation;
pub mod pipeline;
pub mod scoring;
pub mod weights;

pub use explanation::{generate_explanation, MatchExplanation};
pub use pipeline::{MatchEngine, RankedCandidate, DEFAULT_TOP_K};
pub use scoring::{CandidateScorer, ScoredCandidate};
pub use weights::ScoringConfig;
