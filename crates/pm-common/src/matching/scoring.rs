use super::weights::ScoringConfig;
use crate::extraction::RequirementRecord;
use crate::normalize::contains_folded;
use crate::{Availability, Mobility, Profile};

/// Per-candidate scoring breakdown. `final_score` is always in [0, 1],
/// rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Position in the store/index (the join key).
    pub position: usize,
    /// Rank in the retrieval pool; the deterministic tie-breaker.
    pub retrieval_rank: usize,
    /// Raw inner-product score from the vector index.
    pub retrieval_score: f32,
    pub skills_score: f64,
    pub exp_score: f64,
    pub bonus: f64,
    pub malus: f64,
    pub final_score: f64,
}

/// Round to 4 decimals, the precision final scores are reported at.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Heuristic scorer over the retrieval pool. Purely additive: a candidate
/// is never dropped for failing a soft requirement, only re-ranked.
pub struct CandidateScorer {
    config: ScoringConfig,
}

impl CandidateScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score one retrieved candidate against the extracted requirements.
    ///
    /// `skills_similarity` is the raw cosine between the offer skills
    /// vector and the candidate skills vector; `None` when skills
    /// embeddings are unavailable.
    pub fn score(
        &self,
        requirements: &RequirementRecord,
        profile: &Profile,
        skills_similarity: Option<f32>,
        retrieval_rank: usize,
        retrieval_score: f32,
        position: usize,
    ) -> ScoredCandidate {
        let skills_score = skills_similarity
            .map(|sim| (sim as f64).clamp(0.0, 1.0))
            .unwrap_or(0.0);
        let exp_score = self.experience_score(
            profile.experience_years,
            requirements.required_experience_years,
        );

        let base_score =
            self.config.skills_weight * skills_score + self.config.experience_weight * exp_score;
        let bonus = self.bonus(requirements, profile);
        let malus = self.malus(requirements, profile);
        let final_score = round4((base_score + bonus - malus).clamp(0.0, 1.0));

        ScoredCandidate {
            position,
            retrieval_rank,
            retrieval_score,
            skills_score,
            exp_score,
            bonus,
            malus,
            final_score,
        }
    }

    /// Experience sub-score.
    ///
    /// With a requirement R: meeting it lands at 0.8 and each extra year
    /// adds 0.05 up to 1.0; falling short scales linearly under a 0.7
    /// ceiling. Without a requirement, years normalize against the open
    /// ceiling (20 by default).
    pub fn experience_score(&self, candidate_years: u32, required_years: Option<u32>) -> f64 {
        let years = candidate_years as f64;
        match required_years {
            Some(required) => {
                let required_f = required as f64;
                if candidate_years >= required {
                    (0.8 + 0.05 * (years - required_f)).min(1.0)
                } else if required == 0 {
                    0.0
                } else {
                    ((years / required_f) * 0.7).max(0.0)
                }
            }
            None => (years / self.config.open_experience_ceiling).min(1.0),
        }
    }

    fn bonus(&self, requirements: &RequirementRecord, profile: &Profile) -> f64 {
        let mut bonus = 0.0;

        if let Some(role) = &requirements.role {
            let in_title = profile
                .searched_role
                .as_deref()
                .is_some_and(|title| contains_folded(title, role));
            if in_title || contains_folded(&profile.full_text, role) {
                bonus += self.config.role_bonus;
            }
        }

        if let Some(location) = &requirements.location {
            if contains_folded(&profile.location, location)
                || contains_folded(&profile.full_text, location)
            {
                bonus += self.config.location_bonus;
            }
        }

        let mut skill_bonus = 0.0;
        for skill in &requirements.required_skills {
            if contains_folded(&profile.full_text, skill) {
                skill_bonus += self.config.skill_bonus_per_match;
            }
        }
        bonus + skill_bonus.min(self.config.skill_bonus_cap)
    }

    fn malus(&self, requirements: &RequirementRecord, profile: &Profile) -> f64 {
        let mut malus = 0.0;

        if let Some(location) = &requirements.location {
            if !contains_folded(&profile.location, location) {
                malus += self.config.location_malus;
            }
        }
        if requirements.mobility_required && profile.mobility != Mobility::Mobile {
            malus += self.config.mobility_malus;
        }
        if requirements.remote_required && profile.mobility != Mobility::RemoteOpen {
            malus += self.config.remote_malus;
        }
        if requirements.immediate_required && profile.availability != Availability::Immediate {
            malus += self.config.availability_malus;
        }

        malus
    }
}
