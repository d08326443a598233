use serde::{Deserialize, Serialize};

use crate::matching::explanation::MatchExplanation;
use crate::matching::pipeline::RankedCandidate;

/// One result row of a match/search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResult {
    pub id: u64,
    /// Final heuristic score, in [0, 1], 4 decimals.
    pub final_score: f64,
    pub experience_years: u32,
    /// Raw comma-joined skill text, kept flat for GUI consumption.
    pub hard_skills: String,
    pub location: String,
    pub full_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<MatchExplanation>,
}

impl From<&RankedCandidate> for ProfileResult {
    fn from(ranked: &RankedCandidate) -> Self {
        Self {
            id: ranked.profile.id,
            final_score: ranked.score.final_score,
            experience_years: ranked.profile.experience_years,
            hard_skills: ranked.profile.hard_skills_text(),
            location: ranked.profile.location.clone(),
            full_text: ranked.profile.full_text.clone(),
            explanation: ranked.explanation.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub results: Vec<ProfileResult>,
}

impl MatchResponse {
    pub fn from_ranked(ranked: &[RankedCandidate]) -> Self {
        Self {
            results: ranked.iter().map(ProfileResult::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scoring::ScoredCandidate;
    use crate::Profile;

    #[test]
    fn explanation_is_omitted_from_json_when_absent() {
        let ranked = RankedCandidate {
            profile: Profile {
                id: 7,
                experience_years: 4,
                hard_skills: vec!["python".into(), "docker".into()],
                location: "Paris".into(),
                full_text: "Développeur Python".into(),
                ..Profile::default()
            },
            score: ScoredCandidate {
                position: 0,
                retrieval_rank: 0,
                retrieval_score: 0.9,
                skills_score: 0.8,
                exp_score: 0.7,
                bonus: 0.0,
                malus: 0.0,
                final_score: 0.75,
            },
            explanation: None,
        };

        let json = serde_json::to_value(ProfileResult::from(&ranked)).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["hard_skills"], "python, docker");
        assert!(json.get("explanation").is_none());
    }
}
