use serde::{Deserialize, Serialize};

use crate::corpus::{IngestOutcome, ProfileDraft};
use crate::{Availability, Mobility};

/// Add-profile request body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfileRequest {
    pub experience_years: u32,
    #[serde(default)]
    pub diploma: String,
    #[serde(default)]
    pub certifications: String,
    pub hard_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub mobility: Mobility,
    #[serde(default)]
    pub availability: Availability,
    /// Narrative work history.
    pub experiences: String,
    #[serde(default)]
    pub searched_role: Option<String>,
}

impl From<NewProfileRequest> for ProfileDraft {
    fn from(request: NewProfileRequest) -> Self {
        ProfileDraft {
            experience_years: request.experience_years,
            diploma: request.diploma,
            certifications: request.certifications,
            hard_skills: request.hard_skills,
            soft_skills: request.soft_skills,
            languages: request.languages,
            location: request.location,
            mobility: request.mobility,
            availability: request.availability,
            experiences: request.experiences,
            searched_role: request.searched_role,
        }
    }
}

/// Add-profile response. `status` is "success" for a clean append and
/// "degraded" when the durable store was updated but the live index was
/// not (the one-record skew is reported, never hidden).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub message: String,
    pub profile_id: u64,
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        if outcome.degraded {
            Self {
                status: "degraded".into(),
                message: format!(
                    "profil {} enregistré, mais l'index de recherche n'a pas pu être mis à jour ({})",
                    outcome.profile_id,
                    outcome.detail.as_deref().unwrap_or("raison inconnue"),
                ),
                profile_id: outcome.profile_id,
                ingested_at: outcome.ingested_at,
            }
        } else {
            Self {
                status: "success".into(),
                message: format!("profil {} ajouté avec succès", outcome.profile_id),
                profile_id: outcome.profile_id,
                ingested_at: outcome.ingested_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_outcome_is_reported() {
        let response = IngestResponse::from(IngestOutcome {
            profile_id: 42,
            ingested_at: chrono::Utc::now(),
            degraded: true,
            detail: Some("provider outage".into()),
        });

        assert_eq!(response.status, "degraded");
        assert!(response.message.contains("provider outage"));
    }

    #[test]
    fn request_converts_to_draft() {
        let raw = r#"{
            "experience_years": 6,
            "hard_skills": ["rust", "kubernetes"],
            "location": "Lyon",
            "mobility": "remote_open",
            "availability": "Immédiate",
            "experiences": "Développement de services backend"
        }"#;
        let request: NewProfileRequest = serde_json::from_str(raw).unwrap();
        let draft = ProfileDraft::from(request);

        assert_eq!(draft.mobility, Mobility::RemoteOpen);
        assert_eq!(draft.availability, Availability::Immediate);
        assert_eq!(draft.hard_skills.len(), 2);
    }
}
