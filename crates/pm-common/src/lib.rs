pub mod api;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod extraction;
pub mod index;
pub mod logging;
pub mod matching;
pub mod normalize;
pub mod store;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Geographic mobility declared by a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mobility {
    #[serde(alias = "Mobile")]
    Mobile,
    #[default]
    #[serde(alias = "Non mobile", alias = "Sédentaire")]
    NotMobile,
    #[serde(alias = "Remote", alias = "Télétravail")]
    RemoteOpen,
}

/// How soon a candidate can start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    #[serde(alias = "Immédiate", alias = "Immediate")]
    Immediate,
    #[default]
    #[serde(alias = "1 mois", alias = "Sous 1 mois")]
    OneMonth,
    #[serde(alias = "3 mois", alias = "Sous 3 mois")]
    ThreeMonths,
}

impl Mobility {
    /// French display label, used when composing profile full text.
    pub fn label(&self) -> &'static str {
        match self {
            Mobility::Mobile => "Mobile",
            Mobility::NotMobile => "Non mobile",
            Mobility::RemoteOpen => "Télétravail",
        }
    }
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Immediate => "Immédiate",
            Availability::OneMonth => "Sous 1 mois",
            Availability::ThreeMonths => "Sous 3 mois",
        }
    }
}

/// A candidate profile. Immutable once created; the store only appends.
///
/// The two precomputed embeddings (full text, skills-only) are not stored
/// here — they live in the corpus snapshot's position-aligned matrices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub experience_years: u32,
    #[serde(default)]
    pub hard_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mobility: Mobility,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub diploma: String,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub searched_role: Option<String>,
    /// Canonical descriptive text, the retrieval unit for the full-text
    /// embedding.
    pub full_text: String,
}

impl Profile {
    /// Raw comma-joined skill list, the shape result rows expose.
    pub fn hard_skills_text(&self) -> String {
        self.hard_skills.join(", ")
    }

    /// Skills-only text used for the skills embedding.
    pub fn skills_text(&self) -> String {
        self.hard_skills_text()
    }
}
