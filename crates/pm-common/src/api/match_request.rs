use serde::Deserialize;

use crate::matching::pipeline::DEFAULT_TOP_K;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_true() -> bool {
    true
}

/// Free-text match request.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub offer_text: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_true")]
    pub with_explanation: bool,
}

/// Structured search request. Free text and structured fields are mutually
/// exclusive fallbacks: `description` wins when present, otherwise the
/// fields are concatenated into labeled segments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
}

impl SearchRequest {
    /// Reduce the request to one canonical query text. `None` when no
    /// usable signal was supplied.
    pub fn canonical_query(&self) -> Option<String> {
        if let Some(description) = &self.description {
            let trimmed = description.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }

        let labeled = [
            ("Poste", &self.role),
            ("Compétences", &self.skills),
            ("Expérience", &self.experience),
            ("Localisation", &self.location),
            ("Type de contrat", &self.contract_type),
            ("Salaire", &self.salary),
        ];

        let parts: Vec<String> = labeled
            .iter()
            .filter_map(|(label, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{label}: {v}"))
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" - "))
        }
    }
}
