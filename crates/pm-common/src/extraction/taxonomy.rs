use std::path::Path;

use tracing::{info, warn};

use crate::normalize::fold_text;

/// Fallback role keyword list, used when no taxonomy file is configured.
/// Ordered: first match wins.
pub const ROLE_KEYWORDS: &[&str] = &[
    "data scientist",
    "data engineer",
    "data analyst",
    "developpeur full stack",
    "developpeur front",
    "developpeur back",
    "developpeur",
    "devops",
    "architecte",
    "chef de projet",
    "product owner",
    "scrum master",
    "ingenieur",
    "administrateur systemes",
    "consultant",
    "testeur",
    "designer",
];

/// Known job-title taxonomy, loaded from an optional JSON file (array of
/// title strings). Missing or unreadable file degrades to the keyword
/// fallback; the service keeps running.
#[derive(Debug, Clone, Default)]
pub struct JobTaxonomy {
    titles: Vec<String>,
}

impl JobTaxonomy {
    pub fn new(titles: Vec<String>) -> Self {
        Self { titles }
    }

    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(titles) => {
                    info!(count = titles.len(), "job taxonomy loaded");
                    Self { titles }
                }
                Err(err) => {
                    warn!(error = %err, "invalid job taxonomy file; role detection degraded to keywords");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(error = %err, path = %path.display(), "job taxonomy file not readable; role detection degraded to keywords");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Match a role in free text: taxonomy titles first (longest first, so
    /// "développeur full stack" beats "développeur"), then the keyword
    /// fallback. First match wins; no match leaves the field unset.
    pub fn match_role(&self, text: &str) -> Option<String> {
        let folded = fold_text(text);

        let mut by_length: Vec<&String> = self.titles.iter().collect();
        by_length.sort_by_key(|t| std::cmp::Reverse(t.len()));
        for title in by_length {
            if folded.contains(&fold_text(title)) {
                return Some(title.clone());
            }
        }

        ROLE_KEYWORDS
            .iter()
            .find(|kw| folded.contains(*kw))
            .map(|kw| (*kw).to_string())
    }
}
