pub mod taxonomy;
pub mod vocabulary;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::fold_text;
use taxonomy::JobTaxonomy;

/// Structured signals heuristically extracted from an offer text.
///
/// Every field is best-effort: an absent signal means "unconstrained" and is
/// never treated as a negative filter by itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequirementRecord {
    pub role: Option<String>,
    pub location: Option<String>,
    pub degree: Option<String>,
    pub required_experience_years: Option<u32>,
    pub required_skills: Vec<String>,
    pub mobility_required: bool,
    pub remote_required: bool,
    pub immediate_required: bool,
}

lazy_static! {
    // "3 ans", "5 années", "2 years" — run against folded text.
    static ref EXPERIENCE_RE: Regex =
        Regex::new(r"(\d+)\s*(?:ans?\b|annees?\b|years?\b)").unwrap();

    // Preposition-anchored location: "à Paris", "au Havre", "basé à Lyon".
    // Runs against the raw text; the capitalized token keeps "à distance"
    // from matching.
    static ref LOCATION_RE: Regex =
        Regex::new(r"(?:\bà|\bau|\bbasée?\s+à|\bbase[e]?\s+a)\s+([A-ZÀÂÉÈÊÎÔÛ][\w'à-üÀ-Ü-]+)")
            .unwrap();

    // "bac+5", "bac + 3" — folded text.
    static ref BAC_LEVEL_RE: Regex = Regex::new(r"bac\s*\+\s*(\d)").unwrap();

    static ref MOBILITY_RE: Regex =
        Regex::new(r"\b(?:mobilite|mobile|deplacements?)\b").unwrap();
    static ref REMOTE_RE: Regex =
        Regex::new(r"\b(?:teletravail|remote|full\s+remote)\b|\ba\s+distance\b").unwrap();
    static ref IMMEDIATE_RE: Regex =
        Regex::new(r"\bimmediat|\basap\b|des\s+que\s+possible|au\s+plus\s+tot").unwrap();
}

/// Degree keyword list, ordered by precedence; first match wins.
const DEGREE_KEYWORDS: &[(&str, &str)] = &[
    ("doctorat", "doctorat"),
    ("phd", "doctorat"),
    ("mastere", "master"),
    ("master", "master"),
    ("ingenieur", "ingénieur"),
    ("licence", "licence"),
    ("bts", "bts"),
    ("dut", "dut"),
];

/// Parse an offer text into structured requirement signals.
///
/// Each signal is detected independently by ordered pattern or keyword
/// lists; the first match wins and no match leaves the field unset. This
/// function never fails.
pub fn extract_requirements(offer_text: &str, taxonomy: &JobTaxonomy) -> RequirementRecord {
    let folded = fold_text(offer_text);

    RequirementRecord {
        role: taxonomy.match_role(offer_text),
        location: extract_location(offer_text),
        degree: extract_degree(&folded),
        required_experience_years: extract_experience_years(&folded),
        required_skills: vocabulary::detect_skills(offer_text),
        mobility_required: MOBILITY_RE.is_match(&folded),
        remote_required: REMOTE_RE.is_match(&folded),
        immediate_required: IMMEDIATE_RE.is_match(&folded),
    }
}

fn extract_experience_years(folded: &str) -> Option<u32> {
    EXPERIENCE_RE
        .captures(folded)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_location(raw: &str) -> Option<String> {
    LOCATION_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_degree(folded: &str) -> Option<String> {
    if let Some(caps) = BAC_LEVEL_RE.captures(folded) {
        return Some(format!("bac+{}", &caps[1]));
    }
    DEGREE_KEYWORDS
        .iter()
        .find(|(kw, _)| folded.contains(kw))
        .map(|(_, canonical)| (*canonical).to_string())
}
