use serde::{Deserialize, Serialize};

use crate::extraction::{vocabulary::normalize_skill_set, RequirementRecord};
use crate::normalize::contains_folded;
use crate::{Availability, Mobility, Profile};

const MAX_STRENGTHS: usize = 5;
const MAX_WEAKNESSES: usize = 3;

/// Human-readable match narrative, derived from the same signals as the
/// score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchExplanation {
    /// At most 5 entries, priority order.
    pub strengths: Vec<String>,
    /// At most 3 entries.
    pub weaknesses: Vec<String>,
    pub skills_score: f64,
    pub experience_score: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Experience tier label with years.
fn experience_strength(years: u32) -> String {
    if years >= 10 {
        format!("Expérience très solide ({years} ans)")
    } else if years >= 5 {
        format!("Expérience solide ({years} ans)")
    } else if years >= 3 {
        format!("Bonne expérience ({years} ans)")
    } else {
        format!("Profil junior ({years} ans d'expérience)")
    }
}

/// Build the strengths/weaknesses narrative for one candidate.
///
/// Truncation is deterministic: entries accumulate in a fixed priority
/// order and are cut at the hard caps.
pub fn generate_explanation(
    requirements: &RequirementRecord,
    profile: &Profile,
    skills_score: f64,
    exp_score: f64,
) -> MatchExplanation {
    let profile_skills = normalize_skill_set(&profile.hard_skills);
    let covers = |required: &str| {
        profile_skills
            .iter()
            .any(|ps| ps.contains(required) || required.contains(ps.as_str()))
    };

    let matched: Vec<&String> = requirements
        .required_skills
        .iter()
        .filter(|s| covers(s.as_str()))
        .collect();
    let missing: Vec<&String> = requirements
        .required_skills
        .iter()
        .filter(|s| !covers(s.as_str()))
        .collect();

    let location_satisfied = requirements
        .location
        .as_deref()
        .map(|loc| contains_folded(&profile.location, loc));

    let mut strengths = Vec::new();
    if !matched.is_empty() {
        let listed: Vec<&str> = matched.iter().take(5).map(|s| s.as_str()).collect();
        strengths.push(format!("Maîtrise de : {}", listed.join(", ")));
    }
    strengths.push(experience_strength(profile.experience_years));
    if location_satisfied == Some(true) {
        strengths.push(format!("Localisation compatible : {}", profile.location));
    }
    if requirements.mobility_required && profile.mobility == Mobility::Mobile {
        strengths.push("Ouvert à la mobilité".to_string());
    }
    if requirements.remote_required && profile.mobility == Mobility::RemoteOpen {
        strengths.push("Ouvert au télétravail".to_string());
    }
    if requirements.immediate_required && profile.availability == Availability::Immediate {
        strengths.push("Disponibilité immédiate".to_string());
    }
    if strengths.is_empty() {
        strengths.push("Profil correspondant aux critères généraux".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);

    let mut weaknesses = Vec::new();
    if !missing.is_empty() {
        let listed: Vec<&str> = missing.iter().take(3).map(|s| s.as_str()).collect();
        weaknesses.push(format!("Compétences à développer : {}", listed.join(", ")));
    }
    if location_satisfied == Some(false) {
        if let Some(loc) = &requirements.location {
            weaknesses.push(format!("Localisation éloignée de {loc}"));
        }
    }
    if requirements.mobility_required && profile.mobility != Mobility::Mobile {
        weaknesses.push("Mobilité géographique limitée".to_string());
    }
    if requirements.remote_required && profile.mobility != Mobility::RemoteOpen {
        weaknesses.push("Pas de télétravail déclaré".to_string());
    }
    if requirements.immediate_required && profile.availability != Availability::Immediate {
        weaknesses.push("Disponibilité non immédiate".to_string());
    }
    if weaknesses.is_empty() && (skills_score < 0.9 || exp_score < 0.9) {
        weaknesses.push("Quelques écarts mineurs avec l'offre".to_string());
    }
    weaknesses.truncate(MAX_WEAKNESSES);

    MatchExplanation {
        strengths,
        weaknesses,
        skills_score: round2(skills_score),
        experience_score: round2(exp_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> Profile {
        Profile {
            id: 1,
            experience_years: 6,
            hard_skills: vec!["python".into(), "django".into()],
            location: "Paris".into(),
            mobility: Mobility::Mobile,
            availability: Availability::Immediate,
            full_text: "Développeur Python Django à Paris".into(),
            ..Profile::default()
        }
    }

    #[test]
    fn matched_skills_lead_the_strengths() {
        let requirements = RequirementRecord {
            required_skills: vec!["python".into(), "django".into(), "aws".into()],
            ..RequirementRecord::default()
        };

        let explanation = generate_explanation(&requirements, &base_profile(), 0.8, 0.9);

        assert_eq!(explanation.strengths[0], "Maîtrise de : python, django");
        assert_eq!(explanation.weaknesses[0], "Compétences à développer : aws");
    }

    #[test]
    fn experience_tiers_follow_thresholds() {
        assert!(experience_strength(12).starts_with("Expérience très solide"));
        assert!(experience_strength(6).starts_with("Expérience solide"));
        assert!(experience_strength(3).starts_with("Bonne expérience"));
        assert!(experience_strength(1).starts_with("Profil junior"));
    }

    #[test]
    fn satisfied_requirements_confirm_strengths() {
        let requirements = RequirementRecord {
            location: Some("Paris".into()),
            mobility_required: true,
            immediate_required: true,
            ..RequirementRecord::default()
        };

        let explanation = generate_explanation(&requirements, &base_profile(), 0.95, 0.95);

        assert!(explanation
            .strengths
            .contains(&"Localisation compatible : Paris".to_string()));
        assert!(explanation.strengths.contains(&"Ouvert à la mobilité".to_string()));
        assert!(explanation
            .strengths
            .contains(&"Disponibilité immédiate".to_string()));
        assert!(explanation.weaknesses.is_empty());
    }

    #[test]
    fn caps_are_hard() {
        let requirements = RequirementRecord {
            required_skills: vec![
                "python".into(),
                "django".into(),
                "aws".into(),
                "kubernetes".into(),
                "terraform".into(),
                "ansible".into(),
                "gcp".into(),
            ],
            location: Some("Lyon".into()),
            mobility_required: true,
            remote_required: true,
            immediate_required: true,
            ..RequirementRecord::default()
        };
        let mut profile = base_profile();
        profile.mobility = Mobility::NotMobile;
        profile.availability = Availability::ThreeMonths;
        profile.location = "Lille".into();

        let explanation = generate_explanation(&requirements, &profile, 0.2, 0.2);

        assert!(explanation.strengths.len() <= 5);
        assert_eq!(explanation.weaknesses.len(), 3);
        // First-found order: missing skills, then the location mismatch.
        assert!(explanation.weaknesses[0].starts_with("Compétences à développer"));
        assert!(explanation.weaknesses[1].starts_with("Localisation éloignée"));
    }

    #[test]
    fn near_perfect_scores_leave_weaknesses_empty() {
        let explanation =
            generate_explanation(&RequirementRecord::default(), &base_profile(), 0.95, 0.92);
        assert!(explanation.weaknesses.is_empty());
    }

    #[test]
    fn generic_weakness_appears_under_low_scores() {
        let explanation =
            generate_explanation(&RequirementRecord::default(), &base_profile(), 0.4, 0.95);
        assert_eq!(
            explanation.weaknesses,
            vec!["Quelques écarts mineurs avec l'offre".to_string()]
        );
    }

    #[test]
    fn scores_are_rounded_to_two_decimals() {
        let explanation =
            generate_explanation(&RequirementRecord::default(), &base_profile(), 0.876543, 0.5);
        assert_eq!(explanation.skills_score, 0.88);
    }
}
