/// Heuristic scoring constants.
///
/// The bonus/malus values carry no analytic derivation; they are the tuned
/// production values, kept as named parameters with env overrides rather
/// than literals in the scoring path.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Weight of the skills sub-score in the base score.
    pub skills_weight: f64,
    /// Weight of the experience sub-score in the base score. Equal
    /// weighting is deliberate: transparent over learned.
    pub experience_weight: f64,
    /// Bonus when the extracted role token appears in the candidate's
    /// searched role or full text.
    pub role_bonus: f64,
    /// Bonus when the extracted location token appears in the candidate's
    /// location or full text.
    pub location_bonus: f64,
    /// Bonus per required-skill token found in the candidate full text.
    pub skill_bonus_per_match: f64,
    /// Cap on the accumulated skill bonus.
    pub skill_bonus_cap: f64,
    /// Malus when a required location is absent from the candidate location.
    pub location_malus: f64,
    /// Malus when mobility is required and the candidate is not Mobile.
    pub mobility_malus: f64,
    /// Malus when remote is required and the candidate is not RemoteOpen.
    pub remote_malus: f64,
    /// Malus when immediate availability is required and the candidate is
    /// not Immediate.
    pub availability_malus: f64,
    /// Divisor normalizing candidate years when the offer names no numeric
    /// requirement (20 years saturates the scale).
    pub open_experience_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skills_weight: 0.5,
            experience_weight: 0.5,
            role_bonus: 0.08,
            location_bonus: 0.04,
            skill_bonus_per_match: 0.03,
            skill_bonus_cap: 0.12,
            location_malus: 0.15,
            mobility_malus: 0.10,
            remote_malus: 0.10,
            availability_malus: 0.10,
            open_experience_ceiling: 20.0,
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl ScoringConfig {
    /// Read overrides from the environment, falling back to the production
    /// defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            skills_weight: env_f64("PM_SKILLS_WEIGHT", d.skills_weight),
            experience_weight: env_f64("PM_EXPERIENCE_WEIGHT", d.experience_weight),
            role_bonus: env_f64("PM_ROLE_BONUS", d.role_bonus),
            location_bonus: env_f64("PM_LOCATION_BONUS", d.location_bonus),
            skill_bonus_per_match: env_f64("PM_SKILL_BONUS_PER_MATCH", d.skill_bonus_per_match),
            skill_bonus_cap: env_f64("PM_SKILL_BONUS_CAP", d.skill_bonus_cap),
            location_malus: env_f64("PM_LOCATION_MALUS", d.location_malus),
            mobility_malus: env_f64("PM_MOBILITY_MALUS", d.mobility_malus),
            remote_malus: env_f64("PM_REMOTE_MALUS", d.remote_malus),
            availability_malus: env_f64("PM_AVAILABILITY_MALUS", d.availability_malus),
            open_experience_ceiling: env_f64(
                "PM_OPEN_EXPERIENCE_CEILING",
                d.open_experience_ceiling,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_weights_sum_to_one() {
        let config = ScoringConfig::default();
        assert!((config.skills_weight + config.experience_weight - 1.0).abs() < 1e-9);
    }

    #[test]
    fn skill_bonus_cap_is_a_multiple_of_the_step() {
        let config = ScoringConfig::default();
        let steps = config.skill_bonus_cap / config.skill_bonus_per_match;
        assert!((steps - steps.round()).abs() < 1e-9);
    }
}
