use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use strsim::damerau_levenshtein;

use crate::normalize::fold_text;

/// Technical-skill vocabulary used for substring detection in offer text.
/// Entries are pre-folded (lowercase, no accents). Multi-word entries first
/// so "machine learning" wins before "machine" would ever be considered.
pub const TECH_SKILLS: &[&str] = &[
    "machine learning",
    "deep learning",
    "natural language processing",
    "computer vision",
    "intelligence artificielle",
    "scikit-learn",
    "tensorflow",
    "pytorch",
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "php",
    "ruby",
    "golang",
    "rust",
    "react",
    "angular",
    "vue.js",
    "node.js",
    "django",
    "flask",
    "spring",
    "express",
    "sql",
    "nosql",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "elasticsearch",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "ansible",
    "git",
    "ci/cd",
    "jenkins",
    "gitlab",
    "github",
    "agile",
    "scrum",
    "devops",
    "microservices",
    "graphql",
    "rest",
    "api",
];

/// Alias → canonical skill mapping (O(1) lookup), folded forms.
static ALIAS_TO_CANONICAL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        ("javascript", &["js", "ecmascript", "es6"]),
        ("typescript", &["ts"]),
        ("python", &["py", "python3"]),
        ("react", &["reactjs", "react.js"]),
        ("vue.js", &["vue", "vuejs"]),
        ("node.js", &["node", "nodejs"]),
        ("machine learning", &["ml"]),
        ("intelligence artificielle", &["ai", "ia"]),
        ("deep learning", &["dl"]),
        ("natural language processing", &["nlp"]),
        ("computer vision", &["vision par ordinateur"]),
        ("postgresql", &["postgres", "pg"]),
        ("mongodb", &["mongo"]),
        ("aws", &["amazon web services"]),
        ("gcp", &["google cloud platform", "google cloud"]),
        ("azure", &["microsoft azure"]),
        ("kubernetes", &["k8s", "kube"]),
        ("golang", &["go"]),
        ("c#", &["csharp", ".net", "dotnet"]),
        ("c++", &["cpp"]),
        ("ci/cd", &["cicd"]),
    ];

    let mut map = HashMap::new();
    for (canonical, list) in aliases {
        map.insert(*canonical, *canonical);
        for alias in *list {
            map.insert(*alias, *canonical);
        }
    }
    map
});

/// Edit distance 1 is tolerated against long canonical names so "postgre"
/// or "kuberntes" still normalize; short names stay exact to avoid
/// go/php-style collisions.
const FUZZY_MIN_LEN: usize = 6;

/// Normalize one raw skill string to its canonical form.
pub fn normalize_skill(raw: &str) -> String {
    let folded = fold_text(raw.trim());
    if folded.is_empty() {
        return folded;
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(folded.as_str()) {
        return (*canonical).to_string();
    }

    if folded.len() >= FUZZY_MIN_LEN {
        for canonical in TECH_SKILLS {
            if canonical.len() >= FUZZY_MIN_LEN && damerau_levenshtein(&folded, canonical) <= 1 {
                return (*canonical).to_string();
            }
        }
    }

    folded
}

/// Normalize and dedup a skill list.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Detect vocabulary skills mentioned in free text, case- and
/// accent-insensitive substring match, vocabulary order, deduped.
pub fn detect_skills(text: &str) -> Vec<String> {
    let folded = fold_text(text);
    let mut found = Vec::new();
    for skill in TECH_SKILLS {
        if folded.contains(skill) && !found.iter().any(|f: &String| f == skill) {
            found.push((*skill).to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_skills_case_insensitive() {
        let skills = detect_skills("Développeur PYTHON avec Docker et Kubernetes");
        assert_eq!(skills, vec!["python", "docker", "kubernetes"]);
    }

    #[test]
    fn detects_multiword_skills() {
        let skills = detect_skills("Expérience en machine learning exigée");
        assert!(skills.contains(&"machine learning".to_string()));
    }

    #[test]
    fn normalizes_aliases() {
        assert_eq!(normalize_skill("JS"), "javascript");
        assert_eq!(normalize_skill("K8s"), "kubernetes");
        assert_eq!(normalize_skill("Node"), "node.js");
    }

    #[test]
    fn fuzzy_tolerates_one_edit_on_long_names() {
        assert_eq!(normalize_skill("kuberntes"), "kubernetes");
        assert_eq!(normalize_skill("postgresq"), "postgresql");
    }

    #[test]
    fn short_names_stay_exact() {
        // One edit away from "git" but too short for fuzzy matching.
        assert_eq!(normalize_skill("gi"), "gi");
    }

    #[test]
    fn normalize_set_dedups_aliases() {
        let set = normalize_skill_set(&[
            "JS".to_string(),
            "javascript".to_string(),
            "React.js".to_string(),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("javascript"));
        assert!(set.contains("react"));
    }
}
