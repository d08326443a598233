use crate::normalize::fold_text;

/// Weighted token.
#[derive(Debug, Clone)]
pub struct WeightedToken {
    pub token: String,
    pub weight: f32,
}

impl WeightedToken {
    pub fn new(token: impl Into<String>, weight: f32) -> Self {
        Self {
            token: token.into(),
            weight,
        }
    }
}

const UNIGRAM_WEIGHT: f32 = 1.0;
/// Bigrams carry word-order context at half the unigram weight.
const BIGRAM_WEIGHT: f32 = 0.5;

fn is_token_char(c: char) -> bool {
    // '+' and '#' keep c++/c# as single tokens.
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Free-text tokenizer for offers and profile descriptions.
///
/// Accent-folded lowercase unigrams plus adjacent bigrams; single-character
/// tokens are dropped except digits (experience years are signal).
pub fn tokenize_text(text: &str) -> Vec<WeightedToken> {
    let folded = fold_text(text);
    let words: Vec<&str> = folded
        .split(|c: char| !is_token_char(c))
        .filter(|w| !w.is_empty())
        .filter(|w| w.len() > 1 || w.chars().all(|c| c.is_ascii_digit()))
        .collect();

    let mut tokens = Vec::with_capacity(words.len() * 2);
    for word in &words {
        tokens.push(WeightedToken::new(*word, UNIGRAM_WEIGHT));
    }
    for pair in words.windows(2) {
        tokens.push(WeightedToken::new(
            format!("{}_{}", pair[0], pair[1]),
            BIGRAM_WEIGHT,
        ));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_accented_text() {
        let tokens = tokenize_text("Développeur Python confirmé");
        let unigrams: Vec<&str> = tokens
            .iter()
            .filter(|t| t.weight == UNIGRAM_WEIGHT)
            .map(|t| t.token.as_str())
            .collect();

        assert_eq!(unigrams, vec!["developpeur", "python", "confirme"]);
    }

    #[test]
    fn keeps_symbolic_language_names() {
        let tokens = tokenize_text("C++ et C# demandés");
        assert!(tokens.iter().any(|t| t.token == "c++"));
        assert!(tokens.iter().any(|t| t.token == "c#"));
    }

    #[test]
    fn emits_bigrams_with_lower_weight() {
        let tokens = tokenize_text("machine learning");
        let bigram = tokens
            .iter()
            .find(|t| t.token == "machine_learning")
            .expect("bigram present");

        assert_eq!(bigram.weight, BIGRAM_WEIGHT);
    }

    #[test]
    fn keeps_bare_digits() {
        let tokens = tokenize_text("5 ans");
        assert!(tokens.iter().any(|t| t.token == "5"));
    }
}
