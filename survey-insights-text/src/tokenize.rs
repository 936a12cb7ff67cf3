use once_cell::sync::Lazy;
use regex::Regex;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

/// Lowercase and strip punctuation.
pub fn normalize(text: &str) -> String {
    PUNCTUATION.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Normalized whitespace-separated tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Non-empty sentence fragments split on terminal punctuation.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether `phrase` (space-joined tokens) occurs as a contiguous run in `tokens`.
pub fn contains_phrase(tokens: &[String], phrase: &[&str]) -> bool {
    if phrase.is_empty() || tokens.len() < phrase.len() {
        return false;
    }
    tokens
        .windows(phrase.len())
        .any(|window| window.iter().zip(phrase).all(|(token, word)| token == word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Great app!! Don't change, PLEASE."),
            vec!["great", "app", "dont", "change", "please"]
        );
    }

    #[test]
    fn test_sentences() {
        assert_eq!(sentences("One. Two! Three?? "), vec!["One", "Two", "Three"]);
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_contains_phrase() {
        let tokens = tokenize("the customer support team was great");
        assert!(contains_phrase(&tokens, &["customer", "support"]));
        assert!(!contains_phrase(&tokens, &["support", "customer"]));
        assert!(!contains_phrase(&tokens, &[]));
    }
}
