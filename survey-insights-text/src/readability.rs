use crate::tokenize::{sentences, tokenize};

/// Syllable estimation strategy used by the readability score.
pub trait SyllableCounter: Send + Sync + std::fmt::Debug {
    fn count(&self, word: &str) -> usize;
}

/// Counts vowel groups, dropping a silent trailing `e`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelGroupSyllables;

impl SyllableCounter for VowelGroupSyllables {
    fn count(&self, word: &str) -> usize {
        let letters: Vec<char> = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        if letters.is_empty() {
            return 0;
        }
        if letters.len() <= 3 {
            return 1;
        }

        let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        let mut groups = 0;
        let mut previous_vowel = false;
        for &c in &letters {
            let vowel = is_vowel(c);
            if vowel && !previous_vowel {
                groups += 1;
            }
            previous_vowel = vowel;
        }

        let n = letters.len();
        let silent_e = letters[n - 1] == 'e' && !(letters[n - 2] == 'l' && !is_vowel(letters[n - 3]));
        if silent_e && groups > 1 {
            groups -= 1;
        }
        groups.max(1)
    }
}

/// Flesch reading ease for one text, clamped to [0, 100]; `None` when the text has no words.
pub fn flesch_reading_ease(text: &str, syllables: &dyn SyllableCounter) -> Option<f64> {
    let words = tokenize(text);
    if words.is_empty() {
        return None;
    }

    let sentence_count = sentences(text).len().max(1) as f64;
    let word_count = words.len() as f64;
    let syllable_count: usize = words.iter().map(|w| syllables.count(w).max(1)).sum();

    let score = 206.835
        - 1.015 * (word_count / sentence_count)
        - 84.6 * (syllable_count as f64 / word_count);
    Some(score.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_groups() {
        let counter = VowelGroupSyllables;
        assert_eq!(counter.count("cat"), 1);
        assert_eq!(counter.count("table"), 2);
        assert_eq!(counter.count("make"), 1);
        assert_eq!(counter.count("beautiful"), 3);
        assert_eq!(counter.count("readability"), 5);
        assert_eq!(counter.count("123"), 0);
    }

    #[test]
    fn test_simple_text_is_easy() {
        let score = flesch_reading_ease("The cat sat. The dog ran.", &VowelGroupSyllables).unwrap();
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_no_words() {
        assert_eq!(flesch_reading_ease("?!", &VowelGroupSyllables), None);
    }
}
