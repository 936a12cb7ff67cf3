use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::lexicon::LexiconStore;
use crate::readability::{flesch_reading_ease, SyllableCounter, VowelGroupSyllables};
use crate::tokenize::tokenize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCloudEntry {
    pub text: String,
    pub value: usize,
}

/// Stop-word-filtered counts that can be summed across questions before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: BTreeMap<String, usize>,
}

impl WordCounts {
    pub fn merge(&mut self, other: &WordCounts) {
        for (word, count) in &other.counts {
            *self.counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Top `max_words` by descending count, ties alphabetical.
    pub fn ranked(&self, max_words: usize) -> Vec<WordCloudEntry> {
        let mut entries: Vec<(&String, &usize)> = self.counts.iter().collect();
        // BTreeMap order is alphabetical, so a stable sort keeps ties alphabetical.
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .take(max_words)
            .map(|(word, count)| WordCloudEntry {
                text: word.clone(),
                value: *count,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub total_responses: usize,
    pub total_words: usize,
    pub average_words_per_response: f64,
    pub unique_words: usize,
    pub vocabulary_diversity: f64,
    pub readability: f64,
}

/// Word clouds, vocabulary diversity and readability.
#[derive(Debug, Clone)]
pub struct WordFrequencyAnalyzer {
    lexicon: Arc<LexiconStore>,
    min_word_length: usize,
    syllables: Arc<dyn SyllableCounter>,
}

impl WordFrequencyAnalyzer {
    pub fn new(lexicon: Arc<LexiconStore>, min_word_length: usize) -> Self {
        Self::with_syllable_counter(lexicon, min_word_length, Arc::new(VowelGroupSyllables))
    }

    pub fn with_syllable_counter(
        lexicon: Arc<LexiconStore>,
        min_word_length: usize,
        syllables: Arc<dyn SyllableCounter>,
    ) -> Self {
        Self {
            lexicon,
            min_word_length,
            syllables,
        }
    }

    pub fn word_counts<S: AsRef<str>>(&self, texts: &[S]) -> WordCounts {
        let mut counts = BTreeMap::new();
        for text in texts {
            for token in tokenize(text.as_ref()) {
                if self.is_cloud_word(&token) {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
        }
        WordCounts { counts }
    }

    pub fn word_cloud<S: AsRef<str>>(&self, texts: &[S], max_words: usize) -> Vec<WordCloudEntry> {
        self.word_counts(texts).ranked(max_words)
    }

    /// Unique tokens over total tokens; 0 for an empty corpus.
    pub fn vocabulary_diversity<S: AsRef<str>>(&self, texts: &[S]) -> f64 {
        let (total, unique) = self.token_totals(texts);
        if total == 0 {
            0.0
        } else {
            unique as f64 / total as f64
        }
    }

    /// Mean per-text Flesch reading ease over texts that contain words.
    pub fn readability<S: AsRef<str>>(&self, texts: &[S]) -> f64 {
        let scores: Vec<f64> = texts
            .iter()
            .filter_map(|t| flesch_reading_ease(t.as_ref(), self.syllables.as_ref()))
            .collect();
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }

    pub fn statistics<S: AsRef<str>>(&self, texts: &[S]) -> TextStatistics {
        let (total_words, unique_words) = self.token_totals(texts);
        let average_words_per_response = if texts.is_empty() {
            0.0
        } else {
            total_words as f64 / texts.len() as f64
        };

        TextStatistics {
            total_responses: texts.len(),
            total_words,
            average_words_per_response,
            unique_words,
            vocabulary_diversity: if total_words == 0 {
                0.0
            } else {
                unique_words as f64 / total_words as f64
            },
            readability: self.readability(texts),
        }
    }

    fn is_cloud_word(&self, token: &str) -> bool {
        token.chars().count() >= self.min_word_length
            && token.chars().any(char::is_alphabetic)
            && !self.lexicon.is_stop_word(token)
    }

    fn token_totals<S: AsRef<str>>(&self, texts: &[S]) -> (usize, usize) {
        let mut total = 0;
        let mut unique = HashSet::new();
        for text in texts {
            for token in tokenize(text.as_ref()) {
                total += 1;
                unique.insert(token);
            }
        }
        (total, unique.len())
    }
}
