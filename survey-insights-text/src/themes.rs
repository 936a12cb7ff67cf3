use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use survey_insights_core::TextConfig;

use crate::lexicon::LexiconStore;
use crate::sentiment::{SentimentLabel, SentimentScorer};
use crate::tokenize::{contains_phrase, tokenize};

const ISSUE_WORDS: &[&str] = &["problem", "problems", "issue", "issues", "bug", "bugs", "broken", "error", "errors"];
const SUGGESTION_WORDS: &[&str] = &[
    "should", "could", "would", "suggest", "suggestion", "recommend", "wish", "please", "add",
    "improve", "maybe",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Praise,
    Complaint,
    Issue,
    Suggestion,
    Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub phrase: String,
    pub frequency: usize,
    pub response_count: usize,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub category: ThemeCategory,
    pub sample_responses: Vec<String>,
}

/// Candidate phrase strategy for theme mining.
pub trait PhraseMiner: Send + Sync + std::fmt::Debug {
    fn phrases(&self, tokens: &[String], lexicon: &LexiconStore) -> Vec<String>;
}

/// 2- and 3-word n-grams whose first and last tokens are not stop words.
#[derive(Debug, Clone, Copy)]
pub struct NGramPhraseMiner {
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for NGramPhraseMiner {
    fn default() -> Self {
        Self {
            min_words: 2,
            max_words: 3,
        }
    }
}

impl PhraseMiner for NGramPhraseMiner {
    fn phrases(&self, tokens: &[String], lexicon: &LexiconStore) -> Vec<String> {
        let mut phrases = Vec::new();
        for n in self.min_words..=self.max_words {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                let (first, last) = (&window[0], &window[n - 1]);
                if lexicon.is_stop_word(first) || lexicon.is_stop_word(last) {
                    continue;
                }
                phrases.push(window.join(" "));
            }
        }
        phrases
    }
}

/// Phrase occurrence counts that can be summed across questions before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCounts {
    counts: BTreeMap<String, usize>,
}

impl PhraseCounts {
    pub fn merge(&mut self, other: &PhraseCounts) {
        for (phrase, count) in &other.counts {
            *self.counts.entry(phrase.clone()).or_insert(0) += count;
        }
    }

    pub fn get(&self, phrase: &str) -> usize {
        self.counts.get(phrase).copied().unwrap_or(0)
    }

    /// Phrases seen at least `min_frequency` times, most frequent first, ties alphabetical.
    fn candidates(&self, min_frequency: usize, limit: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .filter(|(_, count)| **count >= min_frequency)
            .map(|(phrase, count)| (phrase.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

/// Recurring-phrase themes, each re-scored for sentiment and categorized.
#[derive(Debug, Clone)]
pub struct ThemeExtractor {
    lexicon: Arc<LexiconStore>,
    scorer: SentimentScorer,
    miner: Arc<dyn PhraseMiner>,
    config: TextConfig,
}

impl ThemeExtractor {
    pub fn new(lexicon: Arc<LexiconStore>, scorer: SentimentScorer, config: TextConfig) -> Self {
        Self::with_miner(lexicon, scorer, config, Arc::new(NGramPhraseMiner::default()))
    }

    pub fn with_miner(
        lexicon: Arc<LexiconStore>,
        scorer: SentimentScorer,
        config: TextConfig,
        miner: Arc<dyn PhraseMiner>,
    ) -> Self {
        Self {
            lexicon,
            scorer,
            miner,
            config,
        }
    }

    pub fn phrase_counts<S: AsRef<str>>(&self, texts: &[S]) -> PhraseCounts {
        let mut counts = BTreeMap::new();
        for text in texts {
            let tokens = tokenize(text.as_ref());
            for phrase in self.miner.phrases(&tokens, &self.lexicon) {
                *counts.entry(phrase).or_insert(0) += 1;
            }
        }
        PhraseCounts { counts }
    }

    pub fn extract<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Theme> {
        let counts = self.phrase_counts(texts);
        self.themes_from_counts(&counts, texts)
    }

    /// Build themes from (possibly merged) phrase counts against the corpus they came from.
    pub fn themes_from_counts<S: AsRef<str>>(&self, counts: &PhraseCounts, texts: &[S]) -> Vec<Theme> {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();
        let mut themes = Vec::new();

        for (phrase, frequency) in counts.candidates(self.config.min_phrase_frequency, self.config.max_themes) {
            let words: Vec<&str> = phrase.split(' ').collect();
            let matching: Vec<usize> = tokenized
                .iter()
                .enumerate()
                .filter(|(_, tokens)| contains_phrase(tokens, &words))
                .map(|(index, _)| index)
                .collect();
            if matching.len() < self.config.min_theme_responses {
                continue;
            }

            let matching_texts: Vec<&str> = matching.iter().map(|&i| texts[i].as_ref()).collect();
            let sentiment = self.scorer.analyze(&matching_texts);
            let category = categorize(
                sentiment.overall.label,
                matching.iter().flat_map(|&i| tokenized[i].iter()),
            );

            themes.push(Theme {
                phrase: phrase.to_string(),
                frequency,
                response_count: matching.len(),
                sentiment: sentiment.overall.label,
                sentiment_score: sentiment.overall.score,
                category,
                sample_responses: matching_texts
                    .iter()
                    .take(self.config.sample_responses)
                    .map(|t| t.to_string())
                    .collect(),
            });
        }

        tracing::debug!(themes = themes.len(), texts = texts.len(), "themes extracted");
        themes
    }
}

fn categorize<'a>(label: SentimentLabel, mut tokens: impl Iterator<Item = &'a String>) -> ThemeCategory {
    match label {
        SentimentLabel::Positive => ThemeCategory::Praise,
        SentimentLabel::Negative => {
            if tokens.any(|t| ISSUE_WORDS.contains(&t.as_str())) {
                ThemeCategory::Issue
            } else {
                ThemeCategory::Complaint
            }
        }
        SentimentLabel::Neutral => {
            if tokens.any(|t| SUGGESTION_WORDS.contains(&t.as_str())) {
                ThemeCategory::Suggestion
            } else {
                ThemeCategory::Theme
            }
        }
    }
}
