use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::lexicon::{Emotion, LexiconStore};
use crate::tokenize::tokenize;

const POSITIVE_THRESHOLD: f64 = 1.0;
const NEGATIVE_THRESHOLD: f64 = -1.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Lexicon hits for a single text; the unit that per-question results are merged from.
#[derive(Debug, Clone, PartialEq)]
pub struct TextScore {
    pub score: i32,
    pub comparative: f64,
    pub token_count: usize,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub emotion_hits: BTreeMap<Emotion, usize>,
}

impl TextScore {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(f64::from(self.score))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverallSentiment {
    pub score: f64,
    pub comparative: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Percentages of texts per label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SentimentKeywords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub overall: OverallSentiment,
    pub breakdown: SentimentBreakdown,
    pub keywords: SentimentKeywords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<BTreeMap<Emotion, f64>>,
}

impl SentimentResult {
    /// Result for a corpus with no texts.
    pub fn neutral() -> Self {
        Self {
            overall: OverallSentiment {
                score: 0.0,
                comparative: 0.0,
                label: SentimentLabel::Neutral,
                confidence: 0.0,
            },
            breakdown: SentimentBreakdown {
                positive: 0.0,
                negative: 0.0,
                neutral: 100.0,
            },
            keywords: SentimentKeywords::default(),
            emotions: None,
        }
    }
}

/// Lexicon-based sentiment scoring for free-text corpora.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Arc<LexiconStore>,
    top_keywords: usize,
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<LexiconStore>, top_keywords: usize) -> Self {
        Self {
            lexicon,
            top_keywords,
        }
    }

    pub fn score_text(&self, text: &str) -> TextScore {
        let tokens = tokenize(text);
        let mut score: i32 = 0;
        let mut positive_words = Vec::new();
        let mut negative_words = Vec::new();
        let mut emotion_hits = BTreeMap::new();

        for token in &tokens {
            if let Some(value) = self.lexicon.sentiment_score(token) {
                score = score.saturating_add(value);
                if value > 0 {
                    positive_words.push(token.clone());
                } else if value < 0 {
                    negative_words.push(token.clone());
                }
            }
            for emotion in self.lexicon.emotions_of(token) {
                *emotion_hits.entry(emotion).or_insert(0) += 1;
            }
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            f64::from(score) / tokens.len() as f64
        };

        TextScore {
            score,
            comparative,
            token_count: tokens.len(),
            positive_words,
            negative_words,
            emotion_hits,
        }
    }

    pub fn score_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TextScore> {
        texts.iter().map(|t| self.score_text(t.as_ref())).collect()
    }

    pub fn analyze<S: AsRef<str>>(&self, texts: &[S]) -> SentimentResult {
        self.aggregate(&self.score_texts(texts))
    }

    /// Combine per-text scores into corpus-level sentiment.
    pub fn aggregate(&self, scores: &[TextScore]) -> SentimentResult {
        if scores.is_empty() {
            return SentimentResult::neutral();
        }

        let n = scores.len() as f64;
        let mean_score = scores.iter().map(|s| f64::from(s.score)).sum::<f64>() / n;
        let mean_comparative = scores.iter().map(|s| s.comparative).sum::<f64>() / n;
        let label = SentimentLabel::from_score(mean_score);

        let mut label_counts: HashMap<SentimentLabel, usize> = HashMap::new();
        for score in scores {
            *label_counts.entry(score.label()).or_insert(0) += 1;
        }
        let share = |label: SentimentLabel| label_counts.get(&label).copied().unwrap_or(0) as f64 / n;

        let mut emotions: BTreeMap<Emotion, f64> = Emotion::ALL.iter().map(|e| (*e, 0.0)).collect();
        for score in scores {
            for (emotion, hits) in &score.emotion_hits {
                *emotions.entry(*emotion).or_insert(0.0) += *hits as f64;
            }
        }
        for intensity in emotions.values_mut() {
            *intensity /= n;
        }

        SentimentResult {
            overall: OverallSentiment {
                score: mean_score,
                comparative: mean_comparative,
                label,
                confidence: share(label),
            },
            breakdown: SentimentBreakdown {
                positive: share(SentimentLabel::Positive) * 100.0,
                negative: share(SentimentLabel::Negative) * 100.0,
                neutral: share(SentimentLabel::Neutral) * 100.0,
            },
            keywords: SentimentKeywords {
                positive: top_words(scores.iter().flat_map(|s| &s.positive_words), self.top_keywords),
                negative: top_words(scores.iter().flat_map(|s| &s.negative_words), self.top_keywords),
            },
            emotions: Some(emotions),
        }
    }
}

/// Most frequent words, ties broken alphabetically.
pub(crate) fn top_words<'a>(words: impl Iterator<Item = &'a String>, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}
