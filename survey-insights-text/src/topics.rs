use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use survey_insights_core::TextConfig;

use crate::lexicon::{LexiconStore, Topic};
use crate::sentiment::{top_words, SentimentLabel, SentimentScorer};
use crate::tokenize::tokenize;

const TOPIC_KEYWORDS: usize = 5;

/// Decides which keywords of a topic a tokenized text mentions.
pub trait TopicMatcher: Send + Sync + std::fmt::Debug {
    fn matched_keywords(&self, tokens: &[String], topic: Topic, lexicon: &LexiconStore) -> Vec<String>;
}

/// Exact token lookup against the topic dictionaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordTopicMatcher;

impl TopicMatcher for KeywordTopicMatcher {
    fn matched_keywords(&self, tokens: &[String], topic: Topic, lexicon: &LexiconStore) -> Vec<String> {
        let Some(keywords) = lexicon.topic_keywords(topic) else {
            return Vec::new();
        };
        tokens.iter().filter(|t| keywords.contains(t.as_str())).cloned().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topic: Topic,
    pub mention_count: usize,
    pub percentage: f64,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub keywords: Vec<String>,
    pub sample_responses: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UncategorizedResponses {
    pub count: usize,
    pub percentage: f64,
    pub preview: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicBreakdown {
    pub topics: Vec<TopicSummary>,
    pub uncategorized: UncategorizedResponses,
}

impl TopicBreakdown {
    /// Topic with the most mentions, if any text matched one.
    pub fn dominant(&self) -> Option<&TopicSummary> {
        self.topics.first()
    }
}

/// Buckets free-text answers into the fixed topic dictionaries.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    lexicon: Arc<LexiconStore>,
    scorer: SentimentScorer,
    matcher: Arc<dyn TopicMatcher>,
    config: TextConfig,
}

impl TopicClassifier {
    pub fn new(lexicon: Arc<LexiconStore>, scorer: SentimentScorer, config: TextConfig) -> Self {
        Self::with_matcher(lexicon, scorer, config, Arc::new(KeywordTopicMatcher))
    }

    pub fn with_matcher(
        lexicon: Arc<LexiconStore>,
        scorer: SentimentScorer,
        config: TextConfig,
        matcher: Arc<dyn TopicMatcher>,
    ) -> Self {
        Self {
            lexicon,
            scorer,
            matcher,
            config,
        }
    }

    pub fn classify<S: AsRef<str>>(&self, texts: &[S]) -> TopicBreakdown {
        if texts.is_empty() {
            return TopicBreakdown::default();
        }

        let total = texts.len() as f64;
        let mut mentions: BTreeMap<Topic, (Vec<usize>, Vec<String>)> = BTreeMap::new();
        let mut uncategorized = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            let tokens = tokenize(text.as_ref());
            let mut matched_any = false;
            for topic in Topic::ALL {
                let keywords = self.matcher.matched_keywords(&tokens, topic, &self.lexicon);
                if keywords.is_empty() {
                    continue;
                }
                matched_any = true;
                let entry = mentions.entry(topic).or_default();
                entry.0.push(index);
                entry.1.extend(keywords);
            }
            if !matched_any {
                uncategorized.push(index);
            }
        }

        let mut topics: Vec<TopicSummary> = mentions
            .into_iter()
            .map(|(topic, (indices, keywords))| {
                let matching: Vec<&str> = indices.iter().map(|&i| texts[i].as_ref()).collect();
                let sentiment = self.scorer.analyze(&matching);
                TopicSummary {
                    topic,
                    mention_count: indices.len(),
                    percentage: indices.len() as f64 / total * 100.0,
                    sentiment: sentiment.overall.label,
                    sentiment_score: sentiment.overall.score,
                    keywords: top_words(keywords.iter(), TOPIC_KEYWORDS),
                    sample_responses: matching
                        .iter()
                        .take(self.config.sample_responses)
                        .map(|t| t.to_string())
                        .collect(),
                }
            })
            .collect();
        // BTreeMap iteration follows topic declaration order; stable sort keeps it for ties.
        topics.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));

        tracing::debug!(
            topics = topics.len(),
            uncategorized = uncategorized.len(),
            "topics classified"
        );

        TopicBreakdown {
            topics,
            uncategorized: UncategorizedResponses {
                count: uncategorized.len(),
                percentage: uncategorized.len() as f64 / total * 100.0,
                preview: uncategorized
                    .iter()
                    .take(self.config.uncategorized_preview)
                    .map(|&i| texts[i].as_ref().to_string())
                    .collect(),
            },
        }
    }
}
