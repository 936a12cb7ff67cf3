use serde::{Deserialize, Serialize};
use std::sync::Arc;
use survey_insights_core::TextConfig;

use crate::frequency::{TextStatistics, WordCloudEntry, WordCounts, WordFrequencyAnalyzer};
use crate::lexicon::LexiconStore;
use crate::sentiment::{SentimentResult, SentimentScorer, TextScore};
use crate::themes::{PhraseCounts, Theme, ThemeExtractor};
use crate::topics::{TopicBreakdown, TopicClassifier};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextInsights {
    pub sentiment: SentimentResult,
    pub themes: Vec<Theme>,
    pub topics: TopicBreakdown,
    pub word_cloud: Vec<WordCloudEntry>,
    pub statistics: TextStatistics,
}

/// Per-question intermediate results, merged in a serial reduce.
#[derive(Debug, Clone, Default)]
pub struct TextPartial {
    pub texts: Vec<String>,
    pub scores: Vec<TextScore>,
    pub words: WordCounts,
    pub phrases: PhraseCounts,
}

/// Every text analyzer over one shared lexicon.
#[derive(Debug, Clone)]
pub struct TextAnalytics {
    config: TextConfig,
    scorer: SentimentScorer,
    themes: ThemeExtractor,
    topics: TopicClassifier,
    words: WordFrequencyAnalyzer,
}

impl TextAnalytics {
    pub fn new(lexicon: Arc<LexiconStore>, config: TextConfig) -> Self {
        let scorer = SentimentScorer::new(Arc::clone(&lexicon), config.top_keywords);
        Self {
            themes: ThemeExtractor::new(Arc::clone(&lexicon), scorer.clone(), config.clone()),
            topics: TopicClassifier::new(Arc::clone(&lexicon), scorer.clone(), config.clone()),
            words: WordFrequencyAnalyzer::new(lexicon, config.min_word_length),
            scorer,
            config,
        }
    }

    /// Map step: score and count one question's answers. Blank answers are dropped.
    pub fn partial<S: AsRef<str>>(&self, texts: &[S]) -> TextPartial {
        let texts: Vec<String> = texts
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        TextPartial {
            scores: self.scorer.score_texts(&texts),
            words: self.words.word_counts(&texts),
            phrases: self.themes.phrase_counts(&texts),
            texts,
        }
    }

    /// Reduce step: sum counts, concatenate scores, then rank and truncate.
    pub fn reduce(&self, partials: &[TextPartial]) -> TextInsights {
        let mut texts = Vec::new();
        let mut scores = Vec::new();
        let mut words = WordCounts::default();
        let mut phrases = PhraseCounts::default();
        for partial in partials {
            texts.extend(partial.texts.iter().cloned());
            scores.extend(partial.scores.iter().cloned());
            words.merge(&partial.words);
            phrases.merge(&partial.phrases);
        }

        TextInsights {
            sentiment: self.scorer.aggregate(&scores),
            themes: self.themes.themes_from_counts(&phrases, &texts),
            topics: self.topics.classify(&texts),
            word_cloud: words.ranked(self.config.word_cloud_size),
            statistics: self.words.statistics(&texts),
        }
    }

    pub fn analyze<S: AsRef<str>>(&self, texts: &[S]) -> TextInsights {
        self.reduce(&[self.partial(texts)])
    }
}
