//! Read-only dictionaries shared by every text analyzer.
//!
//! The built-in store is assembled once per process and handed out as an
//! `Arc`; stores with caller overrides are built once per engine and never
//! mutated afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use survey_insights_core::LexiconOverrides;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "so", "some",
    "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your", "yours", "yourself", "yourselves", "im", "ive", "its", "dont", "also",
    "would", "could", "should", "get", "got", "really", "much", "many", "one", "like",
];

/// AFINN-style word valences in [-5, 5].
const SENTIMENT_WORDS: &[(&str, i32)] = &[
    ("amazing", 4), ("awesome", 4), ("brilliant", 4), ("excellent", 3), ("exceptional", 4),
    ("fantastic", 4), ("outstanding", 5), ("perfect", 3), ("superb", 5), ("wonderful", 4),
    ("love", 3), ("loved", 3), ("loves", 3), ("great", 3), ("good", 3), ("nice", 3),
    ("best", 3), ("better", 2), ("happy", 3), ("glad", 3), ("pleased", 3), ("delighted", 3),
    ("enjoy", 2), ("enjoyed", 2), ("like", 2), ("liked", 2), ("helpful", 2), ("useful", 2),
    ("easy", 1), ("intuitive", 2), ("fast", 2), ("quick", 2), ("smooth", 2), ("clean", 2),
    ("friendly", 2), ("recommend", 2), ("recommended", 2), ("satisfied", 2), ("reliable", 2),
    ("impressive", 3), ("impressed", 3), ("thanks", 2), ("thank", 2), ("appreciate", 2),
    ("beautiful", 3), ("fun", 4), ("valuable", 2), ("worth", 2), ("convenient", 2),
    ("responsive", 2), ("efficient", 2), ("simple", 1), ("fine", 2), ("ok", 1), ("okay", 1),
    ("improved", 2), ("improvement", 2), ("success", 2), ("successful", 3), ("win", 4),
    ("bad", -3), ("worse", -3), ("worst", -3), ("terrible", -3), ("horrible", -3),
    ("awful", -3), ("poor", -2), ("hate", -3), ("hated", -3), ("dislike", -2),
    ("disappointed", -2), ("disappointing", -2), ("frustrated", -2), ("frustrating", -2),
    ("annoying", -2), ("annoyed", -2), ("angry", -3), ("upset", -2), ("sad", -2),
    ("confusing", -2), ("confused", -2), ("difficult", -1), ("hard", -1), ("slow", -2),
    ("broken", -1), ("bug", -2), ("bugs", -2), ("buggy", -2), ("crash", -2), ("crashes", -2),
    ("crashed", -2), ("error", -2), ("errors", -2), ("fail", -2), ("failed", -2),
    ("failure", -2), ("problem", -2), ("problems", -2), ("issue", -1), ("issues", -1),
    ("useless", -2), ("waste", -1), ("expensive", -2), ("overpriced", -3), ("rude", -2),
    ("unhelpful", -2), ("unreliable", -2), ("ugly", -3), ("lag", -1), ("laggy", -2),
    ("clunky", -2), ("missing", -2), ("lacking", -2), ("lack", -2), ("worried", -3),
    ("afraid", -2), ("scary", -2), ("disgusting", -3), ("pathetic", -2), ("mess", -2),
    ("never", -1), ("unfortunately", -2), ("complain", -2), ("complaint", -2), ("wrong", -2),
];

const EMOTION_WORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Joy,
        &[
            "happy", "joy", "love", "loved", "delighted", "glad", "pleased", "enjoy", "enjoyed",
            "excited", "fun", "great", "wonderful", "amazing", "awesome", "fantastic",
        ],
    ),
    (
        Emotion::Anger,
        &[
            "angry", "mad", "furious", "annoyed", "annoying", "frustrated", "frustrating", "hate",
            "hated", "rage", "outraged", "irritated", "ridiculous",
        ],
    ),
    (
        Emotion::Fear,
        &[
            "afraid", "scared", "scary", "worried", "worry", "anxious", "nervous", "concerned",
            "fear", "insecure", "unsafe", "risky",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "sad", "unhappy", "disappointed", "disappointing", "depressed", "miss", "sorry",
            "regret", "lonely", "upset", "unfortunately",
        ],
    ),
    (
        Emotion::Surprise,
        &[
            "surprised", "surprising", "unexpected", "unexpectedly", "shocked", "amazed",
            "astonished", "wow", "suddenly",
        ],
    ),
    (
        Emotion::Disgust,
        &[
            "disgusting", "gross", "awful", "horrible", "nasty", "terrible", "revolting", "yuck",
            "pathetic",
        ],
    ),
];

const TOPIC_WORDS: &[(Topic, &[&str])] = &[
    (
        Topic::UserExperience,
        &[
            "easy", "intuitive", "interface", "design", "navigation", "navigate", "layout",
            "usability", "confusing", "ui", "ux", "user", "menu", "clean", "simple", "look",
        ],
    ),
    (
        Topic::Performance,
        &[
            "fast", "slow", "speed", "loading", "load", "lag", "laggy", "crash", "crashes",
            "responsive", "performance", "quick", "freeze", "freezes", "timeout",
        ],
    ),
    (
        Topic::Features,
        &[
            "feature", "features", "functionality", "option", "options", "tool", "tools",
            "integration", "integrations", "capability", "export", "customization", "missing",
        ],
    ),
    (
        Topic::Support,
        &[
            "support", "help", "service", "staff", "team", "agent", "customer", "contact",
            "assistance", "helpdesk", "response", "replied", "ticket",
        ],
    ),
    (
        Topic::Quality,
        &[
            "quality", "reliable", "reliability", "broken", "defect", "durable", "stable",
            "solid", "bug", "bugs", "buggy", "error", "errors", "works",
        ],
    ),
    (
        Topic::Value,
        &[
            "price", "pricing", "cost", "costs", "value", "expensive", "cheap", "worth", "money",
            "subscription", "affordable", "overpriced", "plan",
        ],
    ),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anger,
    Fear,
    Sadness,
    Surprise,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Disgust,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
    #[serde(rename = "UX")]
    UserExperience,
    Performance,
    Features,
    Support,
    Quality,
    Value,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::UserExperience,
        Topic::Performance,
        Topic::Features,
        Topic::Support,
        Topic::Quality,
        Topic::Value,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::UserExperience => "UX",
            Self::Performance => "Performance",
            Self::Features => "Features",
            Self::Support => "Support",
            Self::Quality => "Quality",
            Self::Value => "Value",
        }
    }
}

static BUILTIN: Lazy<Arc<LexiconStore>> = Lazy::new(|| Arc::new(LexiconStore::build(&LexiconOverrides::default())));

#[derive(Debug, Clone, PartialEq)]
pub struct LexiconStore {
    stop_words: HashSet<String>,
    sentiment: HashMap<String, i32>,
    emotions: BTreeMap<Emotion, HashSet<String>>,
    topics: BTreeMap<Topic, HashSet<String>>,
}

impl LexiconStore {
    /// The process-wide built-in dictionaries.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in dictionaries with caller overrides applied; shares the built-in store when there are none.
    pub fn with_overrides(overrides: &LexiconOverrides) -> Arc<Self> {
        if overrides.extra_stop_words.is_empty() && overrides.sentiment_overrides.is_empty() {
            return Self::builtin();
        }
        Arc::new(Self::build(overrides))
    }

    fn build(overrides: &LexiconOverrides) -> Self {
        let mut stop_words: HashSet<String> = STOP_WORDS.iter().map(|w| w.to_string()).collect();
        stop_words.extend(overrides.extra_stop_words.iter().map(|w| w.to_lowercase()));

        let mut sentiment: HashMap<String, i32> = SENTIMENT_WORDS
            .iter()
            .map(|(word, score)| (word.to_string(), *score))
            .collect();
        for (word, score) in &overrides.sentiment_overrides {
            sentiment.insert(word.to_lowercase(), *score);
        }

        let emotions = EMOTION_WORDS
            .iter()
            .map(|(emotion, words)| (*emotion, words.iter().map(|w| w.to_string()).collect()))
            .collect();
        let topics = TOPIC_WORDS
            .iter()
            .map(|(topic, words)| (*topic, words.iter().map(|w| w.to_string()).collect()))
            .collect();

        Self {
            stop_words,
            sentiment,
            emotions,
            topics,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn sentiment_score(&self, word: &str) -> Option<i32> {
        self.sentiment.get(word).copied()
    }

    /// Emotions whose keyword set contains `word`, in declaration order.
    pub fn emotions_of<'a>(&'a self, word: &'a str) -> impl Iterator<Item = Emotion> + 'a {
        self.emotions
            .iter()
            .filter(move |(_, words)| words.contains(word))
            .map(|(emotion, _)| *emotion)
    }

    pub fn topic_keywords(&self, topic: Topic) -> Option<&HashSet<String>> {
        self.topics.get(&topic)
    }
}
