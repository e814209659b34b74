use serde::{Deserialize, Serialize};
use shelfwise_core::{
    Error, Language, Result, StopWords, TfidfVectorizer, DEFAULT_MAX_FEATURES, DEFAULT_NGRAM_RANGE,
};

/// Configuration for the similarity engine and the service built on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Upper bound on vocabulary size
    pub max_features: usize,
    /// Inclusive n-gram lengths
    pub ngram_range: (usize, usize),
    /// Selects the stop-word list
    pub language: Language,
    /// Default number of similar items when the caller gives none
    pub similar_limit: usize,
    /// Default number of popular items when the caller gives none
    pub popular_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
            language: Language::Russian,
            similar_limit: 4,
            popular_limit: 6,
        }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".to_string()));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        Ok(())
    }

    pub fn vectorizer(&self) -> TfidfVectorizer {
        TfidfVectorizer::new(StopWords::for_language(self.language))
            .with_max_features(self.max_features)
            .with_ngram_range(self.ngram_range.0, self.ngram_range.1)
    }
}
