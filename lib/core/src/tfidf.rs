//! TF-IDF vectorization over a document corpus.
//!
//! Tokens are lower-cased runs of two or more word characters. Stop words are
//! removed before n-grams are formed, so a bigram joins two adjacent surviving
//! tokens with a single space.
//!
//! ```text
//! tfidf(t, d) = count(t, d) * idf(t)
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! Each row is then scaled to unit length.

use crate::{Error, Result, StopWords, Vector};
use ahash::{AHashMap, AHashSet};

pub const DEFAULT_MAX_FEATURES: usize = 1000;
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 2);

/// Vectorizer settings. Call [`TfidfVectorizer::fit`] to learn a [`TfidfModel`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    stop_words: StopWords,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
            stop_words,
        }
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        let min_n = min_n.max(1);
        self.ngram_range = (min_n, max_n.max(min_n));
        self
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Lower-case, split on non-word characters, drop short tokens and stop words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|s| s.chars().count() > 1)
            .filter(|s| !self.stop_words.contains(s))
            .map(str::to_string)
            .collect()
    }

    /// All n-gram terms of a document, in order of appearance
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Learn vocabulary and idf weights.
    ///
    /// The vocabulary keeps the `max_features` terms with the highest total
    /// count across the corpus, ties broken by term order, then indexes the
    /// kept terms lexicographically so repeated fits are identical.
    pub fn fit<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfModel> {
        let n_docs = documents.len();
        let mut term_freq: AHashMap<String, usize> = AHashMap::new();
        let mut doc_freq: AHashMap<String, usize> = AHashMap::new();

        for doc in documents {
            let terms = self.analyze(doc.as_ref());
            let mut seen: AHashSet<&str> = AHashSet::new();
            for term in &terms {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        if ranked.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = n_docs as f32;
        let idf: Vec<f32> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        Ok(TfidfModel {
            analyzer: self.clone(),
            vocabulary,
            terms,
            idf,
        })
    }

    /// Fit on the corpus and return one unit-length row per document
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<(TfidfModel, Vec<Vector>)> {
        let model = self.fit(documents)?;
        let rows = documents.iter().map(|doc| model.transform(doc.as_ref())).collect();
        Ok((model, rows))
    }
}

/// A fitted vocabulary with idf weights
#[derive(Debug, Clone)]
pub struct TfidfModel {
    analyzer: TfidfVectorizer,
    vocabulary: AHashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TfidfModel {
    /// Weight one document against the fitted vocabulary.
    /// A document sharing no vocabulary becomes a zero vector.
    pub fn transform(&self, text: &str) -> Vector {
        let mut row = Vector::zeros(self.terms.len());
        let weights = row.as_mut_slice();
        for term in self.analyzer.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                weights[idx] += self.idf[idx];
            }
        }
        row.normalize();
        row
    }

    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in column order
    #[inline]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|idx| self.idf[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Language;

    fn english() -> TfidfVectorizer {
        TfidfVectorizer::new(StopWords::for_language(Language::English))
    }

    #[test]
    fn test_tokenize() {
        let v = english();
        assert_eq!(
            v.tokenize("The Dune, by Frank-Herbert: a 1965 novel!"),
            vec!["dune", "frank", "herbert", "1965", "novel"]
        );
    }

    #[test]
    fn test_tokenize_cyrillic() {
        let v = TfidfVectorizer::new(StopWords::for_language(Language::Russian));
        assert_eq!(v.tokenize("Война и мир"), vec!["война", "мир"]);
    }

    #[test]
    fn test_bigrams_skip_stop_words() {
        let v = english();
        let terms = v.analyze("war and peace");
        assert_eq!(terms, vec!["war", "peace", "war peace"]);
    }

    #[test]
    fn test_unigram_only_range() {
        let v = english().with_ngram_range(1, 1);
        assert_eq!(v.analyze("desert planet spice"), vec!["desert", "planet", "spice"]);
    }

    #[test]
    fn test_vocabulary_sorted_and_bounded() {
        let docs = ["alpha beta gamma", "alpha beta", "alpha delta"];
        let model = english().with_ngram_range(1, 1).with_max_features(2).fit(&docs).unwrap();
        // alpha (3) and beta (2) are the most frequent terms
        assert_eq!(model.terms(), &["alpha".to_string(), "beta".to_string()]);
        assert_eq!(model.column("beta"), Some(1));
        assert_eq!(model.column("gamma"), None);
    }

    #[test]
    fn test_frequency_ties_break_lexicographically() {
        let docs = ["zeta yak", "xenon wolf"];
        let model = english().with_ngram_range(1, 1).with_max_features(2).fit(&docs).unwrap();
        assert_eq!(model.terms(), &["wolf".to_string(), "xenon".to_string()]);
    }

    #[test]
    fn test_idf_smoothing() {
        let docs = ["common rare", "common"];
        let model = english().with_ngram_range(1, 1).fit(&docs).unwrap();
        assert!((model.idf("common").unwrap() - 1.0).abs() < 1e-6);
        let expected_rare = (3.0f32 / 2.0).ln() + 1.0;
        assert!((model.idf("rare").unwrap() - expected_rare).abs() < 1e-6);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let docs = ["dune herbert desert", "foundation asimov empire"];
        let (_, rows) = english().fit_transform(&docs).unwrap();
        for row in rows {
            assert!((row.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unknown_text_is_zero_vector() {
        let model = english().fit(&["dune herbert", "emma austen"]).unwrap();
        assert!(model.transform("quantum blockchain").is_zero());
    }

    #[test]
    fn test_empty_vocabulary() {
        let result = english().fit(&["the a", "of and"]);
        assert!(matches!(result, Err(Error::EmptyVocabulary)));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let docs = ["dune herbert desert", "dune messiah herbert", "emma austen"];
        let (m1, r1) = english().fit_transform(&docs).unwrap();
        let (m2, r2) = english().fit_transform(&docs).unwrap();
        assert_eq!(m1.terms(), m2.terms());
        assert_eq!(r1, r2);
    }
}
