//! # shelfwise Core
//!
//! Core library for the shelfwise recommendation engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Item`] - A catalog entry (book) with text fields and category tags
//! - [`CatalogProvider`] - Read-only access to the item catalog
//! - [`Corpus`] - One document string per item, aligned with item ids
//! - [`TfidfVectorizer`] - Unigram + bigram TF-IDF with stop-word filtering
//! - [`Vector`] - Dense weighted row with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use shelfwise_core::{build_corpus, InMemoryCatalog, Item, Language, StopWords, TfidfVectorizer};
//!
//! let catalog = InMemoryCatalog::from_items(vec![
//!     Item::new(1, "Dune", "Herbert").with_description("desert"),
//!     Item::new(2, "Foundation", "Asimov").with_description("empire"),
//! ]);
//!
//! let corpus = build_corpus(&catalog).unwrap().expect("two items");
//! let vectorizer = TfidfVectorizer::new(StopWords::for_language(Language::English));
//! let (model, rows) = vectorizer.fit_transform(corpus.documents()).unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert!(model.vocabulary_size() > 0);
//! ```

pub mod catalog;
pub mod corpus;
pub mod error;
pub mod item;
pub mod stopwords;
pub mod tfidf;
pub mod vector;

pub use catalog::{CatalogProvider, CatalogSnapshot, InMemoryCatalog, JsonCatalog, OrderLine, Review};
pub use corpus::{build_corpus, item_document, Corpus, MIN_CORPUS_ITEMS};
pub use error::{Error, Result};
pub use item::{Item, ItemId};
pub use stopwords::{Language, StopWords};
pub use tfidf::{TfidfModel, TfidfVectorizer, DEFAULT_MAX_FEATURES, DEFAULT_NGRAM_RANGE};
pub use vector::Vector;
