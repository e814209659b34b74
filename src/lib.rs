//! # shelfwise
//!
//! Content-based recommendations for a book catalog.
//!
//! shelfwise turns every book into a TF-IDF vector built from its title,
//! author, description and genres, then answers "more like this" queries by
//! cosine similarity. When similarity has nothing to offer it falls back to
//! books sharing a genre, and it serves a "popular books" list ranked by a
//! pluggable scorer.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! shelfwise --catalog ./data/catalog.json --http-port 8080
//! curl 'http://localhost:8080/items/1/similar?limit=4'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use shelfwise::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(InMemoryCatalog::from_items(vec![
//!     Item::new(1, "Dune", "Herbert").with_description("desert"),
//!     Item::new(2, "Foundation", "Asimov").with_description("empire"),
//!     Item::new(3, "Dune Messiah", "Herbert").with_description("desert"),
//! ]));
//!
//! let config = RecommenderConfig { language: Language::English, ..Default::default() };
//! let service = RecommendationService::new(catalog, &config).unwrap();
//!
//! let similar = service.get_similar(ItemId(1), 1);
//! let popular = service.get_popular(2);
//! assert_eq!(similar[0].id, ItemId(3));
//! assert_eq!(popular.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! - [`shelfwise-core`](https://docs.rs/shelfwise-core) - Items, catalogs, corpus building, TF-IDF
//! - [`shelfwise-similarity`](https://docs.rs/shelfwise-similarity) - Similarity engine, popularity, service
//! - [`shelfwise-api`](https://docs.rs/shelfwise-api) - REST API

// Re-export core types
pub use shelfwise_core::{
    build_corpus, CatalogProvider, CatalogSnapshot, Corpus, Error, InMemoryCatalog, Item, ItemId,
    JsonCatalog, Language, OrderLine, Result, Review, StopWords, TfidfModel, TfidfVectorizer,
    Vector,
};

// Re-export similarity engine
pub use shelfwise_similarity::{
    ByAverageRating, ByIdentifier, BySales, ItemSimilarity, PopularityScorer,
    RecommendationService, RecommenderConfig, SimilarityEngine,
};

// Re-export API
pub use shelfwise_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CatalogProvider, InMemoryCatalog, Item, ItemId, ItemSimilarity, JsonCatalog, Language,
        PopularityScorer, RecommendationService, RecommenderConfig, SimilarityEngine,
        Error, Result,
    };
}
