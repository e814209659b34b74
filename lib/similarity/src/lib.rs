//! # shelfwise Similarity
//!
//! Content-based recommendations on top of `shelfwise-core`.
//!
//! ## Features
//!
//! - **Similarity Engine**: TF-IDF vectors per item, cosine nearest neighbours
//! - **Lazy Refit**: model rebuilt only when the catalog generation changes
//! - **Popularity**: pluggable scorers (identifier, rating, sales, closures)
//! - **Fallback**: category-overlap recommendations when similarity has nothing
//!
//! ## Example
//!
//! ```rust
//! use shelfwise_core::{InMemoryCatalog, Item, ItemId, Language};
//! use shelfwise_similarity::{RecommendationService, RecommenderConfig};
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
//! assert_eq!(similar[0].id, ItemId(3));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│   Corpus    │────>│   TF-IDF    │
//! │  (items)    │     │ (documents) │     │  (vectors)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │              ┌─────────────┐           │
//!       └─────────────>│   Service   │<──────────┘
//!        (fallback)    │ (similar /  │
//!                      │  popular)   │
//!                      └─────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod popularity;
pub mod service;

pub use config::RecommenderConfig;
pub use engine::{FittedModel, ItemSimilarity, SimilarityEngine};
pub use popularity::{rank_popular, ByAverageRating, ByIdentifier, BySales, PopularityScorer};
pub use service::RecommendationService;
