//! Recommendation service
//!
//! Front door for the presentation layer. Every call returns a possibly-empty
//! list of items and never fails: engine errors are logged and replaced by the
//! category fallback.

use crate::config::RecommenderConfig;
use crate::engine::{ItemSimilarity, SimilarityEngine};
use ahash::{AHashMap, AHashSet};
use shelfwise_core::{CatalogProvider, Item, ItemId, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RecommendationService<S = SimilarityEngine> {
    catalog: Arc<dyn CatalogProvider>,
    engine: S,
}

impl RecommendationService<SimilarityEngine> {
    /// Service backed by a TF-IDF [`SimilarityEngine`] over `catalog`
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: &RecommenderConfig) -> Result<Self> {
        let engine = SimilarityEngine::new(catalog.clone(), config)?;
        Ok(Self { catalog, engine })
    }
}

impl<S: ItemSimilarity> RecommendationService<S> {
    pub fn with_engine(catalog: Arc<dyn CatalogProvider>, engine: S) -> Self {
        Self { catalog, engine }
    }

    pub fn engine(&self) -> &S {
        &self.engine
    }

    /// Items similar to `item_id`, best first, at most `k`.
    ///
    /// Falls back to items sharing a category when the engine has nothing to
    /// offer for a known item. Unknown items yield an empty list.
    pub fn get_similar(&self, item_id: ItemId, k: usize) -> Vec<Item> {
        match self.try_similar(item_id, k) {
            Ok(items) => items,
            Err(e) => {
                warn!("Similar items for {} unavailable: {}", item_id, e);
                Vec::new()
            }
        }
    }

    /// Most popular items, at most `k`
    pub fn get_popular(&self, k: usize) -> Vec<Item> {
        match self.engine.popular_items(k) {
            Ok(items) => items,
            Err(e) => {
                warn!("Popular items unavailable: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get_item(&self, item_id: ItemId) -> Option<Item> {
        match self.catalog.get_item(item_id) {
            Ok(item) => item,
            Err(e) => {
                warn!("Catalog lookup for {} failed: {}", item_id, e);
                None
            }
        }
    }

    fn try_similar(&self, item_id: ItemId, k: usize) -> Result<Vec<Item>> {
        let items = self.catalog.list_items()?;
        let Some(query) = items.iter().find(|item| item.id == item_id) else {
            return Ok(Vec::new());
        };

        let ranked = match self.engine.similar_items(item_id, k) {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Similarity engine failed for {}: {}", item_id, e);
                Vec::new()
            }
        };

        if !ranked.is_empty() {
            let by_id: AHashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();
            let resolved: Vec<Item> = ranked
                .iter()
                .filter_map(|id| by_id.get(id).map(|item| (*item).clone()))
                .take(k)
                .collect();
            if !resolved.is_empty() {
                return Ok(resolved);
            }
        }

        debug!("Using category fallback for {}", item_id);
        self.category_fallback(query, &items, k)
    }

    /// Items sharing at least one category with `query`, catalog order
    fn category_fallback(&self, query: &Item, items: &[Item], k: usize) -> Result<Vec<Item>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let tags = self.catalog.list_categories_for(query)?;
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen: AHashSet<ItemId> = AHashSet::new();
        let mut related = Vec::new();
        for item in items {
            if item.id == query.id || seen.contains(&item.id) {
                continue;
            }
            let categories = self.catalog.list_categories_for(item)?;
            if categories.iter().any(|c| tags.contains(c)) {
                seen.insert(item.id);
                related.push(item.clone());
                if related.len() == k {
                    break;
                }
            }
        }
        Ok(related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfwise_core::{Error, InMemoryCatalog, Language};

    /// Engine whose fit always fails
    struct BrokenEngine;

    impl ItemSimilarity for BrokenEngine {
        fn similar_items(&self, _item_id: ItemId, _k: usize) -> Result<Vec<ItemId>> {
            Err(Error::EmptyVocabulary)
        }

        fn popular_items(&self, _k: usize) -> Result<Vec<Item>> {
            Err(Error::CatalogUnavailable("offline".to_string()))
        }
    }

    /// Catalog whose reads always fail
    struct OfflineCatalog;

    impl CatalogProvider for OfflineCatalog {
        fn list_items(&self) -> Result<Vec<Item>> {
            Err(Error::CatalogUnavailable("connection refused".to_string()))
        }
    }

    fn english() -> RecommenderConfig {
        RecommenderConfig {
            language: Language::English,
            ..Default::default()
        }
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_fallback_when_engine_fails() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::from_items(vec![
            Item::new(1, "Solaris", "Lem").with_categories(["space", "philosophy"]),
            Item::new(2, "Emma", "Austen").with_categories(["romance", "space"]),
            Item::new(3, "Ulysses", "Joyce").with_categories(["modernism"]),
        ]));
        let service = RecommendationService::with_engine(catalog, BrokenEngine);

        assert_eq!(ids(&service.get_similar(ItemId(1), 4)), vec![2]);
        assert!(service.get_similar(ItemId(3), 4).is_empty());
        assert!(service.get_popular(3).is_empty());
    }

    #[test]
    fn test_fallback_dedups_and_truncates() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::from_items(vec![
            Item::new(1, "A", "x").with_categories(["drama"]),
            Item::new(2, "B", "y").with_categories(["drama"]),
            Item::new(2, "B", "y").with_categories(["drama"]),
            Item::new(3, "C", "z").with_categories(["drama"]),
            Item::new(4, "D", "w").with_categories(["drama"]),
        ]));
        let service = RecommendationService::with_engine(catalog, BrokenEngine);
        assert_eq!(ids(&service.get_similar(ItemId(1), 2)), vec![2, 3]);
        assert!(service.get_similar(ItemId(1), 0).is_empty());
    }

    #[test]
    fn test_unknown_item_is_empty() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::from_items(vec![
            Item::new(1, "Dune", "Herbert").with_categories(["sci-fi"]),
            Item::new(2, "Dune Messiah", "Herbert").with_categories(["sci-fi"]),
        ]));
        let service = RecommendationService::new(catalog, &english()).unwrap();
        assert!(service.get_similar(ItemId(42), 4).is_empty());
        assert!(service.get_item(ItemId(42)).is_none());
    }

    #[test]
    fn test_single_item_catalog() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::from_items(vec![
            Item::new(1, "Dune", "Herbert").with_categories(["sci-fi"]),
        ]));
        let service = RecommendationService::new(catalog, &english()).unwrap();
        assert!(service.get_similar(ItemId(1), 4).is_empty());
        assert!(!service.engine().is_fitted());
        assert_eq!(ids(&service.get_popular(4)), vec![1]);
    }

    #[test]
    fn test_engine_results_keep_rank_order() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(InMemoryCatalog::from_items(vec![
            Item::new(1, "Dune", "Herbert").with_description("desert spice"),
            Item::new(2, "Foundation", "Asimov").with_description("empire"),
            Item::new(3, "Dune Messiah", "Herbert").with_description("desert spice"),
        ]));
        let service = RecommendationService::new(catalog, &english()).unwrap();
        assert_eq!(ids(&service.get_similar(ItemId(1), 2)), vec![3, 2]);
        assert_eq!(ids(&service.get_popular(2)), vec![3, 2]);
    }

    #[test]
    fn test_catalog_failure_never_propagates() {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(OfflineCatalog);
        let service = RecommendationService::new(catalog, &english()).unwrap();
        assert!(service.get_similar(ItemId(1), 4).is_empty());
        assert!(service.get_popular(4).is_empty());
        assert!(service.get_item(ItemId(1)).is_none());
    }
}
