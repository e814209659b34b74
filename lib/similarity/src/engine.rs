//! TF-IDF similarity engine
//!
//! Fits lazily on the first query and refits whenever the catalog's
//! generation token moves. The fitted model is swapped in as a whole, so a
//! reader sees either the previous model or the new one.

use crate::config::RecommenderConfig;
use crate::popularity::{rank_popular, ByIdentifier, PopularityScorer};
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use parking_lot::RwLock;
use shelfwise_core::{
    build_corpus, CatalogProvider, Item, ItemId, Result, TfidfModel, TfidfVectorizer, Vector,
};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info};

/// Nearest-neighbour source used by the recommendation service
pub trait ItemSimilarity: Send + Sync {
    /// Up to `k` item ids ranked by descending similarity, excluding `item_id`
    fn similar_items(&self, item_id: ItemId, k: usize) -> Result<Vec<ItemId>>;

    /// Up to `k` items ranked by popularity
    fn popular_items(&self, k: usize) -> Result<Vec<Item>>;
}

/// Vocabulary, row matrix and item ids of one fit
#[derive(Debug)]
pub struct FittedModel {
    tfidf: TfidfModel,
    rows: Vec<Vector>,
    item_ids: Vec<ItemId>,
    positions: AHashMap<ItemId, usize>,
    generation: u64,
}

impl FittedModel {
    fn new(tfidf: TfidfModel, rows: Vec<Vector>, item_ids: Vec<ItemId>, generation: u64) -> Self {
        // First occurrence wins if the catalog repeats an id
        let mut positions = AHashMap::with_capacity(item_ids.len());
        for (idx, id) in item_ids.iter().enumerate() {
            positions.entry(*id).or_insert(idx);
        }
        Self {
            tfidf,
            rows,
            item_ids,
            positions,
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn vocabulary_size(&self) -> usize {
        self.tfidf.vocabulary_size()
    }

    pub fn tfidf(&self) -> &TfidfModel {
        &self.tfidf
    }

    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.positions.contains_key(&item_id)
    }

    pub fn vector(&self, item_id: ItemId) -> Option<&Vector> {
        self.positions.get(&item_id).map(|&idx| &self.rows[idx])
    }

    /// Cosine-ranked neighbours of `item_id`, ties in corpus order
    pub fn rank_similar(&self, item_id: ItemId, k: usize) -> Vec<(ItemId, f32)> {
        let Some(&query_idx) = self.positions.get(&item_id) else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let query = &self.rows[query_idx];
        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != query_idx && self.item_ids[idx] != item_id)
            .map(|(idx, row)| (idx, query.cosine_similarity(row)))
            .collect();

        scored.sort_by_key(|&(idx, score)| (Reverse(OrderedFloat(score)), idx));
        scored.truncate(k);
        scored
            .into_iter()
            .map(|(idx, score)| (self.item_ids[idx], score))
            .collect()
    }
}

/// Content-based similarity over the whole catalog
pub struct SimilarityEngine {
    catalog: Arc<dyn CatalogProvider>,
    vectorizer: TfidfVectorizer,
    scorer: Arc<dyn PopularityScorer>,
    model: RwLock<Option<Arc<FittedModel>>>,
}

impl SimilarityEngine {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: &RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            vectorizer: config.vectorizer(),
            scorer: Arc::new(ByIdentifier),
            model: RwLock::new(None),
        })
    }

    /// Replace the popularity scorer (identifier order by default)
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn PopularityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.model.read().is_some()
    }

    /// Current model without triggering a fit
    pub fn current_model(&self) -> Option<Arc<FittedModel>> {
        self.model.read().clone()
    }

    /// Rebuild the model from a full catalog read.
    ///
    /// Returns `Ok(false)` when the catalog is too small to compare anything;
    /// the engine is then left unfit and the next query tries again.
    pub fn fit(&self) -> Result<bool> {
        // Read the generation first so a concurrent change triggers another fit
        let generation = self.catalog.version();
        let Some(corpus) = build_corpus(self.catalog.as_ref())? else {
            debug!("Not enough items to fit similarity model");
            *self.model.write() = None;
            return Ok(false);
        };

        let (tfidf, rows) = self.vectorizer.fit_transform(corpus.documents())?;
        let (_, item_ids) = corpus.into_parts();
        let model = FittedModel::new(tfidf, rows, item_ids, generation);
        debug!(
            "Fitted similarity model: {} documents, {} terms, generation {}",
            model.len(),
            model.vocabulary_size(),
            generation
        );

        *self.model.write() = Some(Arc::new(model));
        Ok(true)
    }

    /// Model for the current catalog generation, fitting if needed
    pub fn model(&self) -> Result<Option<Arc<FittedModel>>> {
        let version = self.catalog.version();
        if let Some(model) = self.model.read().as_ref() {
            if model.generation == version {
                return Ok(Some(model.clone()));
            }
            info!(
                "Catalog generation changed ({} -> {}), refitting",
                model.generation, version
            );
        }

        if !self.fit()? {
            return Ok(None);
        }
        Ok(self.current_model())
    }

    /// Like [`ItemSimilarity::similar_items`] but with cosine scores
    pub fn similar_with_scores(&self, item_id: ItemId, k: usize) -> Result<Vec<(ItemId, f32)>> {
        match self.model()? {
            Some(model) => Ok(model.rank_similar(item_id, k)),
            None => Ok(Vec::new()),
        }
    }
}

impl ItemSimilarity for SimilarityEngine {
    fn similar_items(&self, item_id: ItemId, k: usize) -> Result<Vec<ItemId>> {
        Ok(self
            .similar_with_scores(item_id, k)?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    fn popular_items(&self, k: usize) -> Result<Vec<Item>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let items = self.catalog.list_items()?;
        Ok(rank_popular(items, self.scorer.as_ref(), k))
    }
}
