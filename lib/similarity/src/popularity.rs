//! Popularity ranking for the "popular items" list.
//!
//! Ranking goes through a [`PopularityScorer`], so real signals (ratings,
//! sales) can replace the identifier stand-in without touching the engine.

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use shelfwise_core::{Item, ItemId, OrderLine, Review};
use std::cmp::Reverse;

/// Scores an item; higher means more popular
pub trait PopularityScorer: Send + Sync {
    fn score(&self, item: &Item) -> f64;
}

impl<F> PopularityScorer for F
where
    F: Fn(&Item) -> f64 + Send + Sync,
{
    fn score(&self, item: &Item) -> f64 {
        self(item)
    }
}

/// Newest-first stand-in: larger identifiers rank higher
#[derive(Debug, Clone, Copy, Default)]
pub struct ByIdentifier;

impl PopularityScorer for ByIdentifier {
    fn score(&self, item: &Item) -> f64 {
        item.id.get() as f64
    }
}

/// Mean review rating. Unrated items score 0.
#[derive(Debug, Clone, Default)]
pub struct ByAverageRating {
    ratings: AHashMap<ItemId, (u64, u64)>,
}

impl ByAverageRating {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut ratings: AHashMap<ItemId, (u64, u64)> = AHashMap::new();
        for review in reviews {
            let entry = ratings.entry(review.item_id).or_insert((0, 0));
            entry.0 += u64::from(review.rating);
            entry.1 += 1;
        }
        Self { ratings }
    }
}

impl PopularityScorer for ByAverageRating {
    fn score(&self, item: &Item) -> f64 {
        match self.ratings.get(&item.id) {
            Some(&(sum, count)) if count > 0 => sum as f64 / count as f64,
            _ => 0.0,
        }
    }
}

/// Total ordered quantity
#[derive(Debug, Clone, Default)]
pub struct BySales {
    sold: AHashMap<ItemId, u64>,
}

impl BySales {
    pub fn from_order_lines(lines: &[OrderLine]) -> Self {
        let mut sold: AHashMap<ItemId, u64> = AHashMap::new();
        for line in lines {
            *sold.entry(line.item_id).or_insert(0) += u64::from(line.quantity);
        }
        Self { sold }
    }
}

impl PopularityScorer for BySales {
    fn score(&self, item: &Item) -> f64 {
        self.sold.get(&item.id).copied().unwrap_or(0) as f64
    }
}

/// Top `k` items by score, descending. Equal scores rank the larger identifier first.
pub fn rank_popular(mut items: Vec<Item>, scorer: &dyn PopularityScorer, k: usize) -> Vec<Item> {
    if k == 0 {
        return Vec::new();
    }
    items.sort_by_cached_key(|item| (Reverse(OrderedFloat(scorer.score(item))), Reverse(item.id)));
    items.truncate(k);
    items
}
