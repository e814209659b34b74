//! Catalog provider seam and the in-process catalogs used by the binary and tests.
//!
//! The recommendation core never owns catalog data. It reads a full snapshot
//! through [`CatalogProvider`] each time it (re)trains, and uses
//! [`CatalogProvider::version`] as a generation token to detect changes.

use crate::{Error, Item, ItemId, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Read-only access to the item catalog
pub trait CatalogProvider: Send + Sync {
    /// All items, in catalog iteration order
    fn list_items(&self) -> Result<Vec<Item>>;

    /// Category tags of one item
    fn list_categories_for(&self, item: &Item) -> Result<Vec<String>> {
        Ok(item.categories.clone())
    }

    fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.list_items()?.into_iter().find(|item| item.id == id))
    }

    /// Monotonic generation token, bumped whenever the catalog content changes.
    /// Providers that cannot track changes return a constant.
    fn version(&self) -> u64 {
        0
    }
}

/// A customer review. Only the rating matters for popularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub item_id: ItemId,
    pub rating: u8,
}

/// One ordered line (item x quantity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// On-disk JSON shape of a catalog export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub items: Vec<Item>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub order_lines: Vec<OrderLine>,
}

impl CatalogSnapshot {
    /// Reject ratings outside 1..=5
    pub fn validate(&self) -> Result<()> {
        for review in &self.reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(Error::InvalidRating {
                    item_id: review.item_id.get(),
                    rating: review.rating,
                });
            }
        }
        Ok(())
    }
}

/// Catalog held in memory. Every mutation bumps the version.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<Vec<Item>>,
    version: AtomicU64,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(items),
            version: AtomicU64::new(1),
        }
    }

    /// Insert or replace an item, keeping its position if it already exists
    pub fn upsert(&self, item: Item) {
        let mut items = self.items.write();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    pub fn remove(&self, id: ItemId) -> bool {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() != before;
        if removed {
            self.version.fetch_add(1, Ordering::AcqRel);
        }
        removed
    }

    /// Replace the whole content at once
    pub fn replace_all(&self, items: Vec<Item>) {
        *self.items.write() = items;
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().clone())
    }

    fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.read().iter().find(|item| item.id == id).cloned())
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

/// Catalog loaded from a JSON [`CatalogSnapshot`] file
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    items: InMemoryCatalog,
    reviews: RwLock<Vec<Review>>,
    order_lines: RwLock<Vec<OrderLine>>,
}

impl JsonCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = Self::read_snapshot(&path)?;
        Ok(Self {
            path,
            items: InMemoryCatalog::from_items(snapshot.items),
            reviews: RwLock::new(snapshot.reviews),
            order_lines: RwLock::new(snapshot.order_lines),
        })
    }

    fn read_snapshot(path: &Path) -> Result<CatalogSnapshot> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Re-read the file. On error the previous content stays in place.
    pub fn reload(&self) -> Result<()> {
        let snapshot = Self::read_snapshot(&self.path)?;
        *self.reviews.write() = snapshot.reviews;
        *self.order_lines.write() = snapshot.order_lines;
        self.items.replace_all(snapshot.items);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.reviews.read().clone()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.order_lines.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for JsonCatalog {
    fn list_items(&self) -> Result<Vec<Item>> {
        self.items.list_items()
    }

    fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        self.items.get_item(id)
    }

    fn version(&self) -> u64 {
        self.items.version()
    }
}
