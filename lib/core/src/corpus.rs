// Text corpus building: one document string per catalog item
use crate::{CatalogProvider, Item, ItemId, Result};

/// Similarity needs at least two points to compare
pub const MIN_CORPUS_ITEMS: usize = 2;

/// Documents index-aligned with the ids of the items they were built from
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    documents: Vec<String>,
    item_ids: Vec<ItemId>,
}

impl Corpus {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    #[inline]
    pub fn item_ids(&self) -> &[ItemId] {
        &self.item_ids
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<ItemId>) {
        (self.documents, self.item_ids)
    }
}

/// Build the document for one item:
/// `title creator [description] tag1 tag2 ...`
pub fn item_document(item: &Item, categories: &[String]) -> String {
    let mut text = format!("{} {} ", item.title, item.creator);
    if let Some(description) = &item.description {
        text.push_str(description);
    }
    text.push(' ');
    text.push_str(&categories.join(" "));
    text
}

/// Read the whole catalog and build its corpus.
///
/// Returns `Ok(None)` when the catalog holds fewer than [`MIN_CORPUS_ITEMS`] items.
pub fn build_corpus(catalog: &dyn CatalogProvider) -> Result<Option<Corpus>> {
    let items = catalog.list_items()?;
    if items.len() < MIN_CORPUS_ITEMS {
        return Ok(None);
    }

    let mut documents = Vec::with_capacity(items.len());
    let mut item_ids = Vec::with_capacity(items.len());
    for item in &items {
        let categories = catalog.list_categories_for(item)?;
        documents.push(item_document(item, &categories));
        item_ids.push(item.id);
    }

    Ok(Some(Corpus { documents, item_ids }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryCatalog;

    #[test]
    fn test_document_layout() {
        let item = Item::new(1, "Dune", "Herbert")
            .with_description("desert planet")
            .with_categories(["sci-fi", "classic"]);
        assert_eq!(
            item_document(&item, &item.categories),
            "Dune Herbert desert planet sci-fi classic"
        );
    }

    #[test]
    fn test_document_without_description_or_tags() {
        let item = Item::new(1, "Dune", "Herbert");
        assert_eq!(item_document(&item, &[]), "Dune Herbert  ");
    }

    #[test]
    fn test_build_corpus_requires_two_items() {
        let catalog = InMemoryCatalog::new();
        assert!(build_corpus(&catalog).unwrap().is_none());

        catalog.upsert(Item::new(1, "Dune", "Herbert"));
        assert!(build_corpus(&catalog).unwrap().is_none());

        catalog.upsert(Item::new(2, "Emma", "Austen"));
        let corpus = build_corpus(&catalog).unwrap().unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_build_corpus_is_index_aligned() {
        let catalog = InMemoryCatalog::from_items(vec![
            Item::new(5, "Emma", "Austen"),
            Item::new(2, "Dune", "Herbert").with_categories(["sci-fi"]),
            Item::new(9, "Solaris", "Lem"),
        ]);
        let corpus = build_corpus(&catalog).unwrap().unwrap();
        assert_eq!(corpus.documents().len(), corpus.item_ids().len());
        assert_eq!(corpus.item_ids(), &[ItemId(5), ItemId(2), ItemId(9)]);
        assert!(corpus.documents()[1].starts_with("Dune Herbert"));
        assert!(corpus.documents()[1].ends_with("sci-fi"));
    }
}
