use async_trait::async_trait;
use learn_core::model::{Deck, DeckId, ItemId, ItemPage, ItemQuery, ListItem};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for decks.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Persist or update a deck.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the deck cannot be stored.
    async fn upsert_deck(&self, deck: &Deck) -> Result<(), StorageError>;

    /// Fetch a deck by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn get_deck(&self, id: DeckId) -> Result<Option<Deck>, StorageError>;

    /// List decks ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn list_decks(&self, limit: u32) -> Result<Vec<Deck>, StorageError>;
}

/// Repository contract for the items of a deck.
#[async_trait]
pub trait DeckItemRepository: Send + Sync {
    /// Persist or replace an item under the given deck.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the item cannot be stored.
    async fn upsert_item(&self, deck_id: DeckId, item: &ListItem) -> Result<(), StorageError>;

    /// Fetch a single item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_item(&self, deck_id: DeckId, id: ItemId) -> Result<ListItem, StorageError>;

    /// Return one filtered, sorted page of items and the total match count.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, StorageError>;

    /// Count every item in a deck, ignoring filters.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for adapter failures.
    async fn count_items(&self, deck_id: DeckId) -> Result<u32, StorageError>;

    /// Delete a single item.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the item does not exist.
    async fn delete_item(&self, deck_id: DeckId, id: ItemId) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    decks: Arc<Mutex<HashMap<DeckId, Deck>>>,
    items: Arc<Mutex<HashMap<(DeckId, ItemId), ListItem>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl DeckRepository for InMemoryRepository {
    async fn upsert_deck(&self, deck: &Deck) -> Result<(), StorageError> {
        let mut guard = self.decks.lock().map_err(poisoned)?;
        guard.insert(deck.id(), deck.clone());
        Ok(())
    }

    async fn get_deck(&self, id: DeckId) -> Result<Option<Deck>, StorageError> {
        let guard = self.decks.lock().map_err(poisoned)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_decks(&self, limit: u32) -> Result<Vec<Deck>, StorageError> {
        let guard = self.decks.lock().map_err(poisoned)?;
        let mut decks: Vec<Deck> = guard.values().cloned().collect();
        decks.sort_by_key(Deck::id);
        decks.truncate(limit as usize);
        Ok(decks)
    }
}

#[async_trait]
impl DeckItemRepository for InMemoryRepository {
    async fn upsert_item(&self, deck_id: DeckId, item: &ListItem) -> Result<(), StorageError> {
        let mut guard = self.items.lock().map_err(poisoned)?;
        guard.insert((deck_id, item.id()), item.clone());
        Ok(())
    }

    async fn get_item(&self, deck_id: DeckId, id: ItemId) -> Result<ListItem, StorageError> {
        let guard = self.items.lock().map_err(poisoned)?;
        guard.get(&(deck_id, id)).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, StorageError> {
        let deck_items: Vec<ListItem> = {
            let guard = self.items.lock().map_err(poisoned)?;
            guard
                .iter()
                .filter(|((deck_id, _), _)| *deck_id == query.deck_id)
                .map(|(_, item)| item.clone())
                .collect()
        };
        Ok(query.select_page(deck_items))
    }

    async fn count_items(&self, deck_id: DeckId) -> Result<u32, StorageError> {
        let guard = self.items.lock().map_err(poisoned)?;
        let count = guard.keys().filter(|(d, _)| *d == deck_id).count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn delete_item(&self, deck_id: DeckId, id: ItemId) -> Result<(), StorageError> {
        let mut guard = self.items.lock().map_err(poisoned)?;
        guard
            .remove(&(deck_id, id))
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

/// Aggregates deck and item repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub decks: Arc<dyn DeckRepository>,
    pub items: Arc<dyn DeckItemRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let decks: Arc<dyn DeckRepository> = Arc::new(repo.clone());
        let items: Arc<dyn DeckItemRepository> = Arc::new(repo);
        Self { decks, items }
    }
}
