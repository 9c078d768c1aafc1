use std::sync::Arc;

use learn_core::model::{Deck, DeckId, DeckSummary};
use storage::repository::{DeckItemRepository, DeckRepository};

use crate::error::DeckServiceError;

/// Read access to decks and their headline numbers.
#[derive(Clone)]
pub struct DeckService {
    decks: Arc<dyn DeckRepository>,
    items: Arc<dyn DeckItemRepository>,
}

impl DeckService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>, items: Arc<dyn DeckItemRepository>) -> Self {
        Self { decks, items }
    }

    /// List decks ordered by ID, up to the given limit.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if repository access fails.
    pub async fn list_decks(&self, limit: u32) -> Result<Vec<Deck>, DeckServiceError> {
        let decks = self.decks.list_decks(limit).await?;
        Ok(decks)
    }

    /// Fetch a deck by ID.
    ///
    /// Returns `Ok(None)` when the deck does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if repository access fails.
    pub async fn get_deck(&self, deck_id: DeckId) -> Result<Option<Deck>, DeckServiceError> {
        let deck = self.decks.get_deck(deck_id).await?;
        Ok(deck)
    }

    /// Deck metadata plus its unfiltered item count.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::NotFound` if the deck is missing.
    /// Returns `DeckServiceError::Storage` if repository access fails.
    pub async fn deck_summary(&self, deck_id: DeckId) -> Result<DeckSummary, DeckServiceError> {
        let deck = self
            .decks
            .get_deck(deck_id)
            .await?
            .ok_or(DeckServiceError::NotFound(deck_id))?;
        let item_count = self.items.count_items(deck_id).await?;
        Ok(DeckSummary::from_deck(&deck, item_count))
    }

    /// Summaries for every deck, in ID order.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if repository access fails.
    pub async fn list_summaries(&self, limit: u32) -> Result<Vec<DeckSummary>, DeckServiceError> {
        let decks = self.decks.list_decks(limit).await?;
        let mut summaries = Vec::with_capacity(decks.len());
        for deck in &decks {
            let item_count = self.items.count_items(deck.id()).await?;
            summaries.push(DeckSummary::from_deck(deck, item_count));
        }
        Ok(summaries)
    }
}
