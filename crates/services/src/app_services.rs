use std::sync::Arc;

use learn_core::model::DeckId;
use storage::repository::{DeckRepository, Storage};
use storage::seed::{VOCABULARY_DECK_ID, seed_demo_decks};
use tracing::info;

use crate::Clock;
use crate::deck_item_service::DeckItemService;
use crate::deck_service::DeckService;
use crate::error::AppServicesError;

/// Assembles app-facing services and resolves a usable deck id.
#[derive(Clone)]
pub struct AppServices {
    deck_id: DeckId,
    deck_service: Arc<DeckService>,
    deck_item_service: Arc<DeckItemService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or demo seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        preferred_deck_id: DeckId,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, preferred_deck_id).await
    }

    /// Build services over an already constructed storage.
    ///
    /// An empty store is seeded with the demo decks.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if deck lookup or demo seeding fails.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        preferred_deck_id: DeckId,
    ) -> Result<Self, AppServicesError> {
        let deck_id = ensure_default_deck(&storage, clock, preferred_deck_id).await?;

        let deck_service = Arc::new(DeckService::new(
            Arc::clone(&storage.decks),
            Arc::clone(&storage.items),
        ));
        let deck_item_service = Arc::new(DeckItemService::new(clock, Arc::clone(&storage.items)));

        Ok(Self {
            deck_id,
            deck_service,
            deck_item_service,
        })
    }

    #[must_use]
    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }

    #[must_use]
    pub fn deck_service(&self) -> Arc<DeckService> {
        Arc::clone(&self.deck_service)
    }

    #[must_use]
    pub fn deck_item_service(&self) -> Arc<DeckItemService> {
        Arc::clone(&self.deck_item_service)
    }
}

async fn ensure_default_deck(
    storage: &Storage,
    clock: Clock,
    preferred_id: DeckId,
) -> Result<DeckId, AppServicesError> {
    let decks: &dyn DeckRepository = storage.decks.as_ref();
    if decks.get_deck(preferred_id).await?.is_some() {
        return Ok(preferred_id);
    }

    let existing = decks.list_decks(128).await?;
    if let Some(first) = existing.first() {
        return Ok(first.id());
    }

    let report = seed_demo_decks(storage, clock.now()).await?;
    info!(
        vocabulary = report.vocabulary_items,
        culture = report.culture_items,
        "seeded demo decks into empty store"
    );
    Ok(VOCABULARY_DECK_ID)
}
