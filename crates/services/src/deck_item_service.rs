use std::sync::Arc;

use futures_util::future::join_all;
use learn_core::model::{DeckId, ItemError, ItemId, ItemPage, ItemQuery, ListItem};
use storage::repository::DeckItemRepository;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::DeckItemServiceError;

/// Per-id outcome of a bulk delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<ItemId>,
    pub failed: Vec<ItemId>,
}

impl BulkDeleteReport {
    /// Number of delete calls that were issued.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List, edit and delete the items of a deck.
#[derive(Clone)]
pub struct DeckItemService {
    clock: Clock,
    items: Arc<dyn DeckItemRepository>,
}

impl DeckItemService {
    #[must_use]
    pub fn new(clock: Clock, items: Arc<dyn DeckItemRepository>) -> Self {
        Self { clock, items }
    }

    /// Fetch one filtered, sorted page of items.
    ///
    /// # Errors
    ///
    /// Returns `DeckItemServiceError::Storage` if repository access fails.
    pub async fn list_page(&self, query: &ItemQuery) -> Result<ItemPage, DeckItemServiceError> {
        debug!(
            deck_id = %query.deck_id,
            page = query.page,
            page_size = query.page_size,
            query = query.query.as_deref().unwrap_or(""),
            "listing deck items"
        );
        let page = self.items.list_items(query).await?;
        Ok(page)
    }

    /// Number of items in the deck, ignoring every filter.
    ///
    /// # Errors
    ///
    /// Returns `DeckItemServiceError::Storage` if repository access fails.
    pub async fn item_count(&self, deck_id: DeckId) -> Result<u32, DeckItemServiceError> {
        let count = self.items.count_items(deck_id).await?;
        Ok(count)
    }

    /// Fetch a single item.
    ///
    /// # Errors
    ///
    /// Returns `DeckItemServiceError::Storage` with `StorageError::NotFound` when missing.
    pub async fn get_item(
        &self,
        deck_id: DeckId,
        id: ItemId,
    ) -> Result<ListItem, DeckItemServiceError> {
        let item = self.items.get_item(deck_id, id).await?;
        Ok(item)
    }

    /// Delete a single item.
    ///
    /// # Errors
    ///
    /// Returns `DeckItemServiceError::Storage` if the item is missing or deletion fails.
    pub async fn delete_item(&self, deck_id: DeckId, id: ItemId) -> Result<(), DeckItemServiceError> {
        debug!(deck_id = %deck_id, item_id = %id, "deleting item");
        self.items.delete_item(deck_id, id).await.map_err(|err| {
            warn!(deck_id = %deck_id, item_id = %id, error = %err, "item delete failed");
            DeckItemServiceError::from(err)
        })
    }

    /// Delete every id concurrently and wait for all of them to settle.
    ///
    /// A failing delete never cancels the others and successful deletes are
    /// not rolled back.
    pub async fn bulk_delete(&self, deck_id: DeckId, ids: &[ItemId]) -> BulkDeleteReport {
        let outcomes = join_all(
            ids.iter()
                .map(|&id| async move { (id, self.delete_item(deck_id, id).await) }),
        )
        .await;

        let mut report = BulkDeleteReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.deleted.push(id),
                Err(_) => report.failed.push(id),
            }
        }
        info!(
            deck_id = %deck_id,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "bulk delete finished"
        );
        report
    }

    /// Replace the front/back text of a legacy vocabulary card.
    ///
    /// # Errors
    ///
    /// Returns `DeckItemServiceError::Item` if the item is not a legacy card or a side is blank.
    /// Returns `DeckItemServiceError::Storage` if the item is missing or persistence fails.
    pub async fn update_legacy_card(
        &self,
        deck_id: DeckId,
        id: ItemId,
        front: &str,
        back: &str,
    ) -> Result<ListItem, DeckItemServiceError> {
        let entry = match self.items.get_item(deck_id, id).await? {
            ListItem::Vocabulary(entry) if entry.is_legacy() => entry,
            _ => return Err(ItemError::NotLegacy.into()),
        };
        let updated = ListItem::Vocabulary(entry.with_text(front, back, self.clock.now())?);
        self.items.upsert_item(deck_id, &updated).await?;
        debug!(deck_id = %deck_id, item_id = %id, "legacy card updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use learn_core::model::{CultureDraft, PartOfSpeech, VocabularyDraft};
    use learn_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    /// Delegates to memory but fails deletes for chosen ids.
    struct FlakyItems {
        inner: InMemoryRepository,
        failing: BTreeSet<ItemId>,
        delete_calls: AtomicUsize,
    }

    impl FlakyItems {
        fn new(inner: InMemoryRepository, failing: &[u64]) -> Self {
            Self {
                inner,
                failing: failing.iter().copied().map(ItemId::new).collect(),
                delete_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DeckItemRepository for FlakyItems {
        async fn upsert_item(&self, deck_id: DeckId, item: &ListItem) -> Result<(), StorageError> {
            self.inner.upsert_item(deck_id, item).await
        }

        async fn get_item(&self, deck_id: DeckId, id: ItemId) -> Result<ListItem, StorageError> {
            self.inner.get_item(deck_id, id).await
        }

        async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, StorageError> {
            self.inner.list_items(query).await
        }

        async fn count_items(&self, deck_id: DeckId) -> Result<u32, StorageError> {
            self.inner.count_items(deck_id).await
        }

        async fn delete_item(&self, deck_id: DeckId, id: ItemId) -> Result<(), StorageError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&id) {
                return Err(StorageError::Connection("offline".into()));
            }
            self.inner.delete_item(deck_id, id).await
        }
    }

    const DECK: DeckId = DeckId::new(1);

    async fn seeded_repo(count: u64) -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        for id in 1..=count {
            let entry = VocabularyDraft::legacy(format!("λέξη {id}"), format!("word {id}"))
                .validate(ItemId::new(id), fixed_now())
                .unwrap();
            repo.upsert_item(DECK, &ListItem::Vocabulary(entry))
                .await
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn bulk_delete_calls_every_id_despite_failures() {
        let repo = seeded_repo(4).await;
        let flaky = Arc::new(FlakyItems::new(repo.clone(), &[2, 3]));
        let service = DeckItemService::new(Clock::fixed(fixed_now()), flaky.clone());

        let ids: Vec<ItemId> = (1..=4).map(ItemId::new).collect();
        let report = service.bulk_delete(DECK, &ids).await;

        assert_eq!(flaky.delete_calls.load(Ordering::SeqCst), 4);
        assert_eq!(report.attempted(), 4);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.failed, vec![ItemId::new(2), ItemId::new(3)]);
        assert_eq!(repo.count_items(DECK).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn bulk_delete_of_nothing_is_clean() {
        let repo = seeded_repo(1).await;
        let service = DeckItemService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        let report = service.bulk_delete(DECK, &[]).await;
        assert!(report.is_clean());
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test]
    async fn delete_missing_item_is_not_found() {
        let repo = seeded_repo(1).await;
        let service = DeckItemService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        let err = service
            .delete_item(DECK, ItemId::new(42))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_legacy_card_rewrites_text_and_timestamp() {
        let repo = seeded_repo(1).await;
        let later = fixed_now() + Duration::minutes(10);
        let service = DeckItemService::new(Clock::fixed(later), Arc::new(repo.clone()));

        let updated = service
            .update_legacy_card(DECK, ItemId::new(1), " καλημέρα ", "good morning")
            .await
            .unwrap();
        assert_eq!(updated.primary_text(), "καλημέρα");
        assert_eq!(updated.updated_at(), later);

        let stored = repo.get_item(DECK, ItemId::new(1)).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_legacy_card_rejects_blank_side() {
        let repo = seeded_repo(1).await;
        let service = DeckItemService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        let err = service
            .update_legacy_card(DECK, ItemId::new(1), "x", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, DeckItemServiceError::Item(ItemError::EmptyBack)));
    }

    #[tokio::test]
    async fn update_legacy_card_refuses_word_entries_and_questions() {
        let repo = InMemoryRepository::new();
        let word = VocabularyDraft::word("σπίτι", "house", PartOfSpeech::Noun)
            .validate(ItemId::new(1), fixed_now())
            .unwrap();
        let question = CultureDraft::new("Capital?", &["Athens", "Sparta"], 0)
            .validate(ItemId::new(2), fixed_now())
            .unwrap();
        repo.upsert_item(DECK, &ListItem::Vocabulary(word)).await.unwrap();
        repo.upsert_item(DECK, &ListItem::Culture(question)).await.unwrap();
        let service = DeckItemService::new(Clock::fixed(fixed_now()), Arc::new(repo));

        for id in [1, 2] {
            let err = service
                .update_legacy_card(DECK, ItemId::new(id), "a", "b")
                .await
                .unwrap_err();
            assert!(matches!(err, DeckItemServiceError::Item(ItemError::NotLegacy)));
        }
    }
}
