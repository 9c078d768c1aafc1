use std::sync::Arc;

use learn_core::model::{DeckId, ItemId, ItemPage, ItemQuery, ListItem};
use storage::repository::{DeckItemRepository, Storage, StorageError};
use storage::seed::{CULTURE_DECK_ID, seed_demo_decks};

use learn_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_items};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_default_deck() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    let html = harness.render_until("Showing 1–20 of 30").await;

    assert!(html.contains("Greek A1 · Vocabulary"), "missing deck name in {html}");
    assert!(html.contains("30 items"), "missing item count in {html}");
    assert!(html.contains("Showing 1–20 of 30"), "missing range in {html}");
    assert!(html.contains("Page 1 of 2"), "missing page count in {html}");
    // newest first, and the legacy cards are the newest
    assert!(html.contains("ευχαριστώ"), "missing newest row in {html}");
    assert!(html.contains("Legacy"), "missing legacy badge in {html}");
    assert!(
        html.contains("Select all on this page"),
        "vocabulary decks offer selection: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn deck_view_smoke_culture_deck_has_no_bulk_tools() {
    let mut harness = setup_view_harness(ViewKind::Deck(CULTURE_DECK_ID.value())).await;
    harness.rebuild();
    let html = harness.render_until("Showing 1–6 of 6").await;

    assert!(html.contains("Question"), "missing question column in {html}");
    assert!(html.contains("capital of Greece"), "missing question row in {html}");
    assert!(!html.contains("Select all on this page"), "unexpected selection in {html}");
    assert!(!html.contains("Part of speech"), "unexpected filter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn deck_view_smoke_missing_deck() {
    let mut harness = setup_view_harness(ViewKind::Deck(99)).await;
    harness.rebuild();
    let html = harness.render_until("no longer exists").await;
    assert!(html.contains("This deck no longer exists."), "missing message in {html}");
}

struct FailingItems;

#[async_trait::async_trait]
impl DeckItemRepository for FailingItems {
    async fn upsert_item(&self, _deck_id: DeckId, _item: &ListItem) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_item(&self, _deck_id: DeckId, _id: ItemId) -> Result<ListItem, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_items(&self, _query: &ItemQuery) -> Result<ItemPage, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn count_items(&self, _deck_id: DeckId) -> Result<u32, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_item(&self, _deck_id: DeckId, _id: ItemId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn deck_view_smoke_renders_list_error() {
    let storage = Storage::in_memory();
    seed_demo_decks(&storage, fixed_now())
        .await
        .expect("seed demo decks");
    let mut harness = setup_view_harness_with_items(ViewKind::Home, storage, Arc::new(FailingItems));
    harness.rebuild();
    let html = harness.render_until("Could not load items").await;
    assert!(html.contains("Could not load items"), "missing error in {html}");
}
