use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use learn_core::model::{
    Deck, DeckId, DeckKind, DeckSummary, ItemId, ItemPage, ItemQuery, ListItem, PartOfSpeech,
    PartOfSpeechFilter, SortField, SortOrder,
};
use learn_core::time::fixed_now;
use services::{Clock, DeckItemService, DeckService};
use storage::repository::{DeckItemRepository, Storage, StorageError};
use storage::seed::{CULTURE_DECK_ID, VOCABULARY_DECK_ID, seed_demo_decks};

use crate::config::DeckDetailConfig;
use crate::views::ViewError;
use crate::vm::{empty_message, results_summary};

use super::controller::{DeckDetailController, load_page};
use super::state::{
    BulkDeleteState, DeckDetailMode, DetailTab, EscapeOutcome, FetchRequest, FilterPatch,
    ItemDeleteState, NoticeKind,
};

/// Counts list and delete calls and fails deletes for chosen ids.
struct CountingItems {
    inner: Arc<dyn DeckItemRepository>,
    failing: BTreeSet<ItemId>,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

#[async_trait]
impl DeckItemRepository for CountingItems {
    async fn upsert_item(&self, deck_id: DeckId, item: &ListItem) -> Result<(), StorageError> {
        self.inner.upsert_item(deck_id, item).await
    }

    async fn get_item(&self, deck_id: DeckId, id: ItemId) -> Result<ListItem, StorageError> {
        self.inner.get_item(deck_id, id).await
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, StorageError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
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

struct Fixture {
    storage: Storage,
    service: DeckItemService,
    counting: Arc<CountingItems>,
    vocabulary: DeckSummary,
    culture: DeckSummary,
}

async fn fixture_failing(failing: &[u64]) -> Fixture {
    let storage = Storage::in_memory();
    seed_demo_decks(&storage, fixed_now()).await.unwrap();
    let counting = Arc::new(CountingItems {
        inner: Arc::clone(&storage.items),
        failing: failing.iter().copied().map(ItemId::new).collect(),
        list_calls: AtomicUsize::new(0),
        delete_calls: AtomicUsize::new(0),
    });
    let service = DeckItemService::new(Clock::fixed(fixed_now()), counting.clone());
    let decks = DeckService::new(Arc::clone(&storage.decks), Arc::clone(&storage.items));
    let vocabulary = decks.deck_summary(VOCABULARY_DECK_ID).await.unwrap();
    let culture = decks.deck_summary(CULTURE_DECK_ID).await.unwrap();
    Fixture {
        storage,
        service,
        counting,
        vocabulary,
        culture,
    }
}

async fn fixture() -> Fixture {
    fixture_failing(&[]).await
}

async fn run(ctrl: &mut DeckDetailController, service: &DeckItemService, request: FetchRequest) {
    let result = load_page(service, &request.query).await;
    assert!(ctrl.finish_fetch(request.seq, result));
}

async fn opened(fx: &Fixture, deck: &DeckSummary) -> DeckDetailController {
    let mut ctrl = DeckDetailController::new(DeckDetailConfig::default(), deck.clone());
    let request = ctrl.open(deck.clone());
    run(&mut ctrl, &fx.service, request).await;
    ctrl
}

#[tokio::test]
async fn open_loads_first_page() {
    let fx = fixture().await;
    let ctrl = opened(&fx, &fx.vocabulary).await;

    assert!(ctrl.mode().is_list());
    assert_eq!(ctrl.list().items.len(), 20);
    assert_eq!(ctrl.list().total, 30);
    assert_eq!(ctrl.deck().item_count, 30);
    assert_eq!(ctrl.total_pages(), 2);
    assert!(!ctrl.list().loading);
    // newest first
    assert_eq!(ctrl.list().items[0].id(), ItemId::new(30));
}

#[tokio::test]
async fn search_shows_n_of_m_and_filtered_empty_message() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    let ticket = ctrl.set_query("σπ");
    let request = ctrl.debounce_elapsed(ticket).expect("settled query fetches");
    assert_eq!(request.query.query.as_deref(), Some("σπ"));
    run(&mut ctrl, &fx.service, request).await;

    let filtered = ctrl.filters().is_filtered();
    assert_eq!(
        results_summary(filtered, ctrl.list().total, ctrl.deck().item_count),
        Some("2 of 30".to_string())
    );

    let ticket = ctrl.set_query("σπζζ");
    let request = ctrl.debounce_elapsed(ticket).unwrap();
    run(&mut ctrl, &fx.service, request).await;
    assert!(ctrl.list().items.is_empty());
    assert_eq!(
        empty_message(ctrl.deck().kind, ctrl.filters().is_filtered()),
        "No items match your filters."
    );
}

#[tokio::test]
async fn empty_deck_without_filters_uses_deck_message() {
    let fx = fixture().await;
    let deck = Deck::new(DeckId::new(9), "Empty", DeckKind::Vocabulary, fixed_now()).unwrap();
    fx.storage.decks.upsert_deck(&deck).await.unwrap();
    let summary = DeckSummary::from_deck(&deck, 0);

    let ctrl = opened(&fx, &summary).await;
    assert_eq!(ctrl.list().total, 0);
    assert_eq!(
        empty_message(ctrl.deck().kind, ctrl.filters().is_filtered()),
        "This deck has no words yet."
    );
    assert_eq!(
        results_summary(ctrl.filters().is_filtered(), 0, ctrl.deck().item_count),
        None
    );
}

#[tokio::test]
async fn non_text_filters_reset_page_before_fetching() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    let request = ctrl.set_page(2).unwrap();
    assert_eq!(request.query.page, 2);
    run(&mut ctrl, &fx.service, request).await;

    let request = ctrl
        .apply_filter(FilterPatch::part_of_speech(PartOfSpeechFilter::Only(
            PartOfSpeech::Verb,
        )))
        .unwrap();
    assert_eq!(request.query.page, 1);
    assert_eq!(ctrl.filters().page, 1);
    run(&mut ctrl, &fx.service, request).await;
    assert_eq!(ctrl.list().total, 7);

    let request = ctrl
        .apply_filter(FilterPatch::part_of_speech(PartOfSpeechFilter::All))
        .unwrap();
    run(&mut ctrl, &fx.service, request).await;
    let request = ctrl.set_page(2).unwrap();
    run(&mut ctrl, &fx.service, request).await;

    let request = ctrl.toggle_sort(SortField::Front).unwrap();
    assert_eq!(request.query.page, 1);
    assert_eq!(request.query.sort_order, SortOrder::Asc);
    run(&mut ctrl, &fx.service, request).await;

    let request = ctrl.toggle_sort(SortField::Front).unwrap();
    assert_eq!(request.query.sort_order, SortOrder::Desc);
}

#[tokio::test]
async fn unchanged_filter_does_not_fetch() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    let patch = FilterPatch::sort(SortField::CreatedAt, SortOrder::Desc);
    assert!(ctrl.apply_filter(patch).is_none());
}

#[tokio::test]
async fn superseded_keystrokes_never_fetch() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.set_page(2).unwrap();

    let first = ctrl.set_query("σ");
    let second = ctrl.set_query("σπ");
    assert!(ctrl.debounce_elapsed(first).is_none());

    let request = ctrl.debounce_elapsed(second).unwrap();
    assert_eq!(request.query.query.as_deref(), Some("σπ"));
    assert_eq!(request.query.page, 1);

    // same settled text after trimming
    let third = ctrl.set_query(" σπ ");
    assert!(ctrl.debounce_elapsed(third).is_none());
}

#[tokio::test(start_paused = true)]
async fn typing_fires_one_fetch_after_quiet_period() {
    let fx = fixture().await;
    let ctrl = Arc::new(Mutex::new(opened(&fx, &fx.vocabulary).await));
    let fired: Arc<Mutex<Vec<FetchRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let delay = DeckDetailConfig::default().search_debounce();

    for text in ["σ", "σπ", "σπί"] {
        let ticket = ctrl.lock().unwrap().set_query(text);
        let ctrl = Arc::clone(&ctrl);
        let fired = Arc::clone(&fired);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let request = ctrl.lock().unwrap().debounce_elapsed(ticket);
            if let Some(request) = request {
                fired.lock().unwrap().push(request);
            }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(fired.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(300)).await;
    let fired = fired.lock().unwrap();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].query.query.as_deref(), Some("σπί"));
}

#[tokio::test]
async fn select_all_twice_restores_selection() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    assert!(ctrl.toggle_select_all());
    assert_eq!(ctrl.selection().len(), 20);
    assert!(ctrl.is_all_selected());
    assert!(ctrl.toggle_select_all());
    assert!(ctrl.selection().is_empty());

    ctrl.toggle_select_all();
    let full = ctrl.selection().clone();
    ctrl.toggle_select_all();
    ctrl.toggle_select_all();
    assert_eq!(ctrl.selection(), &full);
}

#[tokio::test]
async fn selecting_every_visible_row_checks_select_all() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    let ticket = ctrl.set_query("σπ");
    let request = ctrl.debounce_elapsed(ticket).unwrap();
    run(&mut ctrl, &fx.service, request).await;

    let ids = ctrl.list().ids();
    assert_eq!(ids.len(), 2);
    assert!(ctrl.toggle_select(ids[0]));
    assert!(!ctrl.is_all_selected());
    assert!(ctrl.toggle_select(ids[1]));
    assert!(ctrl.is_all_selected());
}

#[tokio::test]
async fn successful_fetch_clears_selection_but_failure_keeps_it() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    let id = ctrl.list().ids()[0];
    ctrl.toggle_select(id);

    let request = ctrl.begin_fetch();
    assert!(ctrl.finish_fetch(request.seq, Err(ViewError::Unknown)));
    assert_eq!(ctrl.list().error, Some(ViewError::Unknown));
    assert!(ctrl.selection().contains(&id));
    assert_eq!(ctrl.list().items.len(), 20);

    assert!(ctrl.fetch(&fx.service).await);
    assert!(ctrl.selection().is_empty());
    assert_eq!(ctrl.list().error, None);
}

#[tokio::test]
async fn stale_fetch_response_is_dropped() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    let slow = ctrl.begin_fetch();
    let fast = ctrl.set_page(2).unwrap();
    let fast_result = load_page(&fx.service, &fast.query).await;
    assert!(ctrl.finish_fetch(fast.seq, fast_result));
    let slow_result = load_page(&fx.service, &slow.query).await;
    assert!(!ctrl.finish_fetch(slow.seq, slow_result));

    assert_eq!(ctrl.list().items.len(), 10);
    assert_eq!(ctrl.list().items[0].id(), ItemId::new(10));
}

#[tokio::test]
async fn bulk_delete_issues_one_call_per_id_and_one_refetch() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    let ids: Vec<ItemId> = ctrl.list().ids().into_iter().take(3).collect();
    for id in &ids {
        ctrl.toggle_select(*id);
    }
    let lists_before = fx.counting.list_calls.load(Ordering::SeqCst);

    assert!(ctrl.bulk_delete(&fx.service).await.is_none());
    assert!(ctrl.request_bulk_delete());
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Confirming);

    let report = ctrl.bulk_delete(&fx.service).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(fx.counting.delete_calls.load(Ordering::SeqCst), 3);
    assert_eq!(fx.counting.list_calls.load(Ordering::SeqCst), lists_before + 1);
    assert!(ctrl.selection().is_empty());
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Idle);
    assert_eq!(ctrl.deck().item_count, 27);
    let notice = ctrl.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Deleted 3 items.");
}

#[tokio::test]
async fn bulk_delete_partial_failure_reports_count_and_still_refetches() {
    let fx = fixture_failing(&[29, 28]).await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    for id in [30, 29, 28] {
        ctrl.toggle_select(ItemId::new(id));
    }
    let lists_before = fx.counting.list_calls.load(Ordering::SeqCst);

    ctrl.request_bulk_delete();
    let request = ctrl.confirm_bulk_delete().unwrap();
    assert_eq!(request.ids.len(), 3);
    let report = fx.service.bulk_delete(request.deck_id, &request.ids).await;
    assert_eq!(fx.counting.delete_calls.load(Ordering::SeqCst), 3);

    let refetch = ctrl.finish_bulk_delete(&request, &report).unwrap();
    run(&mut ctrl, &fx.service, refetch).await;
    assert_eq!(fx.counting.list_calls.load(Ordering::SeqCst), lists_before + 1);

    let notice = ctrl.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Deleted 1 of 3 items. 2 could not be deleted.");
    assert_eq!(ctrl.deck().item_count, 29);
    assert!(ctrl.mode().is_list());
}

#[tokio::test]
async fn refetch_while_confirming_closes_the_confirmation() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    let ticket = ctrl.set_query("σ");
    ctrl.toggle_select(ItemId::new(30));
    assert!(ctrl.request_bulk_delete());

    let request = ctrl.debounce_elapsed(ticket).unwrap();
    run(&mut ctrl, &fx.service, request).await;

    assert!(ctrl.selection().is_empty());
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Idle);
    assert!(ctrl.confirm_bulk_delete().is_none());
    assert_eq!(fx.counting.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn opening_a_row_does_not_interrupt_a_running_bulk_delete() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.toggle_select(ItemId::new(30));
    ctrl.request_bulk_delete();
    let request = ctrl.confirm_bulk_delete().unwrap();

    assert!(ctrl.select_item(ItemId::new(25), 0.0));
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Deleting);
    ctrl.back();

    // no second selection or confirmation until the first run finishes
    assert!(!ctrl.toggle_select(ItemId::new(29)));
    assert!(!ctrl.request_bulk_delete());

    let report = fx.service.bulk_delete(request.deck_id, &request.ids).await;
    let refetch = ctrl.finish_bulk_delete(&request, &report).unwrap();
    run(&mut ctrl, &fx.service, refetch).await;
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Idle);
    assert_eq!(ctrl.deck().item_count, 29);

    assert!(ctrl.toggle_select(ItemId::new(29)));
    assert!(ctrl.request_bulk_delete());
}

#[tokio::test]
async fn bulk_delete_report_from_previous_deck_is_dropped() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.toggle_select(ItemId::new(30));
    ctrl.request_bulk_delete();
    let request = ctrl.confirm_bulk_delete().unwrap();

    let open = ctrl.open(fx.culture.clone());
    run(&mut ctrl, &fx.service, open).await;
    let lists_before = fx.counting.list_calls.load(Ordering::SeqCst);

    let report = fx.service.bulk_delete(request.deck_id, &request.ids).await;
    assert!(report.is_clean());
    assert!(ctrl.finish_bulk_delete(&request, &report).is_none());

    assert!(ctrl.notice().is_none());
    assert_eq!(ctrl.deck().id, CULTURE_DECK_ID);
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Idle);
    assert_eq!(fx.counting.list_calls.load(Ordering::SeqCst), lists_before);
}

#[tokio::test]
async fn opening_another_deck_from_detail_returns_to_list() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.set_query("typed but unsettled");
    assert!(ctrl.select_item(ItemId::new(25), 120.0));
    assert!(matches!(ctrl.mode(), DeckDetailMode::Detail(_)));

    let request = ctrl.open(fx.culture.clone());
    assert!(ctrl.mode().is_list());
    assert_eq!(ctrl.filters().query, "");
    assert_eq!(request.query.deck_id, CULTURE_DECK_ID);
    assert_eq!(request.query.page, 1);
    run(&mut ctrl, &fx.service, request).await;
    assert_eq!(ctrl.list().total, 6);
}

#[tokio::test]
async fn rows_route_by_kind_and_generation() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    assert!(ctrl.select_item(ItemId::new(30), 0.0));
    assert!(matches!(ctrl.mode(), DeckDetailMode::LegacyEdit(_)));
    assert!(!ctrl.select_item(ItemId::new(25), 0.0));
    ctrl.back();

    assert!(ctrl.select_item(ItemId::new(25), 0.0));
    assert!(matches!(ctrl.mode(), DeckDetailMode::Detail(_)));
    assert!(ctrl.set_detail_tab(DetailTab::Grammar));

    let mut culture = opened(&fx, &fx.culture).await;
    let id = culture.list().ids()[0];
    assert!(culture.select_item(id, 0.0));
    assert!(matches!(culture.mode(), DeckDetailMode::Detail(_)));
    assert!(!culture.set_detail_tab(DetailTab::Grammar));
}

#[tokio::test]
async fn escape_closes_confirmation_then_detail_then_passes_through() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    ctrl.toggle_select(ItemId::new(30));
    ctrl.request_bulk_delete();
    assert_eq!(ctrl.handle_escape(), EscapeOutcome::Intercepted(None));
    assert_eq!(ctrl.bulk_state(), BulkDeleteState::Idle);
    assert!(ctrl.selection().contains(&ItemId::new(30)));

    ctrl.select_item(ItemId::new(25), 340.0);
    ctrl.request_item_delete();
    assert_eq!(ctrl.handle_escape(), EscapeOutcome::Intercepted(None));
    assert!(matches!(ctrl.mode(), DeckDetailMode::Detail(_)));

    let EscapeOutcome::Intercepted(Some(return_to)) = ctrl.handle_escape() else {
        panic!("escape in detail must return to the list");
    };
    assert_eq!(return_to.row_id, ItemId::new(25));
    assert!((return_to.scroll_offset - 340.0).abs() < f64::EPSILON);
    assert!(ctrl.mode().is_list());

    assert_eq!(ctrl.handle_escape(), EscapeOutcome::PassThrough);
}

#[tokio::test]
async fn culture_decks_have_no_selection_or_part_of_speech() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.culture).await;
    let id = ctrl.list().ids()[0];

    assert!(!ctrl.selection_enabled());
    assert!(!ctrl.toggle_select(id));
    assert!(!ctrl.toggle_select_all());
    assert!(!ctrl.request_bulk_delete());
    let patch = FilterPatch::part_of_speech(PartOfSpeechFilter::Only(PartOfSpeech::Noun));
    assert!(ctrl.apply_filter(patch).is_none());
}

#[tokio::test]
async fn legacy_edit_validates_and_saves() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.select_item(ItemId::new(30), 0.0);

    assert!(ctrl.begin_legacy_save().is_none(), "clean draft has nothing to save");

    ctrl.set_legacy_back("   ");
    assert!(ctrl.begin_legacy_save().is_none());
    let DeckDetailMode::LegacyEdit(state) = ctrl.mode() else {
        panic!("expected legacy edit");
    };
    assert!(state.show_validation);

    ctrl.set_legacy_back("thanks");
    let request = ctrl.begin_legacy_save().unwrap();
    assert_eq!(request.id, ItemId::new(30));
    let result = fx
        .service
        .update_legacy_card(request.deck_id, request.id, &request.front, &request.back)
        .await
        .map_err(|err| ViewError::from(&err));
    let refetch = ctrl.finish_legacy_save(request.id, result).unwrap();
    assert!(ctrl.mode().is_list());
    assert_eq!(ctrl.notice().unwrap().message, "Card saved.");

    run(&mut ctrl, &fx.service, refetch).await;
    let saved = ctrl.list().find(ItemId::new(30)).unwrap();
    assert_eq!(saved.secondary_text(), "thanks");
}

#[tokio::test]
async fn item_delete_returns_to_list_or_reports_failure() {
    let fx = fixture_failing(&[24]).await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    ctrl.select_item(ItemId::new(24), 0.0);
    assert!(ctrl.begin_item_delete().is_none(), "needs confirmation first");
    ctrl.request_item_delete();
    let (deck_id, id) = ctrl.begin_item_delete().unwrap();
    let result = fx
        .service
        .delete_item(deck_id, id)
        .await
        .map_err(|err| ViewError::from(&err));
    assert!(ctrl.finish_item_delete(id, result).is_none());
    let DeckDetailMode::Detail(state) = ctrl.mode() else {
        panic!("failed delete keeps the detail view");
    };
    assert_eq!(state.delete, ItemDeleteState::Idle);
    assert_eq!(ctrl.notice().unwrap().kind, NoticeKind::Error);

    ctrl.back();
    ctrl.select_item(ItemId::new(25), 0.0);
    ctrl.request_item_delete();
    let (deck_id, id) = ctrl.begin_item_delete().unwrap();
    let result = fx
        .service
        .delete_item(deck_id, id)
        .await
        .map_err(|err| ViewError::from(&err));
    let refetch = ctrl.finish_item_delete(id, result).unwrap();
    assert!(ctrl.mode().is_list());
    run(&mut ctrl, &fx.service, refetch).await;
    assert!(ctrl.list().find(ItemId::new(25)).is_none());
    assert_eq!(ctrl.deck().item_count, 29);
}

#[tokio::test]
async fn page_changes_are_clamped() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;

    assert!(ctrl.prev_page().is_none());
    let request = ctrl.set_page(99).unwrap();
    assert_eq!(request.query.page, 2);
    run(&mut ctrl, &fx.service, request).await;
    assert!(ctrl.next_page().is_none());
    let request = ctrl.prev_page().unwrap();
    assert_eq!(request.query.page, 1);
}

#[tokio::test]
async fn notices_dismiss_only_by_matching_id() {
    let fx = fixture().await;
    let mut ctrl = opened(&fx, &fx.vocabulary).await;
    ctrl.toggle_select(ItemId::new(30));
    ctrl.request_bulk_delete();
    ctrl.bulk_delete(&fx.service).await.unwrap();

    let id = ctrl.notice().unwrap().id;
    assert!(!ctrl.dismiss_notice(id + 1));
    assert!(ctrl.dismiss_notice(id));
    assert!(ctrl.notice().is_none());
}
