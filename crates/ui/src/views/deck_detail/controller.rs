use learn_core::model::{DeckId, DeckSummary, ItemId, ItemQuery, ListItem, SortField, SortOrder};
use services::{BulkDeleteReport, DeckItemService};
use tracing::debug;

use crate::config::DeckDetailConfig;
use crate::views::ViewError;
use crate::vm::{plural_items, total_pages};

use super::state::{
    BulkDeleteRequest, BulkDeleteState, DebounceTicket, DeckDetailMode, DetailState, DetailTab,
    EscapeOutcome, FetchRequest, FetchedPage, FilterPatch, FilterState, ItemDeleteState,
    LegacyEditDraft, LegacyEditState, LegacySaveRequest, ListReturn, ListState, Notice, NoticeKind,
    SaveState, SelectionState,
};

/// Owns everything the deck detail view shows for one deck.
///
/// The controller never performs I/O itself. Operations that need data hand
/// back a request (`FetchRequest`, `BulkDeleteRequest`, ...) which the host
/// runs and feeds back through the matching `finish_*` call. The async
/// helpers at the bottom do both steps for callers that own the controller
/// across an await.
#[derive(Clone, Debug)]
pub struct DeckDetailController {
    config: DeckDetailConfig,
    deck: DeckSummary,
    mode: DeckDetailMode,
    filters: FilterState,
    selection: SelectionState,
    list: ListState,
    bulk: BulkDeleteState,
    notice: Option<Notice>,
    fetch_seq: u64,
    debounce_gen: u64,
    bulk_gen: u64,
    notice_seq: u64,
}

impl DeckDetailController {
    #[must_use]
    pub fn new(config: DeckDetailConfig, deck: DeckSummary) -> Self {
        Self {
            config,
            deck,
            mode: DeckDetailMode::List,
            filters: FilterState::default(),
            selection: SelectionState::new(),
            list: ListState::default(),
            bulk: BulkDeleteState::Idle,
            notice: None,
            fetch_seq: 0,
            debounce_gen: 0,
            bulk_gen: 0,
            notice_seq: 0,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn config(&self) -> &DeckDetailConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &DeckSummary {
        &self.deck
    }

    #[must_use]
    pub fn mode(&self) -> &DeckDetailMode {
        &self.mode
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn list(&self) -> &ListState {
        &self.list
    }

    #[must_use]
    pub fn bulk_state(&self) -> BulkDeleteState {
        self.bulk
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.list.total, self.config.page_size())
    }

    //
    // ─── OPEN & FETCH ──────────────────────────────────────────────────────────
    //

    /// Show `deck` from a clean slate and request its first page.
    ///
    /// Any open detail, edit, selection, confirmation, notice or filter is
    /// dropped. Responses and debounce timers from before the call are
    /// ignored when they arrive.
    pub fn open(&mut self, deck: DeckSummary) -> FetchRequest {
        debug!(deck_id = %deck.id, "opening deck");
        self.deck = deck;
        self.mode = DeckDetailMode::List;
        self.filters = FilterState::default();
        self.selection.clear();
        self.list = ListState::default();
        self.bulk = BulkDeleteState::Idle;
        self.notice = None;
        self.debounce_gen += 1;
        self.bulk_gen += 1;
        self.begin_fetch()
    }

    /// Issue a fetch for the current filters.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.fetch_seq += 1;
        self.list.loading = true;
        let query = self
            .filters
            .to_query(self.deck.id, self.config.page_size());
        debug!(seq = self.fetch_seq, page = query.page, "fetch issued");
        FetchRequest {
            seq: self.fetch_seq,
            query,
        }
    }

    /// Apply a fetch result. Returns `false` when a newer fetch superseded it.
    pub fn finish_fetch(&mut self, seq: u64, result: Result<FetchedPage, ViewError>) -> bool {
        if seq != self.fetch_seq {
            debug!(seq, latest = self.fetch_seq, "dropping stale fetch response");
            return false;
        }
        self.list.loading = false;
        match result {
            Ok(fetched) => {
                self.list.items = fetched.page.items;
                self.list.total = fetched.page.total;
                self.list.error = None;
                self.deck.item_count = fetched.deck_item_count;
                self.selection.clear();
                // nothing left to confirm
                if self.bulk == BulkDeleteState::Confirming {
                    self.bulk = BulkDeleteState::Idle;
                }
            }
            Err(err) => {
                self.list.error = Some(err);
            }
        }
        true
    }

    //
    // ─── DRILL-DOWN ────────────────────────────────────────────────────────────
    //

    /// Open a row. Legacy vocabulary cards open the edit dialog, everything
    /// else opens the detail view.
    pub fn select_item(&mut self, id: ItemId, scroll_offset: f64) -> bool {
        if !self.mode.is_list() {
            return false;
        }
        let Some(item) = self.list.find(id).cloned() else {
            return false;
        };
        let return_to = ListReturn {
            row_id: id,
            scroll_offset,
        };
        // a running bulk delete keeps going and still owns its refetch
        if self.bulk == BulkDeleteState::Confirming {
            self.bulk = BulkDeleteState::Idle;
        }
        self.selection.clear();
        self.mode = if item.is_legacy() {
            DeckDetailMode::LegacyEdit(LegacyEditState {
                draft: LegacyEditDraft::from_item(&item),
                item,
                show_validation: false,
                save: SaveState::Idle,
                delete: ItemDeleteState::Idle,
                return_to,
            })
        } else {
            DeckDetailMode::Detail(DetailState {
                item,
                tab: DetailTab::Overview,
                delete: ItemDeleteState::Idle,
                return_to,
            })
        };
        debug!(item_id = %id, "item opened");
        true
    }

    /// Return to the list, handing back where to restore scroll and focus.
    pub fn back(&mut self) -> Option<ListReturn> {
        let return_to = match &self.mode {
            DeckDetailMode::List => return None,
            DeckDetailMode::Detail(state) => state.return_to,
            DeckDetailMode::LegacyEdit(state) => state.return_to,
        };
        self.mode = DeckDetailMode::List;
        Some(return_to)
    }

    /// Resolve an Escape key press.
    ///
    /// Open confirmations close first, then a detail or edit view returns
    /// to the list. In the plain list the key belongs to the hosting dialog.
    pub fn handle_escape(&mut self) -> EscapeOutcome {
        if self.cancel_bulk_delete() || self.cancel_item_delete() {
            return EscapeOutcome::Intercepted(None);
        }
        match self.back() {
            Some(return_to) => EscapeOutcome::Intercepted(Some(return_to)),
            None => EscapeOutcome::PassThrough,
        }
    }

    pub fn set_detail_tab(&mut self, tab: DetailTab) -> bool {
        let DeckDetailMode::Detail(state) = &mut self.mode else {
            return false;
        };
        if matches!(state.item, ListItem::Culture(_)) && tab != DetailTab::Overview {
            return false;
        }
        state.tab = tab;
        true
    }

    //
    // ─── SELECTION ─────────────────────────────────────────────────────────────
    //

    /// Whether row checkboxes are usable right now.
    #[must_use]
    pub fn selection_enabled(&self) -> bool {
        self.mode.is_list()
            && self.deck.kind.supports_bulk_actions()
            && self.bulk != BulkDeleteState::Deleting
    }

    pub fn toggle_select(&mut self, id: ItemId) -> bool {
        if !self.selection_enabled() || self.list.find(id).is_none() {
            return false;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        true
    }

    /// Select every row on the current page, or clear them when all are
    /// already selected.
    pub fn toggle_select_all(&mut self) -> bool {
        if !self.selection_enabled() || self.list.items.is_empty() {
            return false;
        }
        let page_ids = self.list.ids();
        if self.is_all_selected() {
            for id in &page_ids {
                self.selection.remove(id);
            }
        } else {
            self.selection.extend(page_ids);
        }
        true
    }

    /// True when the page has rows and every one of them is selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        !self.list.items.is_empty()
            && self
                .list
                .items
                .iter()
                .all(|item| self.selection.contains(&item.id()))
    }

    //
    // ─── BULK DELETE ───────────────────────────────────────────────────────────
    //

    pub fn request_bulk_delete(&mut self) -> bool {
        if !self.selection_enabled()
            || self.selection.is_empty()
            || self.bulk != BulkDeleteState::Idle
        {
            return false;
        }
        self.bulk = BulkDeleteState::Confirming;
        true
    }

    pub fn cancel_bulk_delete(&mut self) -> bool {
        if self.bulk != BulkDeleteState::Confirming {
            return false;
        }
        self.bulk = BulkDeleteState::Idle;
        true
    }

    /// Accept the confirmation and hand out the ids to delete.
    pub fn confirm_bulk_delete(&mut self) -> Option<BulkDeleteRequest> {
        if self.bulk != BulkDeleteState::Confirming || self.selection.is_empty() {
            return None;
        }
        self.bulk = BulkDeleteState::Deleting;
        Some(BulkDeleteRequest {
            deck_id: self.deck.id,
            ids: self.selection.iter().copied().collect(),
            generation: self.bulk_gen,
        })
    }

    /// Report the outcome and refetch the current page exactly once.
    ///
    /// Successful deletes are kept even when some ids failed. Returns `None`
    /// when another deck was opened while the deletes ran.
    pub fn finish_bulk_delete(
        &mut self,
        request: &BulkDeleteRequest,
        report: &BulkDeleteReport,
    ) -> Option<FetchRequest> {
        if request.generation != self.bulk_gen {
            debug!(
                generation = request.generation,
                latest = self.bulk_gen,
                "dropping bulk delete report from a previous deck"
            );
            return None;
        }
        self.bulk = BulkDeleteState::Idle;
        self.selection.clear();
        if report.is_clean() {
            let message = format!("Deleted {}.", plural_items(report.deleted.len()));
            self.push_notice(NoticeKind::Success, message);
        } else {
            let message = format!(
                "Deleted {} of {}. {} could not be deleted.",
                report.deleted.len(),
                plural_items(report.attempted()),
                report.failure_count()
            );
            self.push_notice(NoticeKind::Error, message);
        }
        Some(self.begin_fetch())
    }

    //
    // ─── FILTERS ───────────────────────────────────────────────────────────────
    //

    /// Record a keystroke in the search box. The returned ticket must be
    /// passed to `debounce_elapsed` once the debounce delay has passed.
    pub fn set_query(&mut self, raw: impl Into<String>) -> DebounceTicket {
        self.filters.query = raw.into();
        self.debounce_gen += 1;
        DebounceTicket(self.debounce_gen)
    }

    /// Settle the search text if `ticket` is still the latest keystroke.
    ///
    /// Returns a fetch for page 1 when the settled text differs from the
    /// previous one; superseded tickets and unchanged text yield `None`.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Option<FetchRequest> {
        if ticket.0 != self.debounce_gen {
            return None;
        }
        self.settle_query()
    }

    /// Empty the search box without waiting for the debounce delay.
    pub fn clear_query(&mut self) -> Option<FetchRequest> {
        self.filters.query.clear();
        self.debounce_gen += 1;
        self.settle_query()
    }

    fn settle_query(&mut self) -> Option<FetchRequest> {
        let settled = self.filters.query.trim();
        if settled == self.filters.debounced_query {
            return None;
        }
        self.filters.debounced_query = settled.to_string();
        self.filters.page = 1;
        Some(self.begin_fetch())
    }

    /// Merge non-text filter changes and fetch page 1 right away.
    pub fn apply_filter(&mut self, patch: FilterPatch) -> Option<FetchRequest> {
        let mut changed = false;
        if let Some(pos) = patch.part_of_speech
            && self.deck.kind.supports_part_of_speech()
            && pos != self.filters.part_of_speech
        {
            self.filters.part_of_speech = pos;
            changed = true;
        }
        if let Some(field) = patch.sort_field
            && field != self.filters.sort_field
        {
            self.filters.sort_field = field;
            changed = true;
        }
        if let Some(order) = patch.sort_order
            && order != self.filters.sort_order
        {
            self.filters.sort_order = order;
            changed = true;
        }
        if !changed {
            return None;
        }
        self.filters.page = 1;
        Some(self.begin_fetch())
    }

    /// Clicking the active sort column flips its order; another column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) -> Option<FetchRequest> {
        let order = if field == self.filters.sort_field {
            self.filters.sort_order.reversed()
        } else {
            SortOrder::Asc
        };
        self.apply_filter(FilterPatch::sort(field, order))
    }

    /// Move to `page`, clamped to the known page range.
    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        let page = page.clamp(1, self.total_pages());
        if page == self.filters.page {
            return None;
        }
        self.filters.page = page;
        Some(self.begin_fetch())
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.filters.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.filters.page.saturating_sub(1))
    }

    //
    // ─── SINGLE ITEM DELETE ────────────────────────────────────────────────────
    //

    fn item_delete_state(&mut self) -> Option<&mut ItemDeleteState> {
        match &mut self.mode {
            DeckDetailMode::List => None,
            DeckDetailMode::Detail(state) => Some(&mut state.delete),
            DeckDetailMode::LegacyEdit(state) => Some(&mut state.delete),
        }
    }

    pub fn request_item_delete(&mut self) -> bool {
        match self.item_delete_state() {
            Some(delete) if *delete == ItemDeleteState::Idle => {
                *delete = ItemDeleteState::Confirming;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_item_delete(&mut self) -> bool {
        match self.item_delete_state() {
            Some(delete) if *delete == ItemDeleteState::Confirming => {
                *delete = ItemDeleteState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Accept the delete confirmation for the open item.
    pub fn begin_item_delete(&mut self) -> Option<(DeckId, ItemId)> {
        let deck_id = self.deck.id;
        let item_id = self.mode.open_item_id()?;
        match self.item_delete_state() {
            Some(delete) if *delete == ItemDeleteState::Confirming => {
                *delete = ItemDeleteState::Deleting;
                Some((deck_id, item_id))
            }
            _ => None,
        }
    }

    /// On success return to the list and refetch; on failure stay put.
    pub fn finish_item_delete(
        &mut self,
        id: ItemId,
        result: Result<(), ViewError>,
    ) -> Option<FetchRequest> {
        let still_open = self.mode.open_item_id() == Some(id);
        match result {
            Ok(()) => {
                if still_open {
                    self.mode = DeckDetailMode::List;
                }
                self.push_notice(NoticeKind::Success, "Item deleted.".to_string());
                Some(self.begin_fetch())
            }
            Err(err) => {
                if still_open && let Some(delete) = self.item_delete_state() {
                    *delete = ItemDeleteState::Idle;
                }
                self.push_notice(
                    NoticeKind::Error,
                    format!("Could not delete item. {}", err.message()),
                );
                None
            }
        }
    }

    //
    // ─── LEGACY EDIT ───────────────────────────────────────────────────────────
    //

    pub fn set_legacy_front(&mut self, value: impl Into<String>) {
        if let DeckDetailMode::LegacyEdit(state) = &mut self.mode {
            state.draft.front = value.into();
            state.save = SaveState::Idle;
        }
    }

    pub fn set_legacy_back(&mut self, value: impl Into<String>) {
        if let DeckDetailMode::LegacyEdit(state) = &mut self.mode {
            state.draft.back = value.into();
            state.save = SaveState::Idle;
        }
    }

    /// Validate the draft and hand out the save request.
    ///
    /// A blank side turns validation hints on and yields `None`, as does a
    /// draft without changes or a save already in flight.
    pub fn begin_legacy_save(&mut self) -> Option<LegacySaveRequest> {
        let deck_id = self.deck.id;
        let DeckDetailMode::LegacyEdit(state) = &mut self.mode else {
            return None;
        };
        if state.save == SaveState::Saving || !state.is_dirty() {
            return None;
        }
        if !state.draft.is_valid() {
            state.show_validation = true;
            return None;
        }
        state.save = SaveState::Saving;
        Some(LegacySaveRequest {
            deck_id,
            id: state.item.id(),
            front: state.draft.front.clone(),
            back: state.draft.back.clone(),
        })
    }

    /// On success close the dialog and refetch; on failure keep the draft.
    pub fn finish_legacy_save(
        &mut self,
        id: ItemId,
        result: Result<ListItem, ViewError>,
    ) -> Option<FetchRequest> {
        let editing = matches!(&self.mode, DeckDetailMode::LegacyEdit(state) if state.item.id() == id);
        match result {
            Ok(updated) => {
                if let Some(row) = self.list.items.iter_mut().find(|item| item.id() == id) {
                    *row = updated;
                }
                if editing {
                    self.mode = DeckDetailMode::List;
                }
                self.push_notice(NoticeKind::Success, "Card saved.".to_string());
                Some(self.begin_fetch())
            }
            Err(err) => {
                if editing && let DeckDetailMode::LegacyEdit(state) = &mut self.mode {
                    state.save = SaveState::Error(err);
                }
                self.push_notice(
                    NoticeKind::Error,
                    format!("Could not save card. {}", err.message()),
                );
                None
            }
        }
    }

    //
    // ─── NOTICES ───────────────────────────────────────────────────────────────
    //

    fn push_notice(&mut self, kind: NoticeKind, message: String) {
        self.notice_seq += 1;
        self.notice = Some(Notice {
            id: self.notice_seq,
            kind,
            message,
        });
    }

    /// Drop the notice if it is still the one with `id`.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        if self.notice.as_ref().is_some_and(|notice| notice.id == id) {
            self.notice = None;
            return true;
        }
        false
    }

    //
    // ─── ASYNC HELPERS ─────────────────────────────────────────────────────────
    //

    /// Run a fetch for the current filters and apply it.
    pub async fn fetch(&mut self, service: &DeckItemService) -> bool {
        let request = self.begin_fetch();
        let result = load_page(service, &request.query).await;
        self.finish_fetch(request.seq, result)
    }

    /// Run a confirmed bulk delete, then its refetch.
    pub async fn bulk_delete(&mut self, service: &DeckItemService) -> Option<BulkDeleteReport> {
        let request = self.confirm_bulk_delete()?;
        let report = service.bulk_delete(request.deck_id, &request.ids).await;
        if let Some(refetch) = self.finish_bulk_delete(&request, &report) {
            let result = load_page(service, &refetch.query).await;
            self.finish_fetch(refetch.seq, result);
        }
        Some(report)
    }
}

/// Load one page plus the deck's unfiltered size.
///
/// # Errors
///
/// Returns `ViewError` when either lookup fails.
pub async fn load_page(
    service: &DeckItemService,
    query: &ItemQuery,
) -> Result<FetchedPage, ViewError> {
    let page = service
        .list_page(query)
        .await
        .map_err(|err| ViewError::from(&err))?;
    let deck_item_count = service
        .item_count(query.deck_id)
        .await
        .map_err(|err| ViewError::from(&err))?;
    Ok(FetchedPage {
        page,
        deck_item_count,
    })
}
