use std::collections::BTreeSet;

use learn_core::model::{
    DeckId, ItemId, ItemPage, ItemQuery, ListItem, PartOfSpeechFilter, SortField, SortOrder,
};

use crate::views::ViewError;

//
// ─── FILTERS ───────────────────────────────────────────────────────────────────
//

/// Search, filter, sort and page state of the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    /// Raw text as typed.
    pub query: String,
    /// Trimmed text that the last quiet period settled on.
    pub debounced_query: String,
    pub part_of_speech: PartOfSpeechFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// 1-based.
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            debounced_query: String::new(),
            part_of_speech: PartOfSpeechFilter::All,
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
            page: 1,
        }
    }
}

impl FilterState {
    /// True when the visible rows are narrowed by a search or a filter.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.debounced_query.is_empty() || self.part_of_speech != PartOfSpeechFilter::All
    }

    #[must_use]
    pub fn to_query(&self, deck_id: DeckId, page_size: u32) -> ItemQuery {
        ItemQuery {
            deck_id,
            page: self.page,
            page_size,
            query: Some(self.debounced_query.clone()).filter(|q| !q.is_empty()),
            part_of_speech: self.part_of_speech,
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        }
    }
}

/// Partial update of the non-text filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub part_of_speech: Option<PartOfSpeechFilter>,
    pub sort_field: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    #[must_use]
    pub fn part_of_speech(filter: PartOfSpeechFilter) -> Self {
        Self {
            part_of_speech: Some(filter),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sort(field: SortField, order: SortOrder) -> Self {
        Self {
            sort_field: Some(field),
            sort_order: Some(order),
            ..Self::default()
        }
    }
}

//
// ─── LIST & SELECTION ──────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    pub items: Vec<ListItem>,
    /// Matches for the current filters across all pages.
    pub total: u32,
    pub loading: bool,
    pub error: Option<ViewError>,
}

impl ListState {
    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(ListItem::id).collect()
    }
}

pub type SelectionState = BTreeSet<ItemId>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BulkDeleteState {
    #[default]
    Idle,
    Confirming,
    Deleting,
}

//
// ─── DRILL-DOWN ────────────────────────────────────────────────────────────────
//

/// Where Back lands in the list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListReturn {
    pub row_id: ItemId,
    pub scroll_offset: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailTab {
    #[default]
    Overview,
    Translations,
    Examples,
    Grammar,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Translations,
        DetailTab::Examples,
        DetailTab::Grammar,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Translations => "Translations",
            Self::Examples => "Examples",
            Self::Grammar => "Grammar",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemDeleteState {
    #[default]
    Idle,
    Confirming,
    Deleting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Error(ViewError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailState {
    pub item: ListItem,
    pub tab: DetailTab,
    pub delete: ItemDeleteState,
    pub return_to: ListReturn,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyEditDraft {
    pub front: String,
    pub back: String,
}

impl LegacyEditDraft {
    #[must_use]
    pub fn from_item(item: &ListItem) -> Self {
        Self {
            front: item.primary_text().to_string(),
            back: item.secondary_text().to_string(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty() && !self.back.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegacyEditState {
    pub item: ListItem,
    pub draft: LegacyEditDraft,
    pub show_validation: bool,
    pub save: SaveState,
    pub delete: ItemDeleteState,
    pub return_to: ListReturn,
}

impl LegacyEditState {
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != LegacyEditDraft::from_item(&self.item)
    }
}

/// The one sub-view on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DeckDetailMode {
    #[default]
    List,
    Detail(DetailState),
    LegacyEdit(LegacyEditState),
}

impl DeckDetailMode {
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }

    #[must_use]
    pub fn open_item_id(&self) -> Option<ItemId> {
        match self {
            Self::List => None,
            Self::Detail(state) => Some(state.item.id()),
            Self::LegacyEdit(state) => Some(state.item.id()),
        }
    }
}

//
// ─── REQUESTS & OUTCOMES ───────────────────────────────────────────────────────
//

/// A list fetch to run; its `seq` must be handed back to `finish_fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: ItemQuery,
}

/// What a fetch returns: one page plus the deck's unfiltered size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub page: ItemPage,
    pub deck_item_count: u32,
}

/// Identifies one keystroke's debounce window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket(pub(crate) u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkDeleteRequest {
    pub deck_id: DeckId,
    pub ids: Vec<ItemId>,
    /// Bumped by every `open`; a report from an older deck is dropped.
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacySaveRequest {
    pub deck_id: DeckId,
    pub id: ItemId,
    pub front: String,
    pub back: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EscapeOutcome {
    /// Consumed by the deck view; the host dialog must not close.
    Intercepted(Option<ListReturn>),
    /// Left to the hosting dialog.
    PassThrough,
}

impl EscapeOutcome {
    #[must_use]
    pub fn is_intercepted(self) -> bool {
        matches!(self, Self::Intercepted(_))
    }
}

//
// ─── NOTICES ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}
