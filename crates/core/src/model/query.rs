use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::ids::DeckId;
use crate::model::item::ListItem;
use crate::model::vocabulary::PartOfSpeech;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    /// Alphabetical by the primary text (word or question).
    Front,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Front, SortField::CreatedAt, SortField::UpdatedAt];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "A–Z",
            Self::CreatedAt => "Created",
            Self::UpdatedAt => "Updated",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PartOfSpeechFilter {
    #[default]
    All,
    Only(PartOfSpeech),
}

impl PartOfSpeechFilter {
    #[must_use]
    pub fn accepts(self, item: &ListItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(pos) => item.part_of_speech() == Some(pos),
        }
    }
}

/// Parameters of one list request against a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub deck_id: DeckId,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    pub query: Option<String>,
    pub part_of_speech: PartOfSpeechFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ItemQuery {
    /// First page of a deck with default ordering.
    #[must_use]
    pub fn first_page(deck_id: DeckId, page_size: u32) -> Self {
        Self {
            deck_id,
            page: 1,
            page_size,
            query: None,
            part_of_speech: PartOfSpeechFilter::All,
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        let page = self.page.max(1) as usize;
        (page - 1).saturating_mul(self.page_size as usize)
    }

    /// Lowercased, trimmed search needle; `None` when blank.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    #[must_use]
    pub fn compare(&self, left: &ListItem, right: &ListItem) -> Ordering {
        let primary = match self.sort_field {
            SortField::Front => left
                .primary_text()
                .to_lowercase()
                .cmp(&right.primary_text().to_lowercase()),
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
        };
        self.sort_order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }

    /// Filter, sort and slice an unordered set of deck items into one page.
    #[must_use]
    pub fn select_page(&self, items: Vec<ListItem>) -> ItemPage {
        let needle = self.needle();
        let mut matching: Vec<ListItem> = items
            .into_iter()
            .filter(|item| self.part_of_speech.accepts(item))
            .filter(|item| needle.as_deref().is_none_or(|n| item.matches_lowercase(n)))
            .collect();
        matching.sort_by(|a, b| self.compare(a, b));

        let total = u32::try_from(matching.len()).unwrap_or(u32::MAX);
        let items = matching
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();
        ItemPage { items, total }
    }
}

/// One page of list results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemPage {
    pub items: Vec<ListItem>,
    pub total: u32,
}
