use std::collections::BTreeSet;

use learn_core::model::{DeckKind, ItemId, ListItem};

use crate::vm::time_fmt::format_date;

const PREVIEW_CHARS: usize = 56;

/// UI-ready row of the deck item list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRowVm {
    pub id: ItemId,
    pub primary: String,
    pub secondary_preview: String,
    pub part_of_speech: Option<&'static str>,
    pub is_legacy: bool,
    /// Filled completeness flags out of three; vocabulary only.
    pub completeness: Option<u8>,
    pub selected: bool,
}

/// Map list items into rows, marking the selected ones.
#[must_use]
pub fn map_item_rows(items: &[ListItem], selection: &BTreeSet<ItemId>) -> Vec<ItemRowVm> {
    items
        .iter()
        .map(|item| {
            let completeness = match item {
                ListItem::Vocabulary(entry) if !entry.is_legacy() => Some(entry.completeness()),
                _ => None,
            };
            ItemRowVm {
                id: item.id(),
                primary: item.primary_text().to_owned(),
                secondary_preview: truncate_preview(item.secondary_text(), PREVIEW_CHARS),
                part_of_speech: item.part_of_speech().map(|pos| pos.label()),
                is_legacy: item.is_legacy(),
                completeness,
                selected: selection.contains(&item.id()),
            }
        })
        .collect()
}

/// "N of M" shown while a search or filter narrows the list.
#[must_use]
pub fn results_summary(filtered: bool, total: u32, deck_item_count: u32) -> Option<String> {
    filtered.then(|| format!("{total} of {deck_item_count}"))
}

/// Message for an empty list.
#[must_use]
pub fn empty_message(kind: DeckKind, filtered: bool) -> &'static str {
    if filtered {
        return "No items match your filters.";
    }
    match kind {
        DeckKind::Vocabulary => "This deck has no words yet.",
        DeckKind::Culture => "This deck has no questions yet.",
    }
}

#[must_use]
pub fn list_error_message() -> &'static str {
    "Could not load items. Change a filter or reopen the deck to try again."
}

#[must_use]
pub fn selection_label(count: usize) -> String {
    format!("{count} selected")
}

#[must_use]
pub fn bulk_confirm_message(count: usize) -> String {
    format!("Delete {}? This cannot be undone.", plural_items(count))
}

pub(crate) fn plural_items(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

#[must_use]
pub fn total_pages(total: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationVm {
    pub page: u32,
    pub total_pages: u32,
    pub range_label: String,
    pub can_prev: bool,
    pub can_next: bool,
}

#[must_use]
pub fn map_pagination(page: u32, page_size: u32, total: u32) -> PaginationVm {
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);
    let range_label = if total == 0 {
        "No items".to_string()
    } else {
        let start = (page - 1).saturating_mul(page_size).saturating_add(1).min(total);
        let end = page.saturating_mul(page_size).min(total);
        format!("Showing {start}–{end} of {total}")
    };
    PaginationVm {
        page,
        total_pages,
        range_label,
        can_prev: page > 1,
        can_next: page < total_pages,
    }
}

//
// ─── DETAIL ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordDetailVm {
    pub front: String,
    pub back: String,
    pub part_of_speech: Option<&'static str>,
    pub translations: Vec<String>,
    pub has_audio: bool,
    pub has_examples: bool,
    pub has_grammar: bool,
    pub updated: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CultureOptionVm {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CultureDetailVm {
    pub question: String,
    pub options: Vec<CultureOptionVm>,
    pub category: Option<String>,
    pub updated: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemDetailVm {
    Word(WordDetailVm),
    Culture(CultureDetailVm),
}

#[must_use]
pub fn map_item_detail(item: &ListItem) -> ItemDetailVm {
    match item {
        ListItem::Vocabulary(entry) => ItemDetailVm::Word(WordDetailVm {
            front: entry.front().to_owned(),
            back: entry.back().to_owned(),
            part_of_speech: entry.part_of_speech().map(|pos| pos.label()),
            translations: entry.translations().to_vec(),
            has_audio: entry.has_audio(),
            has_examples: entry.has_examples(),
            has_grammar: entry.has_grammar(),
            updated: format_date(entry.updated_at()),
        }),
        ListItem::Culture(question) => ItemDetailVm::Culture(CultureDetailVm {
            question: question.question().to_owned(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(idx, text)| CultureOptionVm {
                    text: text.clone(),
                    is_correct: idx == question.correct_index(),
                })
                .collect(),
            category: question.category().map(str::to_owned),
            updated: format_date(question.updated_at()),
        }),
    }
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let mut lines = trimmed.lines();
    let first_line = lines.next().unwrap_or("");
    let has_more_lines = lines.next().is_some();

    let mut out: String = first_line.chars().take(max_chars).collect();
    if has_more_lines || first_line.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
