use dioxus::prelude::*;
use learn_core::model::{DeckKind, ItemId, PartOfSpeech, PartOfSpeechFilter, SortField, SortOrder};

use crate::views::ViewError;
use crate::vm::{ItemRowVm, PaginationVm, list_error_message};

use super::super::utils::{
    LIST_SCROLL_ID, completeness_label, part_of_speech_from_value, part_of_speech_value,
    row_dom_id, sort_indicator,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct HighlightSpan {
    text: String,
    is_match: bool,
}

/// Split `text` into matching and non-matching runs of `query`, ignoring case.
fn highlight_spans(text: &str, query: &str) -> Vec<HighlightSpan> {
    let needle = query.trim();
    if needle.is_empty() || text.is_empty() {
        return vec![HighlightSpan {
            text: text.to_string(),
            is_match: false,
        }];
    }

    let mut lowered = Vec::new();
    let mut map_start = Vec::new();
    let mut map_end = Vec::new();
    for (idx, ch) in text.char_indices() {
        let end = idx + ch.len_utf8();
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            map_start.push(idx);
            map_end.push(end);
        }
    }

    let needle_chars: Vec<char> = needle.to_lowercase().chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    let mut idx = 0usize;
    while idx + needle_chars.len() <= lowered.len() {
        if lowered[idx..idx + needle_chars.len()] == needle_chars[..] {
            let start = map_start[idx];
            let end = map_end[idx + needle_chars.len() - 1];
            if start > cursor {
                spans.push(HighlightSpan {
                    text: text[cursor..start].to_string(),
                    is_match: false,
                });
            }
            if start < end && start >= cursor {
                spans.push(HighlightSpan {
                    text: text[start..end].to_string(),
                    is_match: true,
                });
                cursor = end;
            }
            idx += needle_chars.len();
        } else {
            idx += 1;
        }
    }

    if cursor < text.len() {
        spans.push(HighlightSpan {
            text: text[cursor..].to_string(),
            is_match: false,
        });
    }
    spans
}

fn render_highlighted(text: &str, query: &str) -> Vec<Element> {
    highlight_spans(text, query)
        .into_iter()
        .enumerate()
        .map(|(idx, span)| {
            rsx!(
                span {
                    key: "{idx}",
                    class: if span.is_match { "deck-list-highlight" } else { "deck-list-text" },
                    "{span.text}"
                }
            )
        })
        .collect()
}

#[component]
fn SortHeader(
    label: &'static str,
    field: SortField,
    active: SortField,
    order: SortOrder,
    on_sort: Callback<SortField>,
) -> Element {
    let indicator = sort_indicator(field, active, order);
    let aria_sort = match (field == active, order) {
        (false, _) => "none",
        (true, SortOrder::Asc) => "ascending",
        (true, SortOrder::Desc) => "descending",
    };
    rsx! {
        button {
            class: if field == active { "deck-sort deck-sort--active" } else { "deck-sort" },
            r#type: "button",
            aria_sort: aria_sort,
            onclick: move |_| on_sort.call(field),
            "{label}"
            if !indicator.is_empty() {
                span { class: "deck-sort-indicator", "{indicator}" }
            }
        }
    }
}

#[component]
pub fn DeckListPane(
    kind: DeckKind,
    search_value: String,
    highlight: String,
    part_of_speech: PartOfSpeechFilter,
    sort_field: SortField,
    sort_order: SortOrder,
    rows: Vec<ItemRowVm>,
    loading: bool,
    error: Option<ViewError>,
    summary: Option<String>,
    empty_message: String,
    pagination: PaginationVm,
    selection_enabled: bool,
    all_selected: bool,
    on_search_change: Callback<String>,
    on_clear_search: Callback<()>,
    on_part_of_speech_change: Callback<PartOfSpeechFilter>,
    on_sort: Callback<SortField>,
    on_toggle_row: Callback<ItemId>,
    on_toggle_all: Callback<()>,
    on_open_row: Callback<ItemId>,
    on_row_focus: Callback<ItemId>,
    on_page: Callback<u32>,
    on_list_key: Callback<KeyboardEvent>,
) -> Element {
    let has_search = !search_value.is_empty();
    let is_vocabulary = kind == DeckKind::Vocabulary;
    let primary_label = if is_vocabulary { "Front" } else { "Question" };
    let page = pagination.page;

    rsx! {
        section { class: "deck-list-pane", aria_label: "Deck items",
            div { class: "deck-list-toolbar",
                div { class: "deck-list-search",
                    input {
                        class: "deck-list-search-input",
                        r#type: "search",
                        placeholder: "Search",
                        aria_label: "Search items",
                        value: "{search_value}",
                        oninput: move |evt| on_search_change.call(evt.value()),
                    }
                    if has_search {
                        button {
                            class: "deck-list-search-clear",
                            r#type: "button",
                            aria_label: "Clear search",
                            title: "Clear search",
                            onclick: move |_| on_clear_search.call(()),
                            "×"
                        }
                    }
                }
                if kind.supports_part_of_speech() {
                    div { class: "deck-list-controls",
                        span { class: "deck-list-control-label", "Part of speech" }
                        select {
                            class: "deck-list-select",
                            title: "Filter by part of speech",
                            value: "{part_of_speech_value(part_of_speech)}",
                            onchange: move |evt| {
                                on_part_of_speech_change.call(part_of_speech_from_value(&evt.value()));
                            },
                            option { value: "", "All" }
                            for pos in PartOfSpeech::ALL {
                                option { value: "{pos.as_str()}", "{pos.label()}" }
                            }
                        }
                    }
                }
                if let Some(summary) = summary {
                    span { class: "deck-list-summary", aria_live: "polite", "{summary}" }
                }
            }

            div { class: "deck-list-header",
                if selection_enabled {
                    input {
                        class: "deck-list-check",
                        r#type: "checkbox",
                        aria_label: "Select all on this page",
                        checked: all_selected,
                        disabled: rows.is_empty(),
                        onchange: move |_| on_toggle_all.call(()),
                    }
                }
                SortHeader { label: primary_label, field: SortField::Front, active: sort_field, order: sort_order, on_sort: on_sort }
                SortHeader { label: "Created", field: SortField::CreatedAt, active: sort_field, order: sort_order, on_sort: on_sort }
                SortHeader { label: "Updated", field: SortField::UpdatedAt, active: sort_field, order: sort_order, on_sort: on_sort }
            }

            div {
                id: LIST_SCROLL_ID,
                class: if loading { "deck-list-body deck-list-body--loading" } else { "deck-list-body" },
                onkeydown: on_list_key,
                if error.is_some() {
                    p { class: "deck-list-error", role: "alert", "{list_error_message()}" }
                }
                if rows.is_empty() {
                    if loading {
                        p { class: "deck-list-empty", "Loading items..." }
                    } else if error.is_none() {
                        p { class: "deck-list-empty", "{empty_message}" }
                    }
                } else {
                    ul { class: "deck-list-items", role: "listbox",
                        for row in rows {
                            li {
                                key: "{row.id.value()}",
                                id: row_dom_id(row.id),
                                class: if row.selected { "deck-row deck-row--selected" } else { "deck-row" },
                                role: "option",
                                tabindex: "0",
                                aria_selected: row.selected,
                                onfocus: move |_| on_row_focus.call(row.id),
                                onclick: move |_| on_open_row.call(row.id),
                                if selection_enabled {
                                    input {
                                        class: "deck-list-check",
                                        r#type: "checkbox",
                                        aria_label: "Select {row.primary}",
                                        checked: row.selected,
                                        onclick: move |evt| evt.stop_propagation(),
                                        onchange: move |_| on_toggle_row.call(row.id),
                                    }
                                }
                                div { class: "deck-row-main",
                                    div { class: "deck-row-primary",
                                        for node in render_highlighted(&row.primary, &highlight) {
                                            {node}
                                        }
                                    }
                                    div { class: "deck-row-secondary",
                                        for node in render_highlighted(&row.secondary_preview, &highlight) {
                                            {node}
                                        }
                                    }
                                }
                                div { class: "deck-row-meta",
                                    if let Some(pos) = row.part_of_speech {
                                        span { class: "deck-row-pos", "{pos}" }
                                    }
                                    if row.is_legacy {
                                        span { class: "deck-row-badge", "Legacy" }
                                    }
                                    if let Some(filled) = row.completeness {
                                        span { class: "deck-row-completeness", "{completeness_label(filled)}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            nav { class: "deck-pagination", aria_label: "Pages",
                button {
                    class: "btn deck-page-prev",
                    r#type: "button",
                    disabled: !pagination.can_prev,
                    onclick: move |_| on_page.call(page.saturating_sub(1)),
                    "Previous"
                }
                span { class: "deck-page-label", "{pagination.range_label}" }
                span { class: "deck-page-count", "Page {pagination.page} of {pagination.total_pages}" }
                button {
                    class: "btn deck-page-next",
                    r#type: "button",
                    disabled: !pagination.can_next,
                    onclick: move |_| on_page.call(page.saturating_add(1)),
                    "Next"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::highlight_spans;

    #[test]
    fn highlight_spans_marks_match_segments() {
        let spans = highlight_spans("Rust", "st");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Ru");
        assert!(!spans[0].is_match);
        assert_eq!(spans[1].text, "st");
        assert!(spans[1].is_match);
    }

    #[test]
    fn highlight_spans_is_case_insensitive_for_greek() {
        let spans = highlight_spans("Σπίτι", "σπ");
        assert_eq!(spans[0].text, "Σπ");
        assert!(spans[0].is_match);
        assert_eq!(spans[1].text, "ίτι");
    }

    #[test]
    fn highlight_spans_marks_every_greek_occurrence() {
        let spans = highlight_spans("καλημέρα και ΚΑΛΟ", "κα");
        let matches: Vec<&str> = spans
            .iter()
            .filter(|span| span.is_match)
            .map(|span| span.text.as_str())
            .collect();
        assert_eq!(matches, ["κα", "κα", "ΚΑ"]);
        let joined: String = spans.iter().map(|span| span.text.as_str()).collect();
        assert_eq!(joined, "καλημέρα και ΚΑΛΟ");
    }

    #[test]
    fn highlight_spans_ignores_blank_query() {
        let spans = highlight_spans("σπίτι", "  ");
        assert_eq!(spans.len(), 1);
        assert!(!spans[0].is_match);
    }

    #[test]
    fn highlight_spans_handles_no_match() {
        let spans = highlight_spans("Rust", "zz");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Rust");
        assert!(!spans[0].is_match);
    }
}
