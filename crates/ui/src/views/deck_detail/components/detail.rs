use dioxus::prelude::*;

use crate::vm::{CultureDetailVm, ItemDetailVm, WordDetailVm};

use super::super::state::{DetailTab, ItemDeleteState};
use super::modals::ConfirmDialog;

pub const DETAIL_BACK_ID: &str = "deck-detail-back";

#[component]
pub fn ItemDetailPane(
    detail: ItemDetailVm,
    tab: DetailTab,
    delete_state: ItemDeleteState,
    on_back: Callback<()>,
    on_tab: Callback<DetailTab>,
    on_request_delete: Callback<()>,
    on_cancel_delete: Callback<()>,
    on_confirm_delete: Callback<()>,
) -> Element {
    let title = match &detail {
        ItemDetailVm::Word(word) => word.front.clone(),
        ItemDetailVm::Culture(question) => question.question.clone(),
    };
    let tabs: &[DetailTab] = match &detail {
        ItemDetailVm::Word(_) => &DetailTab::ALL,
        ItemDetailVm::Culture(_) => &[DetailTab::Overview],
    };
    let deleting = delete_state == ItemDeleteState::Deleting;

    rsx! {
        section { class: "deck-detail-pane", aria_label: "Item detail",
            header { class: "deck-detail-toolbar",
                button {
                    id: DETAIL_BACK_ID,
                    class: "btn deck-detail-back",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "← Back to list"
                }
                h3 { class: "deck-detail-title", "{title}" }
                button {
                    class: "btn deck-detail-delete",
                    r#type: "button",
                    disabled: delete_state != ItemDeleteState::Idle,
                    onclick: move |_| on_request_delete.call(()),
                    if deleting { "Deleting..." } else { "Delete" }
                }
            }
            if tabs.len() > 1 {
                div { class: "deck-detail-tabs", role: "tablist",
                    for candidate in tabs.iter().copied() {
                        button {
                            key: "{candidate.label()}",
                            class: if candidate == tab { "deck-tab deck-tab--active" } else { "deck-tab" },
                            r#type: "button",
                            role: "tab",
                            aria_selected: candidate == tab,
                            onclick: move |_| on_tab.call(candidate),
                            "{candidate.label()}"
                        }
                    }
                }
            }
            div { class: "deck-detail-body", role: "tabpanel",
                match detail {
                    ItemDetailVm::Word(word) => rsx! { WordDetail { word: word, tab: tab } },
                    ItemDetailVm::Culture(question) => rsx! { CultureDetail { question: question } },
                }
            }
            if delete_state == ItemDeleteState::Confirming {
                ConfirmDialog {
                    title: "Delete item?".to_string(),
                    body: "This removes the item from the deck. This cannot be undone.".to_string(),
                    confirm_label: "Delete".to_string(),
                    busy: false,
                    on_cancel: on_cancel_delete,
                    on_confirm: on_confirm_delete,
                }
            }
        }
    }
}

#[component]
fn WordDetail(word: WordDetailVm, tab: DetailTab) -> Element {
    match tab {
        DetailTab::Overview => rsx! {
            dl { class: "deck-detail-fields",
                dt { "Front" }
                dd { "{word.front}" }
                dt { "Back" }
                dd { "{word.back}" }
                if let Some(pos) = word.part_of_speech {
                    dt { "Part of speech" }
                    dd { "{pos}" }
                }
                dt { "Updated" }
                dd { "{word.updated}" }
            }
        },
        DetailTab::Translations => rsx! {
            if word.translations.is_empty() {
                p { class: "deck-detail-empty", "No translations yet." }
            } else {
                ul { class: "deck-detail-list",
                    for translation in word.translations {
                        li { "{translation}" }
                    }
                }
            }
        },
        DetailTab::Examples => rsx! {
            p { class: "deck-detail-empty",
                if word.has_examples { "Example sentences are available for this word." } else { "No examples yet." }
            }
            p { class: "deck-detail-note",
                if word.has_audio { "Audio: available" } else { "Audio: missing" }
            }
        },
        DetailTab::Grammar => rsx! {
            p { class: "deck-detail-empty",
                if word.has_grammar { "Grammar notes are available for this word." } else { "No grammar notes yet." }
            }
        },
    }
}

#[component]
fn CultureDetail(question: CultureDetailVm) -> Element {
    rsx! {
        if let Some(category) = question.category {
            p { class: "deck-detail-category", "{category}" }
        }
        ol { class: "deck-detail-options",
            for option in question.options {
                li {
                    class: if option.is_correct { "deck-option deck-option--correct" } else { "deck-option" },
                    "{option.text}"
                    if option.is_correct {
                        span { class: "deck-option-badge", "Correct" }
                    }
                }
            }
        }
        p { class: "deck-detail-note", "Updated {question.updated}" }
    }
}
