use dioxus::prelude::*;

use crate::vm::{bulk_confirm_message, selection_label};

use super::super::state::{
    BulkDeleteState, ItemDeleteState, LegacyEditDraft, Notice, NoticeKind, SaveState,
};

pub const LEGACY_FRONT_ID: &str = "legacy-front";

#[component]
pub fn ConfirmDialog(
    title: String,
    body: String,
    confirm_label: String,
    busy: bool,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "deck-modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "deck-modal",
                role: "alertdialog",
                aria_modal: "true",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "deck-modal-title", "{title}" }
                p { class: "deck-modal-body", "{body}" }
                div { class: "deck-modal-actions",
                    button {
                        class: "btn deck-modal-cancel",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn deck-modal-confirm",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn LegacyEditDialog(
    draft: LegacyEditDraft,
    show_validation: bool,
    dirty: bool,
    save_state: SaveState,
    delete_state: ItemDeleteState,
    on_front_change: Callback<String>,
    on_back_change: Callback<String>,
    on_save: Callback<()>,
    on_close: Callback<()>,
    on_request_delete: Callback<()>,
    on_cancel_delete: Callback<()>,
    on_confirm_delete: Callback<()>,
) -> Element {
    let front_invalid = show_validation && draft.front.trim().is_empty();
    let back_invalid = show_validation && draft.back.trim().is_empty();
    let saving = save_state == SaveState::Saving;
    let busy = saving || delete_state == ItemDeleteState::Deleting;
    let save_error = match save_state {
        SaveState::Error(err) => Some(err.message()),
        _ => None,
    };

    rsx! {
        div {
            class: "deck-modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "deck-modal deck-legacy-edit",
                role: "dialog",
                aria_modal: "true",
                aria_label: "Edit card",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "deck-modal-title", "Edit card" }
                p { class: "deck-modal-body",
                    "This card predates word entries. Only its front and back can be changed."
                }
                label { class: "deck-field-label", r#for: LEGACY_FRONT_ID, "Front" }
                input {
                    id: LEGACY_FRONT_ID,
                    class: if front_invalid { "deck-field deck-field--invalid" } else { "deck-field" },
                    r#type: "text",
                    value: "{draft.front}",
                    disabled: busy,
                    oninput: move |evt| on_front_change.call(evt.value()),
                }
                if front_invalid {
                    p { class: "deck-field-error", "Front is required." }
                }
                label { class: "deck-field-label", r#for: "legacy-back", "Back" }
                input {
                    id: "legacy-back",
                    class: if back_invalid { "deck-field deck-field--invalid" } else { "deck-field" },
                    r#type: "text",
                    value: "{draft.back}",
                    disabled: busy,
                    oninput: move |evt| on_back_change.call(evt.value()),
                }
                if back_invalid {
                    p { class: "deck-field-error", "Back is required." }
                }
                if let Some(message) = save_error {
                    p { class: "deck-field-error", role: "alert", "{message}" }
                }
                div { class: "deck-modal-actions",
                    button {
                        class: "btn deck-legacy-delete",
                        r#type: "button",
                        disabled: busy || delete_state != ItemDeleteState::Idle,
                        onclick: move |_| on_request_delete.call(()),
                        "Delete"
                    }
                    button {
                        class: "btn deck-modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy || !dirty,
                        onclick: move |_| on_save.call(()),
                        if saving { "Saving..." } else { "Save" }
                    }
                }
            }
            if delete_state == ItemDeleteState::Confirming {
                ConfirmDialog {
                    title: "Delete card?".to_string(),
                    body: "This removes the card from the deck. This cannot be undone.".to_string(),
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
pub fn BulkDeleteBar(
    count: usize,
    state: BulkDeleteState,
    on_request: Callback<()>,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> Element {
    let deleting = state == BulkDeleteState::Deleting;
    rsx! {
        if count > 0 || deleting {
            div { class: "deck-bulk-bar", role: "toolbar",
                span { class: "deck-bulk-count", "{selection_label(count)}" }
                button {
                    class: "btn deck-bulk-delete",
                    r#type: "button",
                    disabled: state != BulkDeleteState::Idle,
                    onclick: move |_| on_request.call(()),
                    if deleting { "Deleting..." } else { "Delete selected" }
                }
            }
        }
        if state == BulkDeleteState::Confirming {
            ConfirmDialog {
                title: "Delete selected items?".to_string(),
                body: bulk_confirm_message(count),
                confirm_label: "Delete".to_string(),
                busy: false,
                on_cancel: on_cancel,
                on_confirm: on_confirm,
            }
        }
    }
}

#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: Callback<u64>) -> Element {
    let id = notice.id;
    let class = match notice.kind {
        NoticeKind::Success => "deck-notice deck-notice--success",
        NoticeKind::Error => "deck-notice deck-notice--error",
    };
    let role = match notice.kind {
        NoticeKind::Success => "status",
        NoticeKind::Error => "alert",
    };
    rsx! {
        div { class: class, role: role,
            span { class: "deck-notice-message", "{notice.message}" }
            button {
                class: "deck-notice-dismiss",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| on_dismiss.call(id),
                "×"
            }
        }
    }
}
