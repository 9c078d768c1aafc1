use dioxus::prelude::*;
use learn_core::model::ItemId;

use super::controller::DeckDetailController;
use super::scripts::{focus_row, restore_list_position};
use super::state::EscapeOutcome;
use super::view::{ControllerSignal, with_controller};

fn is_plain_escape(key: &Key, modifiers: Modifiers) -> bool {
    *key == Key::Escape && modifiers.is_empty()
}

/// Escape handling for the whole deck view.
///
/// The event only stops here when the controller consumed it. Otherwise it
/// keeps bubbling so the hosting dialog can close itself.
pub(super) fn build_on_root_key(controller: ControllerSignal) -> Callback<KeyboardEvent> {
    use_callback(move |evt: KeyboardEvent| {
        if !is_plain_escape(&evt.data.key(), evt.data.modifiers()) {
            return;
        }
        let outcome = with_controller(controller, DeckDetailController::handle_escape)
            .unwrap_or(EscapeOutcome::PassThrough);
        let EscapeOutcome::Intercepted(return_to) = outcome else {
            return;
        };
        evt.prevent_default();
        evt.stop_propagation();
        if let Some(return_to) = return_to {
            spawn(restore_list_position(return_to));
        }
    })
}

/// Arrow keys move focus between rows; Enter opens the focused row.
pub(super) fn build_on_list_key(
    controller: ControllerSignal,
    focused_row: Signal<Option<ItemId>>,
    on_open_row: Callback<ItemId>,
) -> Callback<KeyboardEvent> {
    use_callback(move |evt: KeyboardEvent| {
        if !evt.data.modifiers().is_empty() {
            return;
        }
        let key = evt.data.key();
        let ids = controller
            .read()
            .as_ref()
            .filter(|ctrl| ctrl.mode().is_list())
            .map(|ctrl| ctrl.list().ids())
            .unwrap_or_default();
        let current_index = focused_row().and_then(|id| ids.iter().position(|row| *row == id));
        let Some(next_index) = next_row_index(current_index, ids.len(), &key) else {
            return;
        };
        let Some(id) = ids.get(next_index).copied() else {
            return;
        };

        evt.prevent_default();
        if key == Key::Enter {
            on_open_row.call(id);
        } else {
            spawn(focus_row(id));
        }
    })
}

fn next_row_index(current_index: Option<usize>, len: usize, key: &Key) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match key {
        Key::ArrowDown => Some(match current_index {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        }),
        Key::ArrowUp => Some(match current_index {
            Some(idx) => idx.saturating_sub(1),
            None => len.saturating_sub(1),
        }),
        Key::Home => Some(0),
        Key::End => Some(len - 1),
        Key::Enter => current_index,
        _ => None,
    }
}
