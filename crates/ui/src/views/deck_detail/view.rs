use std::sync::Arc;

use dioxus::prelude::*;
use learn_core::model::{DeckId, ItemId, PartOfSpeechFilter, SortField};
use services::DeckItemService;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    empty_message, map_item_detail, map_item_rows, map_pagination, plural_items, results_summary,
};

use super::components::{
    BulkDeleteBar, DETAIL_BACK_ID, DeckListPane, ItemDetailPane, LEGACY_FRONT_ID,
    LegacyEditDialog, NoticeBanner,
};
use super::controller::{DeckDetailController, load_page};
use super::keyboard::{build_on_list_key, build_on_root_key};
use super::scripts::{focus_element, read_list_scroll, restore_list_position};
use super::state::{DeckDetailMode, DetailTab, FetchRequest, FilterPatch};

pub(super) type ControllerSignal = Signal<Option<DeckDetailController>>;

/// Run `f` against the mounted controller, if any.
pub(super) fn with_controller<R>(
    mut controller: ControllerSignal,
    f: impl FnOnce(&mut DeckDetailController) -> R,
) -> Option<R> {
    controller.write().as_mut().map(f)
}

async fn run_fetch(controller: ControllerSignal, service: &DeckItemService, request: FetchRequest) {
    let result = load_page(service, &request.query).await;
    with_controller(controller, |ctrl| ctrl.finish_fetch(request.seq, result));
}

fn spawn_fetch(
    controller: ControllerSignal,
    service: &Arc<DeckItemService>,
    update: impl FnOnce(&mut DeckDetailController) -> Option<FetchRequest>,
) {
    let Some(request) = with_controller(controller, update).flatten() else {
        return;
    };
    let service = Arc::clone(service);
    spawn(async move {
        run_fetch(controller, &service, request).await;
    });
}

#[component]
pub fn DeckDetailView(deck_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let deck_service = ctx.deck_service();
    let items = ctx.deck_item_service();
    let config = ctx.deck_detail_config();

    let deck_resource = use_resource(use_reactive((&deck_id,), move |(deck_id,)| {
        let deck_service = deck_service.clone();
        async move {
            deck_service
                .deck_summary(DeckId::new(deck_id))
                .await
                .map_err(|err| ViewError::from(&err))
        }
    }));

    let mut controller: ControllerSignal = use_signal(|| None);
    let focused_row = use_signal(|| None::<ItemId>);

    let items_for_open = items.clone();
    use_effect(move || {
        let Some(Ok(summary)) = deck_resource.value().read().clone() else {
            return;
        };
        let request = {
            let mut slot = controller.write();
            match slot.as_mut() {
                Some(ctrl) if ctrl.deck().id == summary.id => None,
                Some(ctrl) => Some(ctrl.open(summary)),
                None => {
                    let mut ctrl = DeckDetailController::new(config, summary.clone());
                    let request = ctrl.open(summary);
                    *slot = Some(ctrl);
                    Some(request)
                }
            }
        };
        if let Some(request) = request {
            let service = items_for_open.clone();
            spawn(async move {
                run_fetch(controller, &service, request).await;
            });
        }
    });

    let mut scheduled_notice = use_signal(|| 0_u64);
    use_effect(move || {
        let Some(id) = controller
            .read()
            .as_ref()
            .and_then(|ctrl| ctrl.notice().map(|notice| notice.id))
        else {
            return;
        };
        if *scheduled_notice.peek() == id {
            return;
        }
        scheduled_notice.set(id);
        let timeout = config.notice_timeout();
        spawn(async move {
            tokio::time::sleep(timeout).await;
            with_controller(controller, |ctrl| ctrl.dismiss_notice(id));
        });
    });

    //
    // ─── LIST HANDLERS ─────────────────────────────────────────────────────────
    //

    let on_search_change = {
        let items = items.clone();
        use_callback(move |value: String| {
            let Some(ticket) = with_controller(controller, |ctrl| ctrl.set_query(value)) else {
                return;
            };
            let service = items.clone();
            let delay = config.search_debounce();
            spawn(async move {
                tokio::time::sleep(delay).await;
                let request =
                    with_controller(controller, |ctrl| ctrl.debounce_elapsed(ticket)).flatten();
                if let Some(request) = request {
                    run_fetch(controller, &service, request).await;
                }
            });
        })
    };

    let on_clear_search = {
        let items = items.clone();
        use_callback(move |()| spawn_fetch(controller, &items, DeckDetailController::clear_query))
    };

    let on_part_of_speech_change = {
        let items = items.clone();
        use_callback(move |filter: PartOfSpeechFilter| {
            spawn_fetch(controller, &items, |ctrl| {
                ctrl.apply_filter(FilterPatch::part_of_speech(filter))
            });
        })
    };

    let on_sort = {
        let items = items.clone();
        use_callback(move |field: SortField| {
            spawn_fetch(controller, &items, |ctrl| ctrl.toggle_sort(field));
        })
    };

    let on_page = {
        let items = items.clone();
        use_callback(move |page: u32| {
            spawn_fetch(controller, &items, |ctrl| ctrl.set_page(page));
        })
    };

    let on_toggle_row = use_callback(move |id: ItemId| {
        with_controller(controller, |ctrl| ctrl.toggle_select(id));
    });

    let on_toggle_all = use_callback(move |()| {
        with_controller(controller, DeckDetailController::toggle_select_all);
    });

    let on_row_focus = {
        let mut focused_row = focused_row;
        use_callback(move |id: ItemId| focused_row.set(Some(id)))
    };

    let on_open_row = use_callback(move |id: ItemId| {
        spawn(async move {
            let offset = read_list_scroll().await.unwrap_or(0.0);
            let opened = with_controller(controller, |ctrl| {
                ctrl.select_item(id, offset)
                    .then(|| matches!(ctrl.mode(), DeckDetailMode::LegacyEdit(_)))
            })
            .flatten();
            match opened {
                Some(true) => focus_element(LEGACY_FRONT_ID).await,
                Some(false) => focus_element(DETAIL_BACK_ID).await,
                None => {}
            }
        });
    });

    let on_list_key = build_on_list_key(controller, focused_row, on_open_row);
    let on_root_key = build_on_root_key(controller);

    //
    // ─── DETAIL HANDLERS ───────────────────────────────────────────────────────
    //

    let on_back = use_callback(move |()| {
        if let Some(return_to) = with_controller(controller, DeckDetailController::back).flatten() {
            spawn(restore_list_position(return_to));
        }
    });

    let on_tab = use_callback(move |tab: DetailTab| {
        with_controller(controller, |ctrl| ctrl.set_detail_tab(tab));
    });

    let on_request_item_delete = use_callback(move |()| {
        with_controller(controller, DeckDetailController::request_item_delete);
    });

    let on_cancel_item_delete = use_callback(move |()| {
        with_controller(controller, DeckDetailController::cancel_item_delete);
    });

    let on_confirm_item_delete = {
        let items = items.clone();
        use_callback(move |()| {
            let Some((deck_id, id)) =
                with_controller(controller, DeckDetailController::begin_item_delete).flatten()
            else {
                return;
            };
            let service = items.clone();
            spawn(async move {
                let result = service
                    .delete_item(deck_id, id)
                    .await
                    .map_err(|err| ViewError::from(&err));
                let refetch =
                    with_controller(controller, |ctrl| ctrl.finish_item_delete(id, result)).flatten();
                if let Some(request) = refetch {
                    run_fetch(controller, &service, request).await;
                }
            });
        })
    };

    let on_legacy_front = use_callback(move |value: String| {
        with_controller(controller, |ctrl| ctrl.set_legacy_front(value));
    });

    let on_legacy_back = use_callback(move |value: String| {
        with_controller(controller, |ctrl| ctrl.set_legacy_back(value));
    });

    let on_legacy_save = {
        let items = items.clone();
        use_callback(move |()| {
            let Some(request) =
                with_controller(controller, DeckDetailController::begin_legacy_save).flatten()
            else {
                return;
            };
            let service = items.clone();
            spawn(async move {
                let result = service
                    .update_legacy_card(request.deck_id, request.id, &request.front, &request.back)
                    .await
                    .map_err(|err| ViewError::from(&err));
                let refetch =
                    with_controller(controller, |ctrl| ctrl.finish_legacy_save(request.id, result))
                        .flatten();
                if let Some(refetch) = refetch {
                    run_fetch(controller, &service, refetch).await;
                }
            });
        })
    };

    //
    // ─── BULK & NOTICES ────────────────────────────────────────────────────────
    //

    let on_request_bulk = use_callback(move |()| {
        with_controller(controller, DeckDetailController::request_bulk_delete);
    });

    let on_cancel_bulk = use_callback(move |()| {
        with_controller(controller, DeckDetailController::cancel_bulk_delete);
    });

    let on_confirm_bulk = {
        let items = items.clone();
        use_callback(move |()| {
            let Some(request) =
                with_controller(controller, DeckDetailController::confirm_bulk_delete).flatten()
            else {
                return;
            };
            let service = items.clone();
            spawn(async move {
                let report = service.bulk_delete(request.deck_id, &request.ids).await;
                let refetch =
                    with_controller(controller, |ctrl| ctrl.finish_bulk_delete(&request, &report))
                        .flatten();
                if let Some(refetch) = refetch {
                    run_fetch(controller, &service, refetch).await;
                }
            });
        })
    };

    let on_dismiss_notice = use_callback(move |id: u64| {
        with_controller(controller, |ctrl| ctrl.dismiss_notice(id));
    });

    //
    // ─── RENDER ────────────────────────────────────────────────────────────────
    //

    let deck_state = view_state_from_resource(&deck_resource);
    let snapshot = controller.read().clone();

    let body = match (deck_state, snapshot) {
        (ViewState::Error(ViewError::NotFound), _) => rsx! {
            p { class: "deck-detail-missing", "This deck no longer exists." }
        },
        (ViewState::Error(err), _) => rsx! {
            p { class: "deck-detail-missing", "{err.message()}" }
        },
        (ViewState::Ready(_), Some(ctrl)) => {
            let deck = ctrl.deck().clone();
            let filters = ctrl.filters().clone();
            let list = ctrl.list();
            let filtered = filters.is_filtered();
            let list_pane = rsx! {
                DeckListPane {
                    kind: deck.kind,
                    search_value: filters.query.clone(),
                    highlight: filters.debounced_query.clone(),
                    part_of_speech: filters.part_of_speech,
                    sort_field: filters.sort_field,
                    sort_order: filters.sort_order,
                    rows: map_item_rows(&list.items, ctrl.selection()),
                    loading: list.loading,
                    error: list.error,
                    summary: results_summary(filtered, list.total, deck.item_count),
                    empty_message: empty_message(deck.kind, filtered).to_string(),
                    pagination: map_pagination(filters.page, ctrl.config().page_size(), list.total),
                    selection_enabled: ctrl.selection_enabled(),
                    all_selected: ctrl.is_all_selected(),
                    on_search_change: on_search_change,
                    on_clear_search: on_clear_search,
                    on_part_of_speech_change: on_part_of_speech_change,
                    on_sort: on_sort,
                    on_toggle_row: on_toggle_row,
                    on_toggle_all: on_toggle_all,
                    on_open_row: on_open_row,
                    on_row_focus: on_row_focus,
                    on_page: on_page,
                    on_list_key: on_list_key,
                }
            };
            let bulk_bar = rsx! {
                if deck.kind.supports_bulk_actions() {
                    BulkDeleteBar {
                        count: ctrl.selection().len(),
                        state: ctrl.bulk_state(),
                        on_request: on_request_bulk,
                        on_cancel: on_cancel_bulk,
                        on_confirm: on_confirm_bulk,
                    }
                }
            };
            let pane = match ctrl.mode().clone() {
                DeckDetailMode::List => rsx! {
                    {list_pane}
                    {bulk_bar}
                },
                DeckDetailMode::Detail(state) => rsx! {
                    ItemDetailPane {
                        detail: map_item_detail(&state.item),
                        tab: state.tab,
                        delete_state: state.delete,
                        on_back: on_back,
                        on_tab: on_tab,
                        on_request_delete: on_request_item_delete,
                        on_cancel_delete: on_cancel_item_delete,
                        on_confirm_delete: on_confirm_item_delete,
                    }
                },
                DeckDetailMode::LegacyEdit(state) => {
                    let dirty = state.is_dirty();
                    rsx! {
                        {list_pane}
                        LegacyEditDialog {
                            draft: state.draft,
                            show_validation: state.show_validation,
                            dirty: dirty,
                            save_state: state.save,
                            delete_state: state.delete,
                            on_front_change: on_legacy_front,
                            on_back_change: on_legacy_back,
                            on_save: on_legacy_save,
                            on_close: on_back,
                            on_request_delete: on_request_item_delete,
                            on_cancel_delete: on_cancel_item_delete,
                            on_confirm_delete: on_confirm_item_delete,
                        }
                    }
                }
            };
            rsx! {
                header { class: "deck-detail-header",
                    h2 { class: "deck-detail-name", "{deck.name}" }
                    span { class: "deck-detail-count", "{plural_items(deck.item_count as usize)}" }
                }
                if let Some(notice) = ctrl.notice().cloned() {
                    NoticeBanner { notice: notice, on_dismiss: on_dismiss_notice }
                }
                {pane}
            }
        }
        _ => rsx! {
            p { class: "deck-detail-loading", "Loading deck..." }
        },
    };

    rsx! {
        div {
            class: "page deck-detail",
            tabindex: "-1",
            onkeydown: on_root_key,
            {body}
        }
    }
}
