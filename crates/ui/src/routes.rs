use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{DeckDetailView, HomeView, ViewError, ViewState, view_state_from_resource};
use crate::vm::map_deck_options;

const SIDEBAR_DECK_LIMIT: u32 = 64;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/decks/:deck_id", DeckDetailView)] Deck { deck_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let deck_service = ctx.deck_service();

    let resource = use_resource(move || {
        let deck_service = deck_service.clone();
        async move {
            let decks = deck_service
                .list_summaries(SIDEBAR_DECK_LIMIT)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_deck_options(&decks))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        nav { class: "sidebar",
            h1 { "Learn" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
            }
            h2 { class: "sidebar-heading", "Decks" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "sidebar-note", "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "sidebar-note", "{err.message()}" }
                },
                ViewState::Ready(options) => rsx! {
                    if options.is_empty() {
                        p { class: "sidebar-note", "No decks yet." }
                    }
                    ul { class: "sidebar-decks",
                        for option in options {
                            li { key: "{option.id.value()}",
                                Link {
                                    to: Route::Deck { deck_id: option.id.value() },
                                    "{option.label}"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
