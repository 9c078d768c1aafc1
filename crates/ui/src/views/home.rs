use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::DeckDetailView;

/// Landing page: the deck chosen at launch.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let deck_id = ctx.current_deck_id().value();

    rsx! {
        DeckDetailView { deck_id: deck_id }
    }
}
