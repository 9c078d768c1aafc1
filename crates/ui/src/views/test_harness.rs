use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learn_core::model::DeckId;
use learn_core::time::fixed_now;
use services::{Clock, DeckItemService, DeckService};
use storage::repository::{DeckItemRepository, Storage};
use storage::seed::seed_demo_decks;

use crate::config::DeckDetailConfig;
use crate::context::{UiApp, build_app_context};
use crate::views::{DeckDetailView, HomeView};

#[derive(Clone)]
struct TestApp {
    deck_id: DeckId,
    deck_service: Arc<DeckService>,
    deck_item_service: Arc<DeckItemService>,
}

impl UiApp for TestApp {
    fn current_deck_id(&self) -> DeckId {
        self.deck_id
    }

    fn deck_detail_config(&self) -> DeckDetailConfig {
        DeckDetailConfig::default()
    }

    fn deck_service(&self) -> Arc<DeckService> {
        Arc::clone(&self.deck_service)
    }

    fn deck_item_service(&self) -> Arc<DeckItemService> {
        Arc::clone(&self.deck_item_service)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Deck(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Deck(deck_id) => rsx! { DeckDetailView { deck_id: deck_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending tasks until the rendered page contains `needle`.
    pub async fn render_until(&mut self, needle: &str) -> String {
        let mut html = self.render();
        for _ in 0..20 {
            if html.contains(needle) {
                break;
            }
            self.drive_async().await;
            html = self.render();
        }
        html
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Seeded demo decks behind the real services.
pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    seed_demo_decks(&storage, fixed_now())
        .await
        .expect("seed demo decks");
    let items = Arc::clone(&storage.items);
    setup_view_harness_with_items(view, storage, items)
}

/// Like `setup_view_harness`, but item access goes through `items`.
pub fn setup_view_harness_with_items(
    view: ViewKind,
    storage: Storage,
    items: Arc<dyn DeckItemRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let deck_service = Arc::new(DeckService::new(
        Arc::clone(&storage.decks),
        Arc::clone(&storage.items),
    ));
    let deck_item_service = Arc::new(DeckItemService::new(clock, items));

    let app = Arc::new(TestApp {
        deck_id: storage::seed::VOCABULARY_DECK_ID,
        deck_service,
        deck_item_service,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, storage }
}
