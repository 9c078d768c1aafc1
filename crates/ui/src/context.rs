use std::sync::Arc;

use learn_core::model::DeckId;
use services::{DeckItemService, DeckService};

use crate::config::DeckDetailConfig;

pub trait UiApp: Send + Sync {
    /// Deck opened when the app starts.
    fn current_deck_id(&self) -> DeckId;
    fn deck_detail_config(&self) -> DeckDetailConfig;

    fn deck_service(&self) -> Arc<DeckService>;
    fn deck_item_service(&self) -> Arc<DeckItemService>;
}

#[derive(Clone)]
pub struct AppContext {
    current_deck_id: DeckId,
    deck_detail_config: DeckDetailConfig,

    deck_service: Arc<DeckService>,
    deck_item_service: Arc<DeckItemService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            current_deck_id: app.current_deck_id(),
            deck_detail_config: app.deck_detail_config(),
            deck_service: app.deck_service(),
            deck_item_service: app.deck_item_service(),
        }
    }

    #[must_use]
    pub fn current_deck_id(&self) -> DeckId {
        self.current_deck_id
    }

    #[must_use]
    pub fn deck_detail_config(&self) -> DeckDetailConfig {
        self.deck_detail_config
    }

    #[must_use]
    pub fn deck_service(&self) -> Arc<DeckService> {
        Arc::clone(&self.deck_service)
    }

    #[must_use]
    pub fn deck_item_service(&self) -> Arc<DeckItemService> {
        Arc::clone(&self.deck_item_service)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
