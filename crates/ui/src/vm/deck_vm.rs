use learn_core::model::{DeckId, DeckKind, DeckSummary};

/// UI-ready representation of a deck for the deck picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckOptionVm {
    pub id: DeckId,
    pub label: String,
    pub kind: DeckKind,
}

/// Convert deck summaries into picker entries.
#[must_use]
pub fn map_deck_options(decks: &[DeckSummary]) -> Vec<DeckOptionVm> {
    decks
        .iter()
        .map(|deck| DeckOptionVm {
            id: deck.id,
            label: format_deck_label(&deck.name, deck.item_count),
            kind: deck.kind,
        })
        .collect()
}

fn format_deck_label(name: &str, item_count: u32) -> String {
    format!("{name} ({item_count})")
}
