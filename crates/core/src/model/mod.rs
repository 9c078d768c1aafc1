mod culture;
mod deck;
mod ids;
mod item;
mod query;
mod vocabulary;

pub use culture::{CultureDraft, CultureQuestion};
pub use deck::{Deck, DeckError, DeckKind, DeckSummary};
pub use ids::{DeckId, ItemId, ParseIdError};
pub use item::{ItemError, ListItem};
pub use query::{ItemPage, ItemQuery, PartOfSpeechFilter, SortField, SortOrder};
pub use vocabulary::{ItemGeneration, PartOfSpeech, VocabularyDraft, VocabularyEntry};
