use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::DeckId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck name cannot be empty")]
    EmptyName,

    #[error("unknown deck kind: {0}")]
    UnknownKind(String),
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// What a deck holds. Decides which list columns, filters and bulk tools apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Vocabulary,
    Culture,
}

impl DeckKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Culture => "culture",
        }
    }

    /// Parse the storage representation.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::UnknownKind` for unrecognized values.
    pub fn parse(value: &str) -> Result<Self, DeckError> {
        match value {
            "vocabulary" => Ok(Self::Vocabulary),
            "culture" => Ok(Self::Culture),
            other => Err(DeckError::UnknownKind(other.to_string())),
        }
    }

    /// Only vocabulary decks expose checkbox selection and bulk delete.
    #[must_use]
    pub fn supports_bulk_actions(self) -> bool {
        matches!(self, Self::Vocabulary)
    }

    /// Part-of-speech filtering only makes sense for vocabulary.
    #[must_use]
    pub fn supports_part_of_speech(self) -> bool {
        matches!(self, Self::Vocabulary)
    }
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    id: DeckId,
    name: String,
    kind: DeckKind,
    created_at: DateTime<Utc>,
}

impl Deck {
    /// Creates a validated deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::EmptyName` if the trimmed name is empty.
    pub fn new(
        id: DeckId,
        name: impl Into<String>,
        kind: DeckKind,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DeckError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DeckError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
            kind,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A deck plus its unfiltered item count, as handed to the deck detail view by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSummary {
    pub id: DeckId,
    pub name: String,
    pub kind: DeckKind,
    pub item_count: u32,
}

impl DeckSummary {
    #[must_use]
    pub fn from_deck(deck: &Deck, item_count: u32) -> Self {
        Self {
            id: deck.id(),
            name: deck.name().to_string(),
            kind: deck.kind(),
            item_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn deck_rejects_blank_name() {
        let err = Deck::new(DeckId::new(1), "   ", DeckKind::Vocabulary, fixed_now()).unwrap_err();
        assert_eq!(err, DeckError::EmptyName);
    }

    #[test]
    fn deck_trims_name() {
        let deck = Deck::new(DeckId::new(1), "  Greek A1 ", DeckKind::Culture, fixed_now()).unwrap();
        assert_eq!(deck.name(), "Greek A1");
        assert_eq!(deck.kind(), DeckKind::Culture);
    }

    #[test]
    fn kind_round_trips_storage_value() {
        for kind in [DeckKind::Vocabulary, DeckKind::Culture] {
            assert_eq!(DeckKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(matches!(
            DeckKind::parse("grammar"),
            Err(DeckError::UnknownKind(_))
        ));
    }

    #[test]
    fn only_vocabulary_supports_bulk_actions() {
        assert!(DeckKind::Vocabulary.supports_bulk_actions());
        assert!(!DeckKind::Culture.supports_bulk_actions());
    }
}
