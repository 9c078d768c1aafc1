use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::culture::CultureQuestion;
use crate::model::ids::ItemId;
use crate::model::vocabulary::{PartOfSpeech, VocabularyEntry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("front text cannot be empty")]
    EmptyFront,

    #[error("back text cannot be empty")]
    EmptyBack,

    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("a question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("correct option {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("unknown part of speech: {0}")]
    UnknownPartOfSpeech(String),

    #[error("unknown item generation: {0}")]
    UnknownGeneration(String),

    #[error("only legacy vocabulary cards can be edited as text")]
    NotLegacy,
}

/// One row of a deck list: either a vocabulary entry or a culture question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListItem {
    Vocabulary(VocabularyEntry),
    Culture(CultureQuestion),
}

impl ListItem {
    #[must_use]
    pub fn id(&self) -> ItemId {
        match self {
            Self::Vocabulary(entry) => entry.id(),
            Self::Culture(question) => question.id(),
        }
    }

    /// Text shown in the first list column.
    #[must_use]
    pub fn primary_text(&self) -> &str {
        match self {
            Self::Vocabulary(entry) => entry.front(),
            Self::Culture(question) => question.question(),
        }
    }

    /// Text shown in the second list column.
    #[must_use]
    pub fn secondary_text(&self) -> &str {
        match self {
            Self::Vocabulary(entry) => entry.back(),
            Self::Culture(question) => question.correct_answer(),
        }
    }

    #[must_use]
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        match self {
            Self::Vocabulary(entry) => entry.part_of_speech(),
            Self::Culture(_) => None,
        }
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Vocabulary(entry) => entry.created_at(),
            Self::Culture(question) => question.created_at(),
        }
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Vocabulary(entry) => entry.updated_at(),
            Self::Culture(question) => question.updated_at(),
        }
    }

    /// True for vocabulary cards of the legacy schema generation.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Vocabulary(entry) if entry.is_legacy())
    }

    /// Case-insensitive substring match over every searchable text field.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(needle);
        match self {
            Self::Vocabulary(entry) => {
                hit(entry.front())
                    || hit(entry.back())
                    || entry.translations().iter().any(|t| hit(t))
            }
            Self::Culture(question) => {
                hit(question.question())
                    || question.options().iter().any(|o| hit(o))
                    || question.category().is_some_and(hit)
            }
        }
    }
}
