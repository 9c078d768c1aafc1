use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ItemId;
use crate::model::item::ItemError;

//
// ─── PART OF SPEECH ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Phrase,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 8] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Phrase,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Pronoun => "pronoun",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Phrase => "phrase",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Verb => "Verb",
            Self::Adjective => "Adjective",
            Self::Adverb => "Adverb",
            Self::Pronoun => "Pronoun",
            Self::Preposition => "Preposition",
            Self::Conjunction => "Conjunction",
            Self::Phrase => "Phrase",
        }
    }

    /// Parse the storage representation.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::UnknownPartOfSpeech` for unrecognized values.
    pub fn parse(value: &str) -> Result<Self, ItemError> {
        Self::ALL
            .into_iter()
            .find(|pos| pos.as_str() == value)
            .ok_or_else(|| ItemError::UnknownPartOfSpeech(value.to_string()))
    }
}

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

/// Schema generation of a vocabulary item.
///
/// Legacy items are plain front/back cards and open in the edit dialog;
/// word entries carry structured data and open the tabbed detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemGeneration {
    Legacy,
    WordEntry,
}

impl ItemGeneration {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::WordEntry => "word_entry",
        }
    }

    /// # Errors
    ///
    /// Returns `ItemError::UnknownGeneration` for unrecognized values.
    pub fn parse(value: &str) -> Result<Self, ItemError> {
        match value {
            "legacy" => Ok(Self::Legacy),
            "word_entry" => Ok(Self::WordEntry),
            other => Err(ItemError::UnknownGeneration(other.to_string())),
        }
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated vocabulary entry input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyDraft {
    pub front: String,
    pub back: String,
    pub part_of_speech: Option<PartOfSpeech>,
    pub translations: Vec<String>,
    pub has_audio: bool,
    pub has_examples: bool,
    pub has_grammar: bool,
    pub generation: ItemGeneration,
}

impl VocabularyDraft {
    /// A legacy front/back card with no structured data.
    #[must_use]
    pub fn legacy(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            part_of_speech: None,
            translations: Vec::new(),
            has_audio: false,
            has_examples: false,
            has_grammar: false,
            generation: ItemGeneration::Legacy,
        }
    }

    /// A structured word entry.
    #[must_use]
    pub fn word(
        front: impl Into<String>,
        back: impl Into<String>,
        part_of_speech: PartOfSpeech,
    ) -> Self {
        Self {
            part_of_speech: Some(part_of_speech),
            generation: ItemGeneration::WordEntry,
            ..Self::legacy(front, back)
        }
    }

    #[must_use]
    pub fn with_translations(mut self, translations: &[&str]) -> Self {
        self.translations = translations.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_completeness(mut self, audio: bool, examples: bool, grammar: bool) -> Self {
        self.has_audio = audio;
        self.has_examples = examples;
        self.has_grammar = grammar;
        self
    }

    /// Validate the draft and attach identity and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::EmptyFront` or `ItemError::EmptyBack` when a side is blank.
    pub fn validate(self, id: ItemId, now: DateTime<Utc>) -> Result<VocabularyEntry, ItemError> {
        let front = self.front.trim();
        if front.is_empty() {
            return Err(ItemError::EmptyFront);
        }
        let back = self.back.trim();
        if back.is_empty() {
            return Err(ItemError::EmptyBack);
        }
        let translations = self
            .translations
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(VocabularyEntry {
            id,
            front: front.to_string(),
            back: back.to_string(),
            part_of_speech: self.part_of_speech,
            translations,
            has_audio: self.has_audio,
            has_examples: self.has_examples,
            has_grammar: self.has_grammar,
            generation: self.generation,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    id: ItemId,
    front: String,
    back: String,
    part_of_speech: Option<PartOfSpeech>,
    translations: Vec<String>,
    has_audio: bool,
    has_examples: bool,
    has_grammar: bool,
    generation: ItemGeneration,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VocabularyEntry {
    /// Rehydrate an entry from storage, re-running validation on the text sides.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if persisted text is blank.
    pub fn from_persisted(
        id: ItemId,
        draft: VocabularyDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        let mut entry = draft.validate(id, created_at)?;
        entry.updated_at = updated_at;
        Ok(entry)
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        self.part_of_speech
    }

    #[must_use]
    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.has_audio
    }

    #[must_use]
    pub fn has_examples(&self) -> bool {
        self.has_examples
    }

    #[must_use]
    pub fn has_grammar(&self) -> bool {
        self.has_grammar
    }

    #[must_use]
    pub fn generation(&self) -> ItemGeneration {
        self.generation
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self.generation, ItemGeneration::Legacy)
    }

    /// Replace the front/back text, keeping everything else.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::EmptyFront` or `ItemError::EmptyBack` when a side is blank.
    pub fn with_text(
        &self,
        front: &str,
        back: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        let front = front.trim();
        if front.is_empty() {
            return Err(ItemError::EmptyFront);
        }
        let back = back.trim();
        if back.is_empty() {
            return Err(ItemError::EmptyBack);
        }
        Ok(Self {
            front: front.to_string(),
            back: back.to_string(),
            updated_at: now,
            ..self.clone()
        })
    }

    /// Number of the three completeness flags that are set.
    #[must_use]
    pub fn completeness(&self) -> u8 {
        u8::from(self.has_audio) + u8::from(self.has_examples) + u8::from(self.has_grammar)
    }
}
