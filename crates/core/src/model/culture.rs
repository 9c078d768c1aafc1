use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ItemId;
use crate::model::item::ItemError;

/// Unvalidated culture question input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub category: Option<String>,
}

impl CultureDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, options: &[&str], correct_index: usize) -> Self {
        Self {
            question: question.into(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_index,
            category: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// # Errors
    ///
    /// Returns `ItemError::EmptyQuestion`, `ItemError::TooFewOptions`, or
    /// `ItemError::CorrectIndexOutOfRange`.
    pub fn validate(self, id: ItemId, now: DateTime<Utc>) -> Result<CultureQuestion, ItemError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(ItemError::EmptyQuestion);
        }
        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if options.len() < 2 {
            return Err(ItemError::TooFewOptions(options.len()));
        }
        if self.correct_index >= options.len() {
            return Err(ItemError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: options.len(),
            });
        }
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(CultureQuestion {
            id,
            question: question.to_string(),
            options,
            correct_index: self.correct_index,
            category,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultureQuestion {
    id: ItemId,
    question: String,
    options: Vec<String>,
    correct_index: usize,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CultureQuestion {
    /// # Errors
    ///
    /// Returns `ItemError` if the persisted question no longer validates.
    pub fn from_persisted(
        id: ItemId,
        draft: CultureDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        let mut question = draft.validate(id, created_at)?;
        question.updated_at = updated_at;
        Ok(question)
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        // validated on construction
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
