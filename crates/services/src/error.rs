//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::{DeckId, ItemError};
use storage::repository::StorageError;
use storage::seed::SeedError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `DeckService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckServiceError {
    #[error("deck {0} not found")]
    NotFound(DeckId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DeckItemService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckItemServiceError {
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DeckItemServiceError {
    /// True when the addressed item does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Seed(#[from] SeedError),
}
