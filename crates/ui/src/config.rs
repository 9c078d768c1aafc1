use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// How long a success or error notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u64 = 4_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Tunables for the deck detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckDetailConfig {
    page_size: u32,
    search_debounce: Duration,
    notice_timeout: Duration,
}

impl DeckDetailConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroPageSize` when `page_size` is 0.
    pub fn new(page_size: u32) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    #[must_use]
    pub fn notice_timeout(&self) -> Duration {
        self.notice_timeout
    }
}

impl Default for DeckDetailConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            notice_timeout: Duration::from_millis(NOTICE_TIMEOUT_MS),
        }
    }
}
