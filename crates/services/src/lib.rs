#![forbid(unsafe_code)]

pub mod app_services;
pub mod deck_item_service;
pub mod deck_service;
pub mod error;

pub use learn_core::Clock;

pub use app_services::AppServices;
pub use deck_item_service::{BulkDeleteReport, DeckItemService};
pub use deck_service::DeckService;
pub use error::{AppServicesError, DeckItemServiceError, DeckServiceError};
