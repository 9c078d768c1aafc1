mod components;
pub mod controller;
mod keyboard;
mod scripts;
pub mod state;
mod utils;
mod view;

pub use controller::{DeckDetailController, load_page};
pub use state::{
    BulkDeleteState, DeckDetailMode, DetailTab, EscapeOutcome, FetchRequest, FetchedPage,
    FilterPatch, FilterState, ListReturn, Notice, NoticeKind,
};
pub use view::DeckDetailView;

#[cfg(test)]
mod controller_tests;
