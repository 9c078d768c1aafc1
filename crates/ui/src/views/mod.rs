mod deck_detail;
mod home;
mod state;

pub use deck_detail::DeckDetailView;
pub use deck_detail::{
    BulkDeleteState, DeckDetailController, DeckDetailMode, DetailTab, EscapeOutcome, FetchRequest,
    FetchedPage, FilterPatch, FilterState, ListReturn, Notice, NoticeKind, load_page,
};
pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
