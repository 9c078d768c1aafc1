mod detail;
mod list;
mod modals;

pub use detail::{DETAIL_BACK_ID, ItemDetailPane};
pub use list::DeckListPane;
pub use modals::{BulkDeleteBar, LEGACY_FRONT_ID, LegacyEditDialog, NoticeBanner};
