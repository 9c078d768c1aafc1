mod deck_item_vm;
mod deck_vm;
mod time_fmt;

pub use deck_item_vm::{
    CultureDetailVm, CultureOptionVm, ItemDetailVm, ItemRowVm, PaginationVm, WordDetailVm,
    bulk_confirm_message, empty_message, list_error_message, map_item_detail, map_item_rows,
    map_pagination, results_summary, selection_label, total_pages,
};
pub(crate) use deck_item_vm::plural_items;
pub use deck_vm::{DeckOptionVm, map_deck_options};
pub use time_fmt::format_date;
