use learn_core::model::{ItemId, PartOfSpeech, PartOfSpeechFilter, SortField, SortOrder};

pub const LIST_SCROLL_ID: &str = "deck-list-scroll";

pub fn part_of_speech_value(filter: PartOfSpeechFilter) -> &'static str {
    match filter {
        PartOfSpeechFilter::All => "",
        PartOfSpeechFilter::Only(pos) => pos.as_str(),
    }
}

pub fn part_of_speech_from_value(value: &str) -> PartOfSpeechFilter {
    PartOfSpeech::parse(value).map_or(PartOfSpeechFilter::All, PartOfSpeechFilter::Only)
}

/// Arrow shown next to the active sort column.
pub fn sort_indicator(field: SortField, active: SortField, order: SortOrder) -> &'static str {
    if field != active {
        return "";
    }
    match order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
    }
}

pub fn row_dom_id(id: ItemId) -> String {
    format!("deck-row-{}", id.value())
}

pub fn completeness_label(filled: u8) -> String {
    format!("{filled}/3")
}
