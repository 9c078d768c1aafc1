use learn_core::model::{Deck, DeckId, DeckKind, ItemId, ListItem};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn deck_id_from_i64(v: i64) -> Result<DeckId, StorageError> {
    Ok(DeckId::new(i64_to_u64("deck_id", v)?))
}

pub(crate) fn item_id_from_i64(v: i64) -> Result<ItemId, StorageError> {
    Ok(ItemId::new(i64_to_u64("item_id", v)?))
}

/// Storage value for the `kind` column of an item.
pub(crate) fn item_kind(item: &ListItem) -> DeckKind {
    match item {
        ListItem::Vocabulary(_) => DeckKind::Vocabulary,
        ListItem::Culture(_) => DeckKind::Culture,
    }
}

pub(crate) fn encode_item(item: &ListItem) -> Result<String, StorageError> {
    serde_json::to_string(item).map_err(ser)
}

pub(crate) fn map_deck_row(row: &SqliteRow) -> Result<Deck, StorageError> {
    let kind: String = row.try_get("kind").map_err(ser)?;
    Deck::new(
        deck_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        DeckKind::parse(&kind).map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_item_row(row: &SqliteRow) -> Result<ListItem, StorageError> {
    let id = item_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let kind = DeckKind::parse(&row.try_get::<String, _>("kind").map_err(ser)?).map_err(ser)?;
    let payload: String = row.try_get("payload").map_err(ser)?;
    let item: ListItem = serde_json::from_str(&payload).map_err(ser)?;

    if item.id() != id {
        return Err(StorageError::Serialization(format!(
            "payload id {} does not match row id {id}",
            item.id()
        )));
    }
    if item_kind(&item) != kind {
        return Err(StorageError::Serialization(format!(
            "payload kind does not match row kind {}",
            kind.as_str()
        )));
    }
    Ok(item)
}
