use learn_core::model::{DeckId, ItemId, ItemPage, ItemQuery, ListItem, PartOfSpeechFilter};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, encode_item, id_to_i64, item_kind, map_item_row, ser};
use crate::repository::{DeckItemRepository, StorageError};

#[async_trait::async_trait]
impl DeckItemRepository for SqliteRepository {
    async fn upsert_item(&self, deck_id: DeckId, item: &ListItem) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO items (id, deck_id, kind, part_of_speech, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id, deck_id) DO UPDATE SET
                -- created_at stays from the original insert
                kind = excluded.kind,
                part_of_speech = excluded.part_of_speech,
                payload = excluded.payload,
                updated_at = excluded.updated_at
            ",
        )
        .bind(id_to_i64("item_id", item.id().value())?)
        .bind(id_to_i64("deck_id", deck_id.value())?)
        .bind(item_kind(item).as_str())
        .bind(item.part_of_speech().map(|pos| pos.as_str()))
        .bind(encode_item(item)?)
        .bind(item.created_at())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_item(&self, deck_id: DeckId, id: ItemId) -> Result<ListItem, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, kind, payload
            FROM items
            WHERE deck_id = ?1 AND id = ?2
            ",
        )
        .bind(id_to_i64("deck_id", deck_id.value())?)
        .bind(id_to_i64("item_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_item_row(&row)
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<ItemPage, StorageError> {
        // Part of speech narrows in SQL; text search runs in Rust so it is
        // case-insensitive beyond ASCII.
        let pos = match query.part_of_speech {
            PartOfSpeechFilter::All => None,
            PartOfSpeechFilter::Only(pos) => Some(pos.as_str()),
        };
        let rows = sqlx::query(
            r"
            SELECT id, kind, payload
            FROM items
            WHERE deck_id = ?1 AND (?2 IS NULL OR part_of_speech = ?2)
            ",
        )
        .bind(id_to_i64("deck_id", query.deck_id.value())?)
        .bind(pos)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let items = rows
            .iter()
            .map(map_item_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(query.select_page(items))
    }

    async fn count_items(&self, deck_id: DeckId) -> Result<u32, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM items WHERE deck_id = ?1")
            .bind(id_to_i64("deck_id", deck_id.value())?)
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        let total: i64 = row.try_get("total").map_err(ser)?;
        u32::try_from(total).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn delete_item(&self, deck_id: DeckId, id: ItemId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM items WHERE deck_id = ?1 AND id = ?2")
            .bind(id_to_i64("deck_id", deck_id.value())?)
            .bind(id_to_i64("item_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
