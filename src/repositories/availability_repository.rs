use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::{check_reused_item, AvailabilityRepository};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{AvailabilityItem, AvailabilityRuleList, ItemDraft, NewAvailabilityList};

#[derive(Debug, FromRow)]
struct ListRow {
    id: i64,
    room_id: i64,
    effective_from: NaiveDateTime,
}

/// Postgres-backed availability rule lists
pub struct PgAvailabilityRepository {
    pool: PgPool,
}

impl PgAvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, list_id: i64) -> RepositoryResult<Vec<AvailabilityItem>> {
        let items = sqlx::query_as::<_, AvailabilityItem>(
            r#"
            SELECT i.id, i.date_from, i.date_to, i.available
            FROM availability_list_items li
            JOIN availability_items i ON i.id = li.item_id
            WHERE li.list_id = $1
            ORDER BY li.position
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn assemble(&self, row: ListRow) -> RepositoryResult<AvailabilityRuleList> {
        let items = self.load_items(row.id).await?;
        Ok(AvailabilityRuleList {
            id: row.id,
            room_id: row.room_id,
            effective_from: row.effective_from,
            items,
        })
    }
}

#[async_trait]
impl AvailabilityRepository for PgAvailabilityRepository {
    async fn create_list(&self, list: NewAvailabilityList) -> RepositoryResult<AvailabilityRuleList> {
        let mut tx = self.pool.begin().await?;

        // Lock the room so concurrent commits for it serialize on the pointer
        let room: Option<i64> = sqlx::query_scalar("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(list.room_id)
            .fetch_optional(&mut *tx)
            .await?;
        if room.is_none() {
            return Err(RepositoryError::NotFound(format!("Room {} not found", list.room_id)));
        }

        let mut item_ids = Vec::with_capacity(list.items.len());
        for draft in &list.items {
            let item_id = match draft {
                ItemDraft::Existing(id) => {
                    let owner: Option<i64> =
                        sqlx::query_scalar("SELECT room_id FROM availability_items WHERE id = $1")
                            .bind(id)
                            .fetch_optional(&mut *tx)
                            .await?;
                    check_reused_item("Availability", *id, owner, list.room_id)?;
                    *id
                }
                ItemDraft::New(item) => {
                    sqlx::query_scalar::<_, i64>(
                        r#"
                        INSERT INTO availability_items (room_id, date_from, date_to, available)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(list.room_id)
                    .bind(item.date_from)
                    .bind(item.date_to)
                    .bind(item.available)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };
            item_ids.push(item_id);
        }

        let row = sqlx::query_as::<_, ListRow>(
            r#"
            INSERT INTO availability_lists (room_id, effective_from)
            VALUES ($1, $2)
            RETURNING id, room_id, effective_from
            "#,
        )
        .bind(list.room_id)
        .bind(list.effective_from)
        .fetch_one(&mut *tx)
        .await?;

        for (position, item_id) in item_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO availability_list_items (list_id, item_id, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(item_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE rooms SET availability_list_id = $1 WHERE id = $2")
            .bind(row.id)
            .bind(list.room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Committed availability list {} for room {} with {} items",
            row.id,
            row.room_id,
            item_ids.len()
        );
        self.assemble(row).await
    }

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<AvailabilityRuleList>> {
        let row = sqlx::query_as::<_, ListRow>(
            "SELECT id, room_id, effective_from FROM availability_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<AvailabilityRuleList>> {
        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, room_id, effective_from
            FROM availability_lists
            WHERE room_id = $1
            ORDER BY effective_from DESC, id DESC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        let mut lists = Vec::with_capacity(rows.len());
        for row in rows {
            lists.push(self.assemble(row).await?);
        }
        Ok(lists)
    }

    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<AvailabilityRuleList>> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT id, room_id, effective_from
            FROM availability_lists
            WHERE room_id = $1
            ORDER BY effective_from DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }
}
