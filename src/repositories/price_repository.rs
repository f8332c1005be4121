use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use super::{check_reused_item, PriceRepository};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ItemDraft, NewPriceList, PriceItem, PriceRuleList};

#[derive(Debug, FromRow)]
struct ListRow {
    id: i64,
    room_id: i64,
    effective_from: NaiveDateTime,
    base_price: i64,
    per_guest: bool,
}

const LIST_COLUMNS: &str = "id, room_id, effective_from, base_price, per_guest";

/// Postgres-backed price rule lists
pub struct PgPriceRepository {
    pool: PgPool,
}

impl PgPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn assemble(&self, row: ListRow) -> RepositoryResult<PriceRuleList> {
        let items = sqlx::query_as::<_, PriceItem>(
            r#"
            SELECT i.id, i.date_from, i.date_to, i.price
            FROM price_list_items li
            JOIN price_items i ON i.id = li.item_id
            WHERE li.list_id = $1
            ORDER BY li.position
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(PriceRuleList {
            id: row.id,
            room_id: row.room_id,
            effective_from: row.effective_from,
            base_price: row.base_price,
            per_guest: row.per_guest,
            items,
        })
    }
}

#[async_trait]
impl PriceRepository for PgPriceRepository {
    async fn create_list(&self, list: NewPriceList) -> RepositoryResult<PriceRuleList> {
        let mut tx = self.pool.begin().await?;

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
                        sqlx::query_scalar("SELECT room_id FROM price_items WHERE id = $1")
                            .bind(id)
                            .fetch_optional(&mut *tx)
                            .await?;
                    check_reused_item("Price", *id, owner, list.room_id)?;
                    *id
                }
                ItemDraft::New(item) => {
                    sqlx::query_scalar::<_, i64>(
                        r#"
                        INSERT INTO price_items (room_id, date_from, date_to, price)
                        VALUES ($1, $2, $3, $4)
                        RETURNING id
                        "#,
                    )
                    .bind(list.room_id)
                    .bind(item.date_from)
                    .bind(item.date_to)
                    .bind(item.price)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };
            item_ids.push(item_id);
        }

        let sql = format!(
            r#"
            INSERT INTO price_lists (room_id, effective_from, base_price, per_guest)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            LIST_COLUMNS
        );
        let row = sqlx::query_as::<_, ListRow>(&sql)
            .bind(list.room_id)
            .bind(list.effective_from)
            .bind(list.base_price)
            .bind(list.per_guest)
            .fetch_one(&mut *tx)
            .await?;

        for (position, item_id) in item_ids.iter().enumerate() {
            sqlx::query("INSERT INTO price_list_items (list_id, item_id, position) VALUES ($1, $2, $3)")
                .bind(row.id)
                .bind(item_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE rooms SET price_list_id = $1 WHERE id = $2")
            .bind(row.id)
            .bind(list.room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Committed price list {} for room {} with {} items",
            row.id,
            row.room_id,
            item_ids.len()
        );
        self.assemble(row).await
    }

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<PriceRuleList>> {
        let sql = format!("SELECT {} FROM price_lists WHERE id = $1", LIST_COLUMNS);
        let row = sqlx::query_as::<_, ListRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<PriceRuleList>> {
        let sql = format!(
            "SELECT {} FROM price_lists WHERE room_id = $1 ORDER BY effective_from DESC, id DESC",
            LIST_COLUMNS
        );
        let rows = sqlx::query_as::<_, ListRow>(&sql)
            .bind(room_id)
            .fetch_all(&self.pool)
            .await?;

        let mut lists = Vec::with_capacity(rows.len());
        for row in rows {
            lists.push(self.assemble(row).await?);
        }
        Ok(lists)
    }

    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<PriceRuleList>> {
        let sql = format!(
            "SELECT {} FROM price_lists WHERE room_id = $1 ORDER BY effective_from DESC, id DESC LIMIT 1",
            LIST_COLUMNS
        );
        let row = sqlx::query_as::<_, ListRow>(&sql)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }
}
