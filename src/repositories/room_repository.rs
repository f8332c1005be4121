use async_trait::async_trait;
use sqlx::PgPool;

use super::RoomRepository;
use crate::error::RepositoryResult;
use crate::models::{NewRoom, Room};

const ROOM_COLUMNS: &str = "id, host_id, name, description, address, min_guests, max_guests, \
     photos, commodities, availability_list_id, price_list_id, deleted, created_at";

/// Postgres-backed room repository
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn create(&self, room: NewRoom) -> RepositoryResult<Room> {
        let sql = format!(
            r#"
            INSERT INTO rooms (host_id, name, description, address, min_guests, max_guests, photos, commodities)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            ROOM_COLUMNS
        );

        let created = sqlx::query_as::<_, Room>(&sql)
            .bind(room.host_id)
            .bind(&room.name)
            .bind(&room.description)
            .bind(&room.address)
            .bind(room.min_guests)
            .bind(room.max_guests)
            .bind(&room.photos)
            .bind(&room.commodities)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Room>> {
        let sql = format!("SELECT {} FROM rooms WHERE id = $1", ROOM_COLUMNS);

        let room = sqlx::query_as::<_, Room>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(room)
    }

    async fn find_by_host(&self, host_id: i64) -> RepositoryResult<Vec<Room>> {
        let sql = format!(
            "SELECT {} FROM rooms WHERE host_id = $1 ORDER BY id",
            ROOM_COLUMNS
        );

        let rooms = sqlx::query_as::<_, Room>(&sql)
            .bind(host_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    async fn find_by_filters(&self, guests: u32, address: &str) -> RepositoryResult<Vec<Room>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM rooms
            WHERE NOT deleted
              AND min_guests <= $1
              AND max_guests >= $1
              AND strpos(lower(address), lower($2)) > 0
            ORDER BY id
            "#,
            ROOM_COLUMNS
        );

        let rooms = sqlx::query_as::<_, Room>(&sql)
            .bind(i64::from(guests))
            .bind(address.trim())
            .fetch_all(&self.pool)
            .await?;

        Ok(rooms)
    }

    async fn soft_delete_by_host(&self, host_id: i64) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE rooms SET deleted = TRUE WHERE host_id = $1 AND NOT deleted")
            .bind(host_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
