use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Room model representing a bookable room owned by a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub host_id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub min_guests: i32,
    pub max_guests: i32,
    pub photos: Vec<String>,
    pub commodities: Vec<String>,
    /// Latest availability list, `None` until one has been committed
    pub availability_list_id: Option<i64>,
    /// Latest price list, `None` until one has been committed
    pub price_list_id: Option<i64>,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
}

impl Room {
    /// Whether `guests` falls inside the room's capacity range
    pub fn fits_guests(&self, guests: u32) -> bool {
        let guests = i64::from(guests);
        i64::from(self.min_guests) <= guests && guests <= i64::from(self.max_guests)
    }

    /// Case-insensitive substring match on the address
    pub fn address_contains(&self, needle: &str) -> bool {
        self.address
            .to_lowercase()
            .contains(&needle.trim().to_lowercase())
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.host_id == user_id
    }
}

/// Fields required to insert a room
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub host_id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub min_guests: i32,
    pub max_guests: i32,
    pub photos: Vec<String>,
    pub commodities: Vec<String>,
}
