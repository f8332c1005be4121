use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Submitted availability rule. `existing_id = 0` creates a new item row,
/// anything else references an existing row of the same room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityItemRequest {
    #[serde(default)]
    pub existing_id: i64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub available: bool,
}

/// Submitted price rule, same reuse semantics as [`AvailabilityItemRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItemRequest {
    #[serde(default)]
    pub existing_id: i64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListRequest {
    pub base_price: i64,
    pub per_guest: bool,
    #[serde(default)]
    pub items: Vec<PriceItemRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub min_guests: i32,
    pub max_guests: i32,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub commodities: Vec<String>,
}

/// Room search query; `page` is 1-based
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsQuery {
    #[serde(default)]
    pub address: String,
    pub guests: u32,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub page: u32,
    pub page_size: u32,
}

/// One available room in a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSearchHit {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub photos: Vec<String>,
    pub per_guest: bool,
    pub unit_price: Decimal,
    pub total_price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_hits: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub hits: Vec<RoomSearchHit>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQuery {
    pub room_id: i64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub guest_count: u32,
}

/// Answer to a reservation-feasibility query. Cost is zero when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQuote {
    pub available: bool,
    pub total_cost: i64,
}

impl ReservationQuote {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            total_cost: 0,
        }
    }
}
