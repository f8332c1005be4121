use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reservation as reported by the reservation ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "RoomID")]
    pub room_id: i64,
    #[serde(rename = "RoomAvailabilityID")]
    pub room_availability_id: i64,
    #[serde(rename = "RoomPriceID")]
    pub room_price_id: i64,
    #[serde(rename = "GuestID")]
    pub guest_id: i64,
    #[serde(rename = "DateFrom")]
    pub date_from: DateTime<Utc>,
    #[serde(rename = "DateTo")]
    pub date_to: DateTime<Utc>,
    #[serde(rename = "GuestCount")]
    pub guest_count: u32,
    #[serde(rename = "Cancelled")]
    pub cancelled: bool,
    #[serde(rename = "Cost")]
    pub cost: i64,
}

/// Body of the ledger's active-reservations request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomIds {
    pub ids: Vec<i64>,
}
