use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ItemDraft;

/// A year-agnostic date range with a nightly price in minor currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub id: i64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub price: i64,
}

/// Immutable, timestamped version of a room's price rules.
///
/// Days not covered by any item cost `base_price`. With `per_guest` set,
/// every nightly price is multiplied by the guest count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRuleList {
    pub id: i64,
    pub room_id: i64,
    pub effective_from: NaiveDateTime,
    pub base_price: i64,
    pub per_guest: bool,
    pub items: Vec<PriceItem>,
}

impl PriceRuleList {
    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// Fields of a price item row that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceItem {
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub price: i64,
}

/// Everything the store needs to commit a new price list version
#[derive(Debug, Clone)]
pub struct NewPriceList {
    pub room_id: i64,
    pub effective_from: NaiveDateTime,
    pub base_price: i64,
    pub per_guest: bool,
    pub items: Vec<ItemDraft<NewPriceItem>>,
}
