use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ItemDraft;

/// A year-agnostic date range during which a room is (or is not) bookable.
///
/// `available = false` carves a hole into a wider available range; the
/// narrowest covering item decides a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityItem {
    pub id: i64,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub available: bool,
}

/// Immutable, timestamped version of a room's availability rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRuleList {
    pub id: i64,
    pub room_id: i64,
    pub effective_from: NaiveDateTime,
    pub items: Vec<AvailabilityItem>,
}

impl AvailabilityRuleList {
    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// Fields of an availability item row that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAvailabilityItem {
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub available: bool,
}

/// Everything the store needs to commit a new availability list version
#[derive(Debug, Clone)]
pub struct NewAvailabilityList {
    pub room_id: i64,
    pub effective_from: NaiveDateTime,
    pub items: Vec<ItemDraft<NewAvailabilityItem>>,
}
