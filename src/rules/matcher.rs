//! Resolution of the single effective rule for one day.
//!
//! Availability and price deliberately resolve overlaps differently:
//! availability takes the narrowest covering item, price takes the last
//! covering item in list order.

use chrono::NaiveDateTime;

use super::calendar::YearlessRange;
use crate::models::{AvailabilityItem, PriceItem};

/// Availability of the calendar day of `day`, in whatever year it falls.
///
/// The covering item with the shortest span decides; on equal spans the
/// first one in list order wins. A day no item covers is unavailable.
pub fn match_availability(day: NaiveDateTime, items: &[AvailabilityItem]) -> bool {
    let mut best: Option<&AvailabilityItem> = None;

    for item in items.iter().filter(|item| item.covers(day)) {
        match best {
            Some(current) if item.span() >= current.span() => {}
            _ => best = Some(item),
        }
    }

    best.map(|item| item.available).unwrap_or(false)
}

/// Nightly price of `day`: the last covering item, else `base_price`
pub fn match_price(day: NaiveDateTime, base_price: i64, items: &[PriceItem]) -> i64 {
    items
        .iter()
        .filter(|item| item.covers(day))
        .last()
        .map(|item| item.price)
        .unwrap_or(base_price)
}
