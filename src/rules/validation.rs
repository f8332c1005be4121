//! Checks run over a submitted rule list before anything is persisted.
//!
//! Reused items (`existing_id != 0`) are validated on the fields the caller
//! sent, even though those fields are not what ends up stored.

use super::calendar::YearlessRange;
use crate::error::{AppError, AppResult};
use crate::models::{AvailabilityItemRequest, PriceItemRequest};

fn ensure_ordered<T: YearlessRange>(items: &[T]) -> AppResult<()> {
    for (index, item) in items.iter().enumerate() {
        if !item.is_ordered() {
            return Err(AppError::Validation(format!(
                "Item {}: dateFrom is after dateTo",
                index
            )));
        }
    }
    Ok(())
}

/// Availability items must be ordered and no two may share the same
/// normalized (from, to) pair
pub fn validate_availability_items(items: &[AvailabilityItemRequest]) -> AppResult<()> {
    ensure_ordered(items)?;

    for (i, a) in items.iter().enumerate() {
        for (j, b) in items.iter().enumerate().skip(i + 1) {
            if a.normalized_days() == b.normalized_days() {
                return Err(AppError::Validation(format!(
                    "Items {} and {} cover the same date range",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

/// Price items must be ordered, non-negative and pairwise disjoint
pub fn validate_price_items(base_price: i64, items: &[PriceItemRequest]) -> AppResult<()> {
    if base_price < 0 {
        return Err(AppError::Validation("Base price must not be negative".into()));
    }
    if let Some((index, _)) = items.iter().enumerate().find(|(_, item)| item.price < 0) {
        return Err(AppError::Validation(format!(
            "Item {}: price must not be negative",
            index
        )));
    }

    ensure_ordered(items)?;

    for (i, a) in items.iter().enumerate() {
        for (j, b) in items.iter().enumerate().skip(i + 1) {
            if overlaps(a, b) {
                return Err(AppError::Validation(format!(
                    "Items {} and {} have overlapping date ranges",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

/// Inclusive overlap of two ranges by calendar day; sharing a day overlaps
fn overlaps<A: YearlessRange, B: YearlessRange>(a: &A, b: &B) -> bool {
    let (a_from, a_to) = a.normalized_days();
    let (b_from, b_to) = b.normalized_days();
    a_from <= b_to && b_from <= a_to
}
