//! Year-agnostic calendar arithmetic.
//!
//! Rules recur every year, so rule ranges and the days being checked are
//! moved onto year 0 before they are compared. Year 0 of the proleptic
//! Gregorian calendar is a leap year, so every valid month/day (Feb 29
//! included) maps onto itself. Stays are still walked over real calendar
//! days; only the comparison is year-agnostic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::{
    AvailabilityItem, AvailabilityItemRequest, PriceItem, PriceItemRequest,
};

/// Year every timestamp is mapped onto
pub const NORMALIZED_YEAR: i32 = 0;

/// Strip the year from `t`, keeping month, day and time-of-day
pub fn normalize(t: NaiveDateTime) -> NaiveDateTime {
    // Cannot fail: the target year has a Feb 29.
    t.with_year(NORMALIZED_YEAR).unwrap_or(t)
}

/// Every day of the inclusive range `[from, to]`, stepping by 24 hours.
/// Empty when `from > to`.
pub fn days_inclusive(from: NaiveDateTime, to: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
    std::iter::successors(Some(from), |day| day.checked_add_signed(Duration::days(1)))
        .take_while(move |day| *day <= to)
}

/// Number of whole 24 hour periods between `from` and `to`
pub fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Whether `[from, to]` runs forward both in real time and once the year is
/// dropped. Ranges wrapping New Year fail the second check.
pub fn is_forward_range(from: NaiveDateTime, to: NaiveDateTime) -> bool {
    from <= to && normalize(from) <= normalize(to)
}

/// A date range compared by month and day only
pub trait YearlessRange {
    fn range_start(&self) -> NaiveDateTime;
    fn range_end(&self) -> NaiveDateTime;

    /// First and last calendar day of the range, on year 0
    fn normalized_days(&self) -> (NaiveDate, NaiveDate) {
        (
            normalize(self.range_start()).date(),
            normalize(self.range_end()).date(),
        )
    }

    /// Whether the calendar day of `day`, in any year, falls inside the
    /// inclusive range. Time of day plays no part.
    fn covers(&self, day: NaiveDateTime) -> bool {
        let (from, to) = self.normalized_days();
        let day = normalize(day).date();
        from <= day && day <= to
    }

    fn span(&self) -> Duration {
        let (from, to) = self.normalized_days();
        to.signed_duration_since(from)
    }

    fn is_ordered(&self) -> bool {
        let (from, to) = self.normalized_days();
        from <= to
    }
}

macro_rules! impl_yearless_range {
    ($($ty:ty),+) => {
        $(
            impl YearlessRange for $ty {
                fn range_start(&self) -> NaiveDateTime {
                    self.date_from
                }

                fn range_end(&self) -> NaiveDateTime {
                    self.date_to
                }
            }
        )+
    };
}

impl_yearless_range!(AvailabilityItem, PriceItem, AvailabilityItemRequest, PriceItemRequest);
