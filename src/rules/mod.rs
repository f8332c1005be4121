//! Pure rule-resolution logic: no I/O, no repositories.

pub mod calendar;
pub mod matcher;
pub mod pagination;
pub mod validation;

pub use calendar::{days_inclusive, is_forward_range, normalize, whole_days_between, YearlessRange};
pub use matcher::{match_availability, match_price};
pub use pagination::{paginate, validate_page};
pub use validation::{validate_availability_items, validate_price_items};
