//! Clients for the services this one depends on.

pub mod reservation_client;
pub mod user_client;

pub use reservation_client::{HttpReservationLedger, ReservationLedger};
pub use user_client::{HttpUserDirectory, UserDirectory};
