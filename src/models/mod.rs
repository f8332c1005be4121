//! Domain models for the room service.
//!
//! Rooms and their versioned availability and price rule lists are stored
//! locally; users and reservations belong to other services and are only
//! decoded here.

pub mod availability;
pub mod draft;
pub mod price;
pub mod requests;
pub mod reservation;
pub mod room;
pub mod user;

// Re-export all models for convenient access
pub use availability::{AvailabilityItem, AvailabilityRuleList, NewAvailabilityItem, NewAvailabilityList};
pub use draft::ItemDraft;
pub use price::{NewPriceItem, NewPriceList, PriceItem, PriceRuleList};
pub use requests::{
    AvailabilityItemRequest, NewRoomRequest, PageInfo, PriceItemRequest, PriceListRequest,
    ReservationQuery, ReservationQuote, RoomSearchHit, RoomsQuery, SearchResult,
};
pub use reservation::{Reservation, RoomIds};
pub use room::{NewRoom, Room};
pub use user::{User, UserRole};
