pub mod availability_service;
pub mod booking_service;
pub mod pricing_service;
pub mod room_service;
pub mod search_service;

pub use availability_service::AvailabilityService;
pub use booking_service::BookingService;
pub use pricing_service::PricingService;
pub use room_service::RoomService;
pub use search_service::SearchService;
