//! Room Service Library
//!
//! Rooms with versioned, year-agnostic availability and price rules, and the
//! engine that answers "can this room be booked for these dates, and for how
//! much". Exposed as a library for the binary and the integration tests.

pub mod auth;
pub mod clients;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use context::RequestContext;
pub use error::{AppError, AppResult};

use clients::{ReservationLedger, UserDirectory};
use database::Database;
use repositories::{
    AvailabilityRepository, InMemoryStore, PgAvailabilityRepository, PgPriceRepository,
    PgRoomRepository, PriceRepository, RoomRepository,
};
use services::{AvailabilityService, BookingService, PricingService, RoomService, SearchService};
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    /// Present when running against Postgres
    pub database: Option<Database>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub price_repo: Arc<dyn PriceRepository>,
    pub rooms: Arc<RoomService>,
    pub availability: Arc<AvailabilityService>,
    pub pricing: Arc<PricingService>,
    pub search: Arc<SearchService>,
    pub booking: Arc<BookingService>,
}

impl AppState {
    /// Wire services over the given repositories and clients
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        availability_repo: Arc<dyn AvailabilityRepository>,
        price_repo: Arc<dyn PriceRepository>,
        users: Arc<dyn UserDirectory>,
        reservations: Arc<dyn ReservationLedger>,
    ) -> Self {
        let rooms = Arc::new(RoomService::new(room_repo.clone(), users.clone()));
        let availability = Arc::new(AvailabilityService::new(
            availability_repo.clone(),
            room_repo.clone(),
            users.clone(),
        ));
        let pricing = Arc::new(PricingService::new(
            price_repo.clone(),
            room_repo.clone(),
            users.clone(),
        ));
        let search = Arc::new(SearchService::new(
            room_repo.clone(),
            availability.clone(),
            pricing.clone(),
        ));
        let booking = Arc::new(BookingService::new(
            room_repo.clone(),
            users,
            reservations,
            availability.clone(),
            pricing.clone(),
        ));

        Self {
            database: None,
            room_repo,
            availability_repo,
            price_repo,
            rooms,
            availability,
            pricing,
            search,
            booking,
        }
    }

    /// State backed by Postgres repositories
    pub fn with_postgres(
        pool: sqlx::PgPool,
        users: Arc<dyn UserDirectory>,
        reservations: Arc<dyn ReservationLedger>,
    ) -> Self {
        let mut state = Self::new(
            Arc::new(PgRoomRepository::new(pool.clone())),
            Arc::new(PgAvailabilityRepository::new(pool.clone())),
            Arc::new(PgPriceRepository::new(pool.clone())),
            users,
            reservations,
        );
        state.database = Some(Database::new(pool));
        state
    }

    /// State backed by a single in-memory store
    pub fn in_memory(users: Arc<dyn UserDirectory>, reservations: Arc<dyn ReservationLedger>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), store, users, reservations)
    }
}
