//! Storage seams for rooms and their rule lists.
//!
//! Every repository exists twice: a Postgres implementation for deployment
//! and [`InMemoryStore`] for local runs and tests.

pub mod availability_repository;
pub mod memory;
pub mod price_repository;
pub mod room_repository;

use async_trait::async_trait;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{
    AvailabilityRuleList, NewAvailabilityList, NewPriceList, NewRoom, PriceRuleList, Room,
};

// Re-export all repositories for convenient access
pub use availability_repository::PgAvailabilityRepository;
pub use memory::InMemoryStore;
pub use price_repository::PgPriceRepository;
pub use room_repository::PgRoomRepository;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: NewRoom) -> RepositoryResult<Room>;

    /// Find a room by id, soft-deleted rooms included
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Room>>;

    /// All rooms of a host, soft-deleted rooms included
    async fn find_by_host(&self, host_id: i64) -> RepositoryResult<Vec<Room>>;

    /// Live rooms whose capacity contains `guests` and whose address contains
    /// `address`, ignoring case
    async fn find_by_filters(&self, guests: u32, address: &str) -> RepositoryResult<Vec<Room>>;

    /// Mark every room of a host deleted, returning the number of rooms touched
    async fn soft_delete_by_host(&self, host_id: i64) -> RepositoryResult<u64>;
}

/// Versioned availability rule lists.
///
/// `create_list` commits the new items, the list and the room's current-list
/// pointer as one unit.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create_list(&self, list: NewAvailabilityList) -> RepositoryResult<AvailabilityRuleList>;

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<AvailabilityRuleList>>;

    /// Every list version of a room, newest first
    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<AvailabilityRuleList>>;

    /// The list with the latest `effective_from`, if the room has any
    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<AvailabilityRuleList>>;
}

/// Versioned price rule lists, same contract as [`AvailabilityRepository`]
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn create_list(&self, list: NewPriceList) -> RepositoryResult<PriceRuleList>;

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<PriceRuleList>>;

    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<PriceRuleList>>;

    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<PriceRuleList>>;
}

/// Reused item rows must exist and belong to the room the list is for
pub(crate) fn check_reused_item(
    kind: &str,
    item_id: i64,
    owner_room_id: Option<i64>,
    room_id: i64,
) -> RepositoryResult<()> {
    match owner_room_id {
        None => Err(RepositoryError::NotFound(format!(
            "{} item {} not found",
            kind, item_id
        ))),
        Some(owner) if owner != room_id => Err(RepositoryError::ConstraintViolation(
            format!("{} item {} belongs to room {}, not {}", kind, item_id, owner, room_id),
        )),
        Some(_) => Ok(()),
    }
}
