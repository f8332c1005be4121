use std::sync::Arc;
use tracing::{info, warn};

use crate::auth;
use crate::clients::UserDirectory;
use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::{NewRoom, NewRoomRequest, Room, UserRole};
use crate::repositories::RoomRepository;

/// Load a room that exists and has not been soft-deleted
pub(crate) async fn live_room(rooms: &dyn RoomRepository, room_id: i64) -> AppResult<Room> {
    match rooms.find_by_id(room_id).await? {
        Some(room) if !room.deleted => Ok(room),
        _ => Err(AppError::NotFound(format!("Room {} not found", room_id))),
    }
}

/// Service for creating, finding and deleting rooms
pub struct RoomService {
    room_repo: Arc<dyn RoomRepository>,
    users: Arc<dyn UserDirectory>,
}

impl RoomService {
    pub fn new(room_repo: Arc<dyn RoomRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { room_repo, users }
    }

    /// Create a room owned by the calling host
    pub async fn create_room(&self, ctx: &RequestContext, request: NewRoomRequest) -> AppResult<Room> {
        let host = auth::authorize(self.users.as_ref(), ctx, UserRole::Host).await?;

        let name = request.name.trim();
        let address = request.address.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Room name is required".into()));
        }
        if address.is_empty() {
            return Err(AppError::Validation("Room address is required".into()));
        }
        if request.min_guests < 1 {
            return Err(AppError::Validation("Minimum guests must be at least 1".into()));
        }
        if request.min_guests > request.max_guests {
            return Err(AppError::Validation(format!(
                "Minimum guests ({}) exceeds maximum guests ({})",
                request.min_guests, request.max_guests
            )));
        }

        let room = self
            .room_repo
            .create(NewRoom {
                host_id: host.id,
                name: name.to_string(),
                description: request.description,
                address: address.to_string(),
                min_guests: request.min_guests,
                max_guests: request.max_guests,
                photos: request.photos,
                commodities: request.commodities,
            })
            .await?;

        info!(request_id = %ctx.request_id, "Created room {} for host {}", room.id, host.id);
        Ok(room)
    }

    pub async fn find_room(&self, ctx: &RequestContext, room_id: i64) -> AppResult<Room> {
        live_room(self.room_repo.as_ref(), room_id).await.map_err(|e| {
            warn!(request_id = %ctx.request_id, "Room lookup failed: {}", e);
            e
        })
    }

    /// Rooms of `host_id`, who must be a host
    pub async fn find_rooms_by_host(&self, ctx: &RequestContext, host_id: i64) -> AppResult<Vec<Room>> {
        let host = self.users.find_by_id(ctx, host_id).await?;
        auth::require_role(&host, UserRole::Host)?;

        Ok(self.room_repo.find_by_host(host.id).await?)
    }

    /// Soft-delete every room of the calling host and return them as stored
    /// afterwards
    pub async fn delete_rooms_by_host(&self, ctx: &RequestContext) -> AppResult<Vec<Room>> {
        let host = auth::authorize(self.users.as_ref(), ctx, UserRole::Host).await?;

        let rooms = self.room_repo.find_by_host(host.id).await?;
        if rooms.is_empty() {
            return Ok(rooms);
        }

        let deleted = self.room_repo.soft_delete_by_host(host.id).await?;
        info!(request_id = %ctx.request_id, "Soft-deleted {} rooms of host {}", deleted, host.id);

        Ok(self.room_repo.find_by_host(host.id).await?)
    }

    pub fn exclude_deleted_rooms(rooms: Vec<Room>) -> Vec<Room> {
        rooms.into_iter().filter(|room| !room.deleted).collect()
    }
}
