use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::room_service::live_room;
use crate::auth;
use crate::clients::UserDirectory;
use crate::context::RequestContext;
use crate::error::{option_to_result, AppResult};
use crate::models::{
    AvailabilityItemRequest, AvailabilityRuleList, ItemDraft, NewAvailabilityItem,
    NewAvailabilityList, Room, UserRole,
};
use crate::repositories::{AvailabilityRepository, RoomRepository};
use crate::rules::{self, days_inclusive, is_forward_range};

/// Availability rule lists: editing, lookup and range evaluation
pub struct AvailabilityService {
    availability_repo: Arc<dyn AvailabilityRepository>,
    room_repo: Arc<dyn RoomRepository>,
    users: Arc<dyn UserDirectory>,
}

impl AvailabilityService {
    pub fn new(
        availability_repo: Arc<dyn AvailabilityRepository>,
        room_repo: Arc<dyn RoomRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            availability_repo,
            room_repo,
            users,
        }
    }

    /// Commit a new availability list version for a room the caller owns.
    ///
    /// Items with a non-zero `existing_id` reference the stored row; their
    /// submitted fields are validated but not persisted.
    pub async fn update_availability(
        &self,
        ctx: &RequestContext,
        room_id: i64,
        items: Vec<AvailabilityItemRequest>,
    ) -> AppResult<AvailabilityRuleList> {
        let host = auth::authorize(self.users.as_ref(), ctx, UserRole::Host).await?;
        let room = live_room(self.room_repo.as_ref(), room_id).await?;
        auth::require_owner(&host, &room)?;

        rules::validate_availability_items(&items)?;

        let drafts = items
            .into_iter()
            .map(|item| {
                ItemDraft::from_request(
                    item.existing_id,
                    NewAvailabilityItem {
                        date_from: item.date_from,
                        date_to: item.date_to,
                        available: item.available,
                    },
                )
            })
            .collect();

        let list = self
            .availability_repo
            .create_list(NewAvailabilityList {
                room_id: room.id,
                effective_from: Utc::now().naive_utc(),
                items: drafts,
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            "Room {} availability list is now {} ({} items)",
            room.id,
            list.id,
            list.items.len()
        );
        Ok(list)
    }

    /// Whether every day of `[date_from, date_to]` resolves available
    /// against the room's current list. A room without a list is
    /// unavailable.
    pub async fn is_available(
        &self,
        ctx: &RequestContext,
        room: &Room,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
    ) -> AppResult<bool> {
        if !is_forward_range(date_from, date_to) {
            return Ok(false);
        }

        let list = match self.availability_repo.find_current_for_room(room.id).await? {
            Some(list) => list,
            None => {
                debug!(request_id = %ctx.request_id, "Room {} has no availability list", room.id);
                return Ok(false);
            }
        };

        for day in days_inclusive(date_from, date_to) {
            if !rules::match_availability(day, &list.items) {
                debug!(request_id = %ctx.request_id, "Room {} unavailable on {}", room.id, day);
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub async fn find_availability_list_by_id(
        &self,
        ctx: &RequestContext,
        list_id: i64,
    ) -> AppResult<AvailabilityRuleList> {
        let list = self.availability_repo.find_list_by_id(list_id).await?;
        option_to_result(list, &format!("Availability list {} not found", list_id)).map_err(|e| {
            warn!(request_id = %ctx.request_id, "{}", e);
            e
        })
    }

    /// All versions of a room's availability list, newest first
    pub async fn find_availability_lists_by_room(
        &self,
        _ctx: &RequestContext,
        room_id: i64,
    ) -> AppResult<Vec<AvailabilityRuleList>> {
        let room = live_room(self.room_repo.as_ref(), room_id).await?;
        Ok(self.availability_repo.find_lists_by_room(room.id).await?)
    }

    pub async fn find_current_availability_list(
        &self,
        _ctx: &RequestContext,
        room_id: i64,
    ) -> AppResult<AvailabilityRuleList> {
        let list = self.availability_repo.find_current_for_room(room_id).await?;
        option_to_result(list, &format!("Room {} has no availability list", room_id))
    }
}
