use std::sync::Arc;
use tracing::info;

use super::room_service::live_room;
use super::{AvailabilityService, PricingService};
use crate::auth;
use crate::clients::{ReservationLedger, UserDirectory};
use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::{Reservation, ReservationQuery, ReservationQuote, UserRole};
use crate::repositories::RoomRepository;
use crate::rules::is_forward_range;

/// Booking-facing queries: feasibility quotes for guests and outstanding
/// reservations for hosts
pub struct BookingService {
    room_repo: Arc<dyn RoomRepository>,
    users: Arc<dyn UserDirectory>,
    reservations: Arc<dyn ReservationLedger>,
    availability: Arc<AvailabilityService>,
    pricing: Arc<PricingService>,
}

impl BookingService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        users: Arc<dyn UserDirectory>,
        reservations: Arc<dyn ReservationLedger>,
        availability: Arc<AvailabilityService>,
        pricing: Arc<PricingService>,
    ) -> Self {
        Self {
            room_repo,
            users,
            reservations,
            availability,
            pricing,
        }
    }

    /// Whether a guest can book the room for the range, and at what cost
    pub async fn query_for_reservation(
        &self,
        ctx: &RequestContext,
        query: ReservationQuery,
    ) -> AppResult<ReservationQuote> {
        auth::authorize(self.users.as_ref(), ctx, UserRole::Guest).await?;
        let room = live_room(self.room_repo.as_ref(), query.room_id).await?;

        if query.guest_count == 0 {
            return Err(AppError::Validation("Guest count must be at least 1".into()));
        }
        if !is_forward_range(query.date_from, query.date_to) {
            return Err(AppError::Validation("dateFrom is after dateTo".into()));
        }

        let available = self
            .availability
            .is_available(ctx, &room, query.date_from, query.date_to)
            .await?;
        if !available {
            info!(request_id = %ctx.request_id, "Room {} unavailable for requested range", room.id);
            return Ok(ReservationQuote::unavailable());
        }

        let (total_cost, _) = self
            .pricing
            .calculate_price(ctx, &room, query.date_from, query.date_to, query.guest_count)
            .await?;

        Ok(ReservationQuote {
            available: true,
            total_cost,
        })
    }

    /// Reservations on the calling host's rooms that have not completed yet
    pub async fn active_host_reservations(&self, ctx: &RequestContext) -> AppResult<Vec<Reservation>> {
        let host = auth::authorize(self.users.as_ref(), ctx, UserRole::Host).await?;
        let jwt = ctx.token()?;

        let rooms = self.room_repo.find_by_host(host.id).await?;
        let room_ids: Vec<i64> = rooms.iter().map(|room| room.id).collect();

        self.reservations
            .active_host_reservations(ctx, jwt, &room_ids)
            .await
    }
}
