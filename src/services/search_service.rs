use std::sync::Arc;
use tracing::{debug, info};

use super::{AvailabilityService, PricingService, RoomService};
use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::{RoomSearchHit, RoomsQuery, SearchResult};
use crate::repositories::RoomRepository;
use crate::rules::{self, is_forward_range};

/// Finds bookable rooms for a date range and pages the results
pub struct SearchService {
    room_repo: Arc<dyn RoomRepository>,
    availability: Arc<AvailabilityService>,
    pricing: Arc<PricingService>,
}

impl SearchService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        availability: Arc<AvailabilityService>,
        pricing: Arc<PricingService>,
    ) -> Self {
        Self {
            room_repo,
            availability,
            pricing,
        }
    }

    /// Rooms matching capacity and address that are available on every day
    /// of the range, priced, and sliced to the requested page
    pub async fn find_available_rooms(&self, ctx: &RequestContext, query: RoomsQuery) -> AppResult<SearchResult> {
        rules::validate_page(query.page, query.page_size)?;

        let (from, to) = (query.date_from, query.date_to);
        if !is_forward_range(from, to) {
            return Err(AppError::Validation("dateFrom is after dateTo".into()));
        }

        let address = query.address.trim();
        let candidates = self.room_repo.find_by_filters(query.guests, address).await?;
        let candidates = RoomService::exclude_deleted_rooms(candidates);
        debug!(request_id = %ctx.request_id, "{} candidate rooms for '{}'", candidates.len(), address);

        let mut hits = Vec::new();
        for room in candidates {
            if !self.availability.is_available(ctx, &room, from, to).await? {
                continue;
            }

            let (total, per_guest) = self
                .pricing
                .calculate_price(ctx, &room, from, to, query.guests)
                .await?;
            let unit_price = PricingService::calculate_unit_price(per_guest, query.guests, from, to, total)?;

            hits.push(RoomSearchHit {
                id: room.id,
                name: room.name,
                description: room.description,
                address: room.address,
                photos: room.photos,
                per_guest,
                unit_price,
                total_price: total,
            });
        }

        let (hits, page_info) = rules::paginate(hits, query.page, query.page_size)?;
        info!(
            request_id = %ctx.request_id,
            "Search returned {} of {} hits (page {}/{})",
            hits.len(),
            page_info.total_hits,
            page_info.page,
            page_info.total_pages
        );

        Ok(SearchResult { hits, page_info })
    }
}
