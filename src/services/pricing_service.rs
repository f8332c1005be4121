use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use super::room_service::live_room;
use crate::auth;
use crate::clients::UserDirectory;
use crate::context::RequestContext;
use crate::error::{option_to_result, AppError, AppResult};
use crate::models::{
    ItemDraft, NewPriceItem, NewPriceList, PriceListRequest, PriceRuleList, Room, UserRole,
};
use crate::repositories::{PriceRepository, RoomRepository};
use crate::rules::{self, days_inclusive, is_forward_range, whole_days_between};

/// Price rule lists: editing, lookup and price calculation
pub struct PricingService {
    price_repo: Arc<dyn PriceRepository>,
    room_repo: Arc<dyn RoomRepository>,
    users: Arc<dyn UserDirectory>,
}

impl PricingService {
    pub fn new(
        price_repo: Arc<dyn PriceRepository>,
        room_repo: Arc<dyn RoomRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            price_repo,
            room_repo,
            users,
        }
    }

    /// Commit a new price list version for a room the caller owns.
    ///
    /// Submitted items may not overlap each other at all.
    pub async fn update_price_list(
        &self,
        ctx: &RequestContext,
        room_id: i64,
        request: PriceListRequest,
    ) -> AppResult<PriceRuleList> {
        let host = auth::authorize(self.users.as_ref(), ctx, UserRole::Host).await?;
        let room = live_room(self.room_repo.as_ref(), room_id).await?;
        auth::require_owner(&host, &room)?;

        rules::validate_price_items(request.base_price, &request.items)?;

        let drafts = request
            .items
            .into_iter()
            .map(|item| {
                ItemDraft::from_request(
                    item.existing_id,
                    NewPriceItem {
                        date_from: item.date_from,
                        date_to: item.date_to,
                        price: item.price,
                    },
                )
            })
            .collect();

        let list = self
            .price_repo
            .create_list(NewPriceList {
                room_id: room.id,
                effective_from: Utc::now().naive_utc(),
                base_price: request.base_price,
                per_guest: request.per_guest,
                items: drafts,
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            "Room {} price list is now {} (base {}, per guest {})",
            room.id,
            list.id,
            list.base_price,
            list.per_guest
        );
        Ok(list)
    }

    /// Total price of `[date_from, date_to]` for `guests` and whether the
    /// list prices per guest. Every real calendar day of the stay is charged
    /// once. Availability is not checked here.
    pub async fn calculate_price(
        &self,
        ctx: &RequestContext,
        room: &Room,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
        guests: u32,
    ) -> AppResult<(i64, bool)> {
        let list = self.price_repo.find_current_for_room(room.id).await?;
        let list = option_to_result(list, &format!("Room {} has no price list", room.id))?;

        if !is_forward_range(date_from, date_to) {
            return Ok((0, list.per_guest));
        }

        let multiplier = if list.per_guest { i64::from(guests) } else { 1 };
        let mut total: i64 = 0;
        for day in days_inclusive(date_from, date_to) {
            let nightly = rules::match_price(day, list.base_price, &list.items);
            total = nightly
                .checked_mul(multiplier)
                .and_then(|cost| total.checked_add(cost))
                .ok_or_else(|| AppError::Validation("Price total overflows".into()))?;
        }

        debug!(request_id = %ctx.request_id, "Room {} costs {} for {} guests", room.id, total, guests);
        Ok((total, list.per_guest))
    }

    /// Price of one night, and of one guest when the list prices per guest
    pub fn calculate_unit_price(
        per_guest: bool,
        guests: u32,
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
        total: i64,
    ) -> AppResult<Decimal> {
        let interval = whole_days_between(date_from, date_to) + 1;
        if interval <= 0 {
            return Err(AppError::Validation("Date range is empty".into()));
        }

        let mut unit = Decimal::from(total) / Decimal::from(interval);
        if per_guest {
            if guests == 0 {
                return Err(AppError::Validation("Guest count must be at least 1".into()));
            }
            unit /= Decimal::from(guests);
        }
        Ok(unit)
    }

    pub async fn find_price_list_by_id(&self, _ctx: &RequestContext, list_id: i64) -> AppResult<PriceRuleList> {
        let list = self.price_repo.find_list_by_id(list_id).await?;
        option_to_result(list, &format!("Price list {} not found", list_id))
    }

    /// All versions of a room's price list, newest first
    pub async fn find_price_lists_by_room(
        &self,
        _ctx: &RequestContext,
        room_id: i64,
    ) -> AppResult<Vec<PriceRuleList>> {
        let room = live_room(self.room_repo.as_ref(), room_id).await?;
        Ok(self.price_repo.find_lists_by_room(room.id).await?)
    }

    pub async fn find_current_price_list(&self, _ctx: &RequestContext, room_id: i64) -> AppResult<PriceRuleList> {
        let list = self.price_repo.find_current_for_room(room_id).await?;
        option_to_result(list, &format!("Room {} has no price list", room_id))
    }
}
