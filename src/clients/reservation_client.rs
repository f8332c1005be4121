use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::{Reservation, RoomIds};

/// Read-only view of the reservation service
#[async_trait]
pub trait ReservationLedger: Send + Sync {
    /// Reservations on `room_ids` that have not completed yet
    async fn active_host_reservations(
        &self,
        ctx: &RequestContext,
        jwt: &str,
        room_ids: &[i64],
    ) -> AppResult<Vec<Reservation>>;
}

/// HTTP client for the reservation service
pub struct HttpReservationLedger {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReservationLedger {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ReservationLedger for HttpReservationLedger {
    async fn active_host_reservations(
        &self,
        ctx: &RequestContext,
        jwt: &str,
        room_ids: &[i64],
    ) -> AppResult<Vec<Reservation>> {
        info!(request_id = %ctx.request_id, "Fetching active reservations for {} rooms", room_ids.len());

        let body = RoomIds {
            ids: room_ids.to_vec(),
        };

        // The reservation service reads the room ids from a GET body.
        let response = self
            .client
            .get(format!("{}/reservations/host/active", self.base_url))
            .bearer_auth(jwt)
            .header("X-Request-Id", ctx.request_id.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %ctx.request_id, "Reservation service unreachable: {}", e);
                AppError::ExternalService(format!("Reservation service request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(request_id = %ctx.request_id, "Reservation service returned {}", status);
            return Err(AppError::ExternalService(format!(
                "Reservation service returned {}",
                status
            )));
        }

        response
            .json::<Vec<Reservation>>()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid reservation payload: {}", e)))
    }
}
