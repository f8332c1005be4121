use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Identity lookup backed by the user service
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by id. `NotFound` when the directory does not know the id,
    /// `ExternalService` for any other failure.
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<User>;
}

/// HTTP client for the user service
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
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
impl UserDirectory for HttpUserDirectory {
    async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> AppResult<User> {
        debug!(request_id = %ctx.request_id, "Looking up user {}", id);

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, id))
            .header("X-Request-Id", ctx.request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %ctx.request_id, "User service unreachable: {}", e);
                AppError::ExternalService(format!("User service request failed: {}", e))
            })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("User {} not found", id)));
            }
            status => {
                warn!(request_id = %ctx.request_id, "User service returned {} for user {}", status, id);
                return Err(AppError::ExternalService(format!(
                    "User service returned {} for user {}",
                    status, id
                )));
            }
        }

        response.json::<User>().await.map_err(|e| {
            AppError::ExternalService(format!("Invalid user payload for {}: {}", id, e))
        })
    }
}
