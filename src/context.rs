use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Per-request data passed explicitly through every service call.
///
/// `request_id` is attached to log lines so a single request can be traced
/// across services, repositories and clients.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub caller_id: Option<i64>,
    pub jwt: Option<String>,
}

impl RequestContext {
    /// Context for a request with no authenticated caller
    pub fn anonymous() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller_id: None,
            jwt: None,
        }
    }

    /// Context for an authenticated caller
    pub fn for_caller(caller_id: i64) -> Self {
        Self {
            caller_id: Some(caller_id),
            ..Self::anonymous()
        }
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// The caller id, or `Unauthenticated` when the request carries none
    pub fn caller(&self) -> AppResult<i64> {
        self.caller_id
            .ok_or_else(|| AppError::Unauthenticated("Missing caller identity".into()))
    }

    /// The bearer token forwarded to other services
    pub fn token(&self) -> AppResult<&str> {
        self.jwt
            .as_deref()
            .ok_or_else(|| AppError::Unauthenticated("Missing bearer token".into()))
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
