use async_trait::async_trait;
use serde_json::Value as JsonValue;
use crate::contract::lib::{Error, Result};

pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;

/// Raw reply of the API server. Non-success statuses are data here, callers
/// decide what they mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == STATUS_NOT_FOUND
    }

    pub fn is_conflict(&self) -> bool {
        self.status == STATUS_CONFLICT
    }

    /// Decodes the body as JSON. An empty body decodes to `null`.
    pub fn json(&self) -> Result<JsonValue> {
        if self.body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&self.body).map_err(Error::JsonSerializationError)
    }
}

/// Authenticated access to a Kubernetes-style API server. Paths are absolute
/// REST paths such as `/api/v1/namespaces`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IApiTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<ApiResponse>;
    async fn post(&self, path: &str, body: &JsonValue) -> Result<ApiResponse>;
    async fn delete(&self, path: &str) -> Result<ApiResponse>;
}
