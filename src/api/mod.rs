//! Contract with the JSON-over-HTTP backend.
//!
//! The backend is an external collaborator: the core consumes these traits
//! and never implements transport itself beyond the `reqwest` client in
//! [`http`]. Every response is treated uniformly as an application success
//! flag plus optional payload and message, regardless of transport status
//! code.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AdminError;
use crate::models::{Category, FeaturedRef, Product, ProductPayload};

/// Uniform application-level envelope used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Server-supplied message, or a fallback when the backend sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Source of the bearer credential attached to authenticated calls.
///
/// Injected explicitly into the client rather than looked up from ambient
/// session state at call time.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current bearer token, or `None` when no session is established.
    async fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider for tools and tests.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub String);

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The backend surface the admin core depends on.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn fetch_products(&self) -> Result<ApiResponse<Vec<Product>>, AdminError>;

    async fn fetch_featured(&self) -> Result<ApiResponse<Vec<FeaturedRef>>, AdminError>;

    async fn fetch_categories(&self) -> Result<ApiResponse<Vec<Category>>, AdminError>;

    /// Create (`payload.id == 0`) or update a product as one full-document
    /// write. On success the saved product, with its server-assigned id, is
    /// returned in `data`.
    async fn save_product(&self, payload: &ProductPayload)
        -> Result<ApiResponse<Product>, AdminError>;

    async fn delete_product(&self, id: i64) -> Result<ApiResponse<()>, AdminError>;

    async fn toggle_featured(&self, id: i64) -> Result<ApiResponse<()>, AdminError>;

    async fn toggle_slideshow(&self, id: i64, value: bool) -> Result<ApiResponse<()>, AdminError>;
}
