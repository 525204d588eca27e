//! `reqwest`-backed implementation of [`BackendApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::api::{ApiResponse, BackendApi, CredentialProvider};
use crate::config::ApiConfig;
use crate::errors::AdminError;
use crate::models::{Category, FeaturedRef, Product, ProductPayload};

pub struct HttpBackendApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpBackendApi {
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdminError::Construction(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, AdminError> {
        let request = match self.credentials.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(classify_transport)?;
        debug!(status = %response.status(), "backend responded");
        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(classify_transport)
    }
}

#[async_trait]
impl BackendApi for HttpBackendApi {
    async fn fetch_products(&self) -> Result<ApiResponse<Vec<Product>>, AdminError> {
        self.execute(self.http.get(self.url("products"))).await
    }

    async fn fetch_featured(&self) -> Result<ApiResponse<Vec<FeaturedRef>>, AdminError> {
        self.execute(self.http.get(self.url("products/featured")))
            .await
    }

    async fn fetch_categories(&self) -> Result<ApiResponse<Vec<Category>>, AdminError> {
        self.execute(self.http.get(self.url("categories"))).await
    }

    async fn save_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<Product>, AdminError> {
        self.execute(self.http.post(self.url("products")).json(payload))
            .await
    }

    async fn delete_product(&self, id: i64) -> Result<ApiResponse<()>, AdminError> {
        self.execute(self.http.delete(self.url(&format!("products/{id}"))))
            .await
    }

    async fn toggle_featured(&self, id: i64) -> Result<ApiResponse<()>, AdminError> {
        self.execute(
            self.http
                .post(self.url(&format!("products/{id}/toggle-featured"))),
        )
        .await
    }

    async fn toggle_slideshow(&self, id: i64, value: bool) -> Result<ApiResponse<()>, AdminError> {
        self.execute(
            self.http
                .post(self.url(&format!("products/{id}/slideshow")))
                .json(&json!({ "value": value })),
        )
        .await
    }
}

/// Three-way failure classification.
///
/// A request that never got built maps to `Construction`; a response body
/// that is not the expected envelope maps to `Application` (the endpoint
/// answered, just not successfully); everything else means the request went
/// out and nothing usable came back, which is `Connectivity`. The original
/// cause of a connectivity failure is logged here and not surfaced to the
/// operator.
fn classify_transport(err: reqwest::Error) -> AdminError {
    if err.is_builder() {
        AdminError::Construction(err.to_string())
    } else if err.is_decode() {
        AdminError::Application(format!("Unexpected response from server: {err}"))
    } else {
        warn!(cause = %err, "no response from the backend");
        AdminError::Connectivity
    }
}
