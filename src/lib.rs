//! atelier-admin
//!
//! Product administration core for a jewelry storefront: catalog
//! synchronization, draft editing with invariant-preserving sub-editors,
//! single-flight form submission, and optimistic flag mutations.
//!
//! The rendering layer, routing and authentication live elsewhere; the
//! backend is an external JSON-over-HTTP collaborator reached through the
//! [`api::BackendApi`] trait.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod api;
pub mod config;
pub mod draft;
pub mod errors;
pub mod events;
pub mod logging;
pub mod models;
pub mod services;

use std::sync::Arc;

use api::{http::HttpBackendApi, BackendApi, CredentialProvider};
use errors::AdminError;
use events::EventSender;
use services::{CatalogStore, SubmissionPipeline, ToggleMutator};

/// Wired-up admin core: one catalog store and one toggle mutator shared by
/// the whole panel, plus a factory for per-form submission pipelines.
pub struct AdminContext {
    pub config: config::AppConfig,
    pub catalog: Arc<CatalogStore>,
    pub toggles: Arc<ToggleMutator>,
    pub events: EventSender,
    api: Arc<dyn BackendApi>,
}

impl AdminContext {
    pub fn new(
        config: config::AppConfig,
        credentials: Arc<dyn CredentialProvider>,
        events: EventSender,
    ) -> Result<Self, AdminError> {
        let api: Arc<dyn BackendApi> = Arc::new(HttpBackendApi::new(&config.api, credentials)?);
        Ok(Self::with_api(config, api, events))
    }

    /// Wire the context over an arbitrary backend implementation.
    pub fn with_api(
        config: config::AppConfig,
        api: Arc<dyn BackendApi>,
        events: EventSender,
    ) -> Self {
        let catalog = Arc::new(CatalogStore::new(api.clone(), events.clone()));
        let toggles = Arc::new(ToggleMutator::new(
            api.clone(),
            catalog.clone(),
            events.clone(),
        ));
        Self {
            config,
            catalog,
            toggles,
            events,
            api,
        }
    }

    /// New pipeline scoped to one open form. Each form owns its own
    /// single-flight gate and cancellation token.
    pub fn submission_pipeline(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(self.api.clone(), self.catalog.clone(), self.events.clone())
    }

    /// Empty image collection carrying the configured attachment ceiling.
    pub fn new_image_collection(&self) -> draft::images::ImageCollection {
        draft::images::ImageCollection::new().with_max_bytes(self.config.max_image_bytes)
    }
}
