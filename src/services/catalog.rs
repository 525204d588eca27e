//! Canonical in-memory view of the product list used by the admin panel.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::api::BackendApi;
use crate::errors::AdminError;
use crate::events::{Event, EventSender};
use crate::models::{Category, Product};
use crate::services::toggles::ToggleKind;

/// Store exclusively owning the loaded product collection and the cached
/// category list. All mutation goes through the operations below; each one
/// is a single lock-scoped replace of the underlying collection. Consumers
/// receive cloned snapshots.
pub struct CatalogStore {
    api: Arc<dyn BackendApi>,
    events: EventSender,
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn BackendApi>, events: EventSender) -> Self {
        Self {
            api,
            events,
            products: RwLock::new(Vec::new()),
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full product set and the featured subset, normalize, merge
    /// and order. Either fetch reporting application-level failure aborts
    /// the load and leaves the previous collection untouched.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), AdminError> {
        let products = self.api.fetch_products().await?;
        if !products.success {
            return Err(AdminError::Load(
                products.message_or("Product list fetch was not successful"),
            ));
        }
        let featured = self.api.fetch_featured().await?;
        if !featured.success {
            return Err(AdminError::Load(
                featured.message_or("Featured list fetch was not successful"),
            ));
        }

        let featured_ids: HashSet<i64> = featured
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.id)
            .collect();

        let mut list = products.data.unwrap_or_default();
        for product in &mut list {
            product.is_featured = featured_ids.contains(&product.id);
        }
        // Newest first.
        list.sort_by(|a, b| b.id.cmp(&a.id));

        info!(count = list.len(), featured = featured_ids.len(), "catalog loaded");
        *self.products.write().await = list;
        Ok(())
    }

    /// Fetch and cache the category list used for draft validation.
    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<(), AdminError> {
        let response = self.api.fetch_categories().await?;
        if !response.success {
            return Err(AdminError::Load(
                response.message_or("Category fetch was not successful"),
            ));
        }
        *self.categories.write().await = response.data.unwrap_or_default();
        Ok(())
    }

    /// Snapshot of the current product list, newest first.
    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<Product> {
        self.products.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Delete through the backend, then remove locally. The in-memory entry
    /// goes away only after server confirmation.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AdminError> {
        let response = self.api.delete_product(id).await?;
        if !response.success {
            return Err(AdminError::Application(
                response.message_or("The product could not be deleted"),
            ));
        }
        self.apply_delete(id).await;
        self.events.send(Event::product_deleted(id)).await;
        info!(product_id = id, "product deleted");
        Ok(())
    }

    /// Remove the matching entry from the in-memory collection.
    pub async fn apply_delete(&self, id: i64) {
        self.products.write().await.retain(|p| p.id != id);
    }

    /// Replace the entry with a matching id, or prepend when new (the list
    /// stays ordered newest first and a fresh id is always the highest).
    pub async fn apply_upsert(&self, product: Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.insert(0, product),
        }
    }

    /// Set a boolean flag on the matching product, returning the previous
    /// value. `None` when the product is not loaded.
    pub(crate) async fn set_flag(&self, id: i64, kind: ToggleKind, value: bool) -> Option<bool> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == id)?;
        let slot = match kind {
            ToggleKind::Featured => &mut product.is_featured,
            ToggleKind::Slideshow => &mut product.is_slideshow_visible,
        };
        let previous = *slot;
        *slot = value;
        Some(previous)
    }

    /// Invert a boolean flag, returning the new value.
    pub(crate) async fn flip_flag(&self, id: i64, kind: ToggleKind) -> Option<bool> {
        let previous = {
            let products = self.products.read().await;
            let product = products.iter().find(|p| p.id == id)?;
            match kind {
                ToggleKind::Featured => product.is_featured,
                ToggleKind::Slideshow => product.is_slideshow_visible,
            }
        };
        self.set_flag(id, kind, !previous).await;
        Some(!previous)
    }
}
