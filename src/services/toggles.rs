//! Optimistic mutation of the per-product boolean flags.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument, warn};

use crate::api::BackendApi;
use crate::errors::AdminError;
use crate::events::{Event, EventSender};
use crate::services::catalog::CatalogStore;

/// The two independently-persisted boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKind {
    Featured,
    Slideshow,
}

/// Result of a toggle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The optimistic value was confirmed by the backend.
    Applied { value: bool },
    /// A toggle for the same (product, flag) pair was already in flight;
    /// this one was rejected without touching local state.
    Coalesced,
    /// The backend reported failure; the optimistic value was reverted.
    RolledBack,
    /// The product is not present in the catalog.
    UnknownProduct,
}

/// Fire-and-rollback mutator for the featured and slideshow flags.
///
/// The local flag flips before the network call resolves; a failed call
/// reverts it to the pre-flip value, a successful call makes the optimistic
/// value final. At most one request per (product, flag) pair is in flight;
/// concurrent toggles on the same pair are coalesced.
pub struct ToggleMutator {
    api: Arc<dyn BackendApi>,
    catalog: Arc<CatalogStore>,
    events: EventSender,
    in_flight: DashMap<(i64, ToggleKind), ()>,
}

impl ToggleMutator {
    pub fn new(api: Arc<dyn BackendApi>, catalog: Arc<CatalogStore>, events: EventSender) -> Self {
        Self {
            api,
            catalog,
            events,
            in_flight: DashMap::new(),
        }
    }

    /// Flip the featured flag of `id`.
    #[instrument(skip(self))]
    pub async fn toggle_featured(&self, id: i64) -> Result<ToggleOutcome, AdminError> {
        self.toggle(id, ToggleKind::Featured).await
    }

    /// Flip the slideshow-visible flag of `id`.
    #[instrument(skip(self))]
    pub async fn toggle_slideshow(&self, id: i64) -> Result<ToggleOutcome, AdminError> {
        self.toggle(id, ToggleKind::Slideshow).await
    }

    async fn toggle(&self, id: i64, kind: ToggleKind) -> Result<ToggleOutcome, AdminError> {
        let key = (id, kind);
        if self.in_flight.insert(key, ()).is_some() {
            debug!(product_id = id, ?kind, "toggle already in flight, coalesced");
            return Ok(ToggleOutcome::Coalesced);
        }
        let _guard = FlightGuard {
            map: &self.in_flight,
            key,
        };

        // Optimistic write: the flag flips before the request goes out.
        let Some(value) = self.catalog.flip_flag(id, kind).await else {
            return Ok(ToggleOutcome::UnknownProduct);
        };

        let result = match kind {
            ToggleKind::Featured => self.api.toggle_featured(id).await,
            ToggleKind::Slideshow => self.api.toggle_slideshow(id, value).await,
        };

        match result {
            Ok(response) if response.success => {
                let event = match kind {
                    ToggleKind::Featured => Event::featured_toggled(id, value),
                    ToggleKind::Slideshow => Event::slideshow_toggled(id, value),
                };
                self.events.send(event).await;
                Ok(ToggleOutcome::Applied { value })
            }
            Ok(response) => {
                warn!(
                    product_id = id,
                    ?kind,
                    message = response.message.as_deref().unwrap_or(""),
                    "backend rejected toggle, reverting"
                );
                self.catalog.set_flag(id, kind, !value).await;
                Ok(ToggleOutcome::RolledBack)
            }
            Err(err) => {
                // Transport failures revert too; the optimistic value must
                // never outlive a request that did not succeed.
                warn!(product_id = id, ?kind, error = %err, "toggle failed, reverting");
                self.catalog.set_flag(id, kind, !value).await;
                Err(err)
            }
        }
    }
}

/// Removes the in-flight marker on every exit path.
struct FlightGuard<'a> {
    map: &'a DashMap<(i64, ToggleKind), ()>,
    key: (i64, ToggleKind),
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.key);
    }
}
