//! Single-flight guarded submission of a validated draft.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::api::BackendApi;
use crate::draft::ProductDraft;
use crate::errors::AdminError;
use crate::events::{Event, EventSender};
use crate::models::Product;
use crate::services::catalog::CatalogStore;

/// Observable submission state. Terminal states are transient: after
/// `Succeeded` or `Failed` the pipeline always settles back to `Idle`,
/// releasing the single-flight guard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// What a `submit` call amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the write; the catalog has been updated.
    Saved(Product),
    /// Another submission was already in flight; this trigger was dropped.
    Dropped,
    /// The owning form was torn down while the request was in flight.
    Cancelled,
}

/// Turns a validated draft into exactly one network mutation per trigger
/// window and projects the outcome back into observable state.
///
/// One pipeline instance belongs to one open form. The `Idle/Submitting`
/// gate guarantees at most one in-flight submission per instance; redundant
/// concurrent triggers are dropped silently. No ordering is guaranteed
/// across different forms or against toggles on the same product.
pub struct SubmissionPipeline {
    api: Arc<dyn BackendApi>,
    catalog: Arc<CatalogStore>,
    events: EventSender,
    state: watch::Sender<SubmitState>,
    last_error: std::sync::Mutex<Option<String>>,
    cancel: CancellationToken,
}

impl SubmissionPipeline {
    pub fn new(api: Arc<dyn BackendApi>, catalog: Arc<CatalogStore>, events: EventSender) -> Self {
        let (state, _) = watch::channel(SubmitState::Idle);
        Self {
            api,
            catalog,
            events,
            state,
            last_error: std::sync::Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SubmitState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    /// Message of the last failed submission, cleared on the next attempt.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Token scoping in-flight submissions to the owning form. Cancel it on
    /// teardown to abandon the request and settle back to `Idle`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Submit the draft. Expects validation to have passed already; numeric
    /// coercion here is a formality, not a gate.
    ///
    /// On success the saved product is upserted into the catalog. On
    /// failure the error surfaces as a single message and the draft remains
    /// untouched for retry.
    #[instrument(skip(self, draft), fields(product_id = draft.id))]
    pub async fn submit(&self, draft: &ProductDraft) -> Result<SubmitOutcome, AdminError> {
        if !self.try_enter() {
            debug!("submission already in flight, trigger dropped");
            return Ok(SubmitOutcome::Dropped);
        }
        self.set_last_error(None);

        let payload = draft.to_payload();
        let creating = payload.id == 0;

        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                debug!("owning form torn down, submission abandoned");
                self.state.send_replace(SubmitState::Idle);
                return Ok(SubmitOutcome::Cancelled);
            }
            result = self.api.save_product(&payload) => result,
        };

        match result {
            Ok(response) if response.success => {
                let product = response.data.ok_or_else(|| {
                    let message = "Server confirmed the save but returned no product".to_string();
                    self.fail(message.clone());
                    AdminError::Application(message)
                })?;
                self.catalog.apply_upsert(product.clone()).await;
                let event = if creating {
                    Event::product_created(product.id)
                } else {
                    Event::product_updated(product.id)
                };
                self.events.send(event).await;
                info!(product_id = product.id, creating, "product saved");
                self.settle(SubmitState::Succeeded);
                Ok(SubmitOutcome::Saved(product))
            }
            Ok(response) => {
                // Application-level failure inside a successful transport
                // call; the server message is surfaced verbatim.
                let message = response.message_or("The product could not be saved");
                error!(message = %message, "backend rejected the save");
                self.fail(message.clone());
                Err(AdminError::Application(message))
            }
            Err(err) => {
                error!(error = %err, "submission failed");
                self.fail(err.user_message());
                Err(err)
            }
        }
    }

    /// Atomically enter `Submitting` unless a submission is already in
    /// flight.
    fn try_enter(&self) -> bool {
        let mut entered = false;
        self.state.send_if_modified(|state| {
            if *state == SubmitState::Submitting {
                return false;
            }
            *state = SubmitState::Submitting;
            entered = true;
            true
        });
        entered
    }

    fn fail(&self, message: String) {
        self.set_last_error(Some(message.clone()));
        self.settle(SubmitState::Failed(message));
    }

    /// Pass through a terminal state, then settle back to `Idle` and
    /// release the guard. Runs unconditionally on every completion path.
    fn settle(&self, terminal: SubmitState) {
        self.state.send_replace(terminal);
        self.state.send_replace(SubmitState::Idle);
    }

    fn set_last_error(&self, message: Option<String>) {
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = message;
    }
}
