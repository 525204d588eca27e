use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Events emitted after a mutation has been confirmed by the backend.
/// Optimistic writes that get rolled back emit nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProductCreated {
        id: i64,
        timestamp: DateTime<Utc>,
    },
    ProductUpdated {
        id: i64,
        timestamp: DateTime<Utc>,
    },
    ProductDeleted {
        id: i64,
        timestamp: DateTime<Utc>,
    },
    FeaturedToggled {
        id: i64,
        value: bool,
        timestamp: DateTime<Utc>,
    },
    SlideshowToggled {
        id: i64,
        value: bool,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn product_created(id: i64) -> Self {
        Event::ProductCreated {
            id,
            timestamp: Utc::now(),
        }
    }

    pub fn product_updated(id: i64) -> Self {
        Event::ProductUpdated {
            id,
            timestamp: Utc::now(),
        }
    }

    pub fn product_deleted(id: i64) -> Self {
        Event::ProductDeleted {
            id,
            timestamp: Utc::now(),
        }
    }

    pub fn featured_toggled(id: i64, value: bool) -> Self {
        Event::FeaturedToggled {
            id,
            value,
            timestamp: Utc::now(),
        }
    }

    pub fn slideshow_toggled(id: i64, value: bool) -> Self {
        Event::SlideshowToggled {
            id,
            value,
            timestamp: Utc::now(),
        }
    }
}

/// Cloneable sending half of the event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Publish an event. Failure to deliver never fails the mutation that
    /// produced the event; it is logged and dropped.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!(error = %e, "event receiver gone, dropping event");
        }
    }
}

/// Build an event channel with the given buffer capacity.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
