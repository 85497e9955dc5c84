//! Lifecycle events
//!
//! Page-level scripts observe navigations through these events, e.g. to
//! pause expensive work on `beforePageLoad` and re-initialize widgets on
//! `pageLoaded`. Every real navigation emits `beforePageLoad` followed by
//! exactly one of the other three, all sharing its sequence number.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LifecycleEvent {
    /// A real navigation is about to fetch
    BeforePageLoad { seq: u64, url: String },
    /// The fragment was swapped in
    PageLoaded {
        seq: u64,
        url: String,
        container: String,
        at: DateTime<Utc>,
    },
    /// Fetch or swap failed; the document is untouched
    PageLoadFailed { seq: u64, url: String, reason: String },
    /// A newer navigation started before this one's response arrived
    PageLoadSuperseded { seq: u64, url: String },
}

impl LifecycleEvent {
    pub fn seq(&self) -> u64 {
        match self {
            LifecycleEvent::BeforePageLoad { seq, .. }
            | LifecycleEvent::PageLoaded { seq, .. }
            | LifecycleEvent::PageLoadFailed { seq, .. }
            | LifecycleEvent::PageLoadSuperseded { seq, .. } => *seq,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::BeforePageLoad { .. } => "beforePageLoad",
            LifecycleEvent::PageLoaded { .. } => "pageLoaded",
            LifecycleEvent::PageLoadFailed { .. } => "pageLoadFailed",
            LifecycleEvent::PageLoadSuperseded { .. } => "pageLoadSuperseded",
        }
    }
}

/// Process-wide broadcast of [`LifecycleEvent`]s
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: LifecycleEvent) {
        tracing::trace!(event = event.name(), seq = event.seq(), "Lifecycle event");
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
