//! Per-navigation completion
//!
//! A [`Completion`] travels with one navigation from `pushState` into the
//! restore that handles it, so a callback only ever observes its own
//! navigation.

use tokio::sync::oneshot;

use crate::descriptor::Callback;
use crate::error::NavigationError;

/// How a navigation settled
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Fragment fetched and swapped into `container`
    Loaded { url: String, container: String },
    /// Fetch or swap failed; the document was left untouched
    Failed(NavigationError),
    /// A newer navigation started first; the response was discarded
    Superseded,
    /// Only the hash changed; anchor scrolling was re-run
    HashAdjusted,
    /// Location unchanged; nothing to do
    Unchanged,
    /// History API unavailable or URL not pushable; a full page load happened
    Redirected,
}

impl NavigationOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, NavigationOutcome::Loaded { .. })
    }
}

pub struct Completion {
    callback: Option<Callback>,
    sender: oneshot::Sender<NavigationOutcome>,
}

impl Completion {
    pub fn new(callback: Option<Callback>) -> (Self, NavigationHandle) {
        let (sender, receiver) = oneshot::channel();
        (Self { callback, sender }, NavigationHandle { receiver })
    }

    /// Run the callback, then resolve the handle.
    pub fn finish(self, outcome: NavigationOutcome) {
        if let Some(callback) = self.callback {
            callback(&outcome);
        }
        let _ = self.sender.send(outcome);
    }
}

/// Awaitable result of a single navigation
#[derive(Debug)]
pub struct NavigationHandle {
    receiver: oneshot::Receiver<NavigationOutcome>,
}

impl NavigationHandle {
    pub async fn outcome(self) -> NavigationOutcome {
        self.receiver
            .await
            .unwrap_or(NavigationOutcome::Failed(NavigationError::Abandoned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_finish_runs_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let (completion, handle) = Completion::new(Some(Box::new(move |outcome: &NavigationOutcome| {
            assert!(matches!(outcome, NavigationOutcome::HashAdjusted));
            seen.fetch_add(1, Ordering::SeqCst);
        })));

        completion.finish(NavigationOutcome::HashAdjusted);

        assert!(matches!(handle.outcome().await, NavigationOutcome::HashAdjusted));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_completion_is_abandoned() {
        let (completion, handle) = Completion::new(None);
        drop(completion);

        assert!(matches!(
            handle.outcome().await,
            NavigationOutcome::Failed(NavigationError::Abandoned)
        ));
    }
}
