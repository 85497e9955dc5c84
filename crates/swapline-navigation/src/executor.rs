//! Restore handling
//!
//! Every restore, synthetic (right after a push) or a genuine back/forward,
//! lands in [`NavigationExecutor::restore`], which picks one of three
//! branches:
//!
//! ```text
//! restore
//!   ├─ path+search changed ─→ beforePageLoad → fetch → swap → pageLoaded
//!   ├─ same path, has hash ─→ (next task) reassign hash
//!   └─ otherwise ───────────→ nothing
//! ```
//!
//! The previous location is updated on every restore, before any fetch
//! completes.

use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

use swapline_dom::{Document, Window};
use swapline_transport::{FetchError, FragmentRequest, Transport};

use crate::completion::{Completion, NavigationOutcome};
use crate::config::NavigationConfig;
use crate::entry::HistoryEntry;
use crate::error::NavigationError;
use crate::events::{EventBus, LifecycleEvent};
use crate::location;
use crate::session::NavigationSession;
use crate::Result;

/// Branch taken by a restore, with the task that settles it
#[derive(Debug)]
pub enum Restore {
    /// Real navigation; `task` fetches and swaps
    Fetch { seq: u64, task: JoinHandle<()> },
    /// Hash-only adjustment scheduled for the next task turn
    HashAdjust(JoinHandle<()>),
    Unchanged,
}

impl Restore {
    pub fn is_fetch(&self) -> bool {
        matches!(self, Restore::Fetch { .. })
    }

    pub fn is_hash_adjust(&self) -> bool {
        matches!(self, Restore::HashAdjust(_))
    }

    /// Wait until the branch's deferred work has run.
    pub async fn settled(self) {
        match self {
            Restore::Fetch { task, .. } | Restore::HashAdjust(task) => {
                if let Err(e) = task.await {
                    tracing::warn!(error = %e, "Navigation task did not complete");
                }
            }
            Restore::Unchanged => {}
        }
    }
}

pub struct NavigationExecutor {
    document: Arc<dyn Document>,
    window: Arc<dyn Window>,
    transport: Arc<dyn Transport>,
    session: Arc<NavigationSession>,
    events: EventBus,
    config: Arc<NavigationConfig>,
}

impl NavigationExecutor {
    /// The session starts at the window's current location.
    pub fn new(
        document: Arc<dyn Document>,
        window: Arc<dyn Window>,
        transport: Arc<dyn Transport>,
        events: EventBus,
        config: Arc<NavigationConfig>,
    ) -> Self {
        let session = Arc::new(NavigationSession::starting_at(&window.location()));

        Self {
            document,
            window,
            transport,
            session,
            events,
            config,
        }
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Handle a restore of the window's current history slot.
    ///
    /// Must run inside a Tokio runtime: deferred work is spawned onto it.
    /// `completion` is present for restores synthesized by a push and is
    /// settled exactly once with that navigation's outcome.
    pub fn restore(&self, completion: Option<Completion>) -> Restore {
        let entry = HistoryEntry::from_state(self.window.history_state().as_ref(), &self.config);
        let location = self.window.location();
        let current = location::relative(&location);
        let title = self.document.title();
        let previous = self.session.advance(current.clone());

        if location::strip_hash(&previous) != location::strip_hash(&current) {
            let seq = self.session.begin_fetch();
            tracing::info!(
                seq,
                from = %previous,
                to = %current,
                title = %title,
                container = %entry.container,
                "Real navigation"
            );
            return self.fetch_and_swap(seq, entry, location, completion);
        }

        if let Some(hash) = location::hash(&location) {
            tracing::debug!(location = %current, hash, "Hash-only adjustment");
            let window = Arc::clone(&self.window);
            let task = tokio::spawn(async move {
                // Let the host finish its own hash handling first.
                tokio::task::yield_now().await;
                window.reassign_hash();
                if let Some(completion) = completion {
                    completion.finish(NavigationOutcome::HashAdjusted);
                }
            });
            return Restore::HashAdjust(task);
        }

        tracing::trace!(location = %current, "Location unchanged");
        if let Some(completion) = completion {
            completion.finish(NavigationOutcome::Unchanged);
        }
        Restore::Unchanged
    }

    fn fetch_and_swap(
        &self,
        seq: u64,
        entry: HistoryEntry,
        location: Url,
        completion: Option<Completion>,
    ) -> Restore {
        let url = location::path_and_search(&location);
        self.events.emit(LifecycleEvent::BeforePageLoad {
            seq,
            url: url.clone(),
        });

        let request = entry
            .query()
            .into_iter()
            .fold(FragmentRequest::new(location), |request, (key, value)| {
                request.with_param(key, value)
            });
        let fetch = self.transport.fetch(request);

        let executor = self.clone();
        let task = tokio::spawn(async move {
            let result = fetch.await;
            let outcome = executor.settle(seq, &entry, url, result);
            if let Some(completion) = completion {
                completion.finish(outcome);
            }
        });

        Restore::Fetch { seq, task }
    }

    fn settle(
        &self,
        seq: u64,
        entry: &HistoryEntry,
        url: String,
        result: std::result::Result<String, FetchError>,
    ) -> NavigationOutcome {
        if !self.session.is_current(seq) {
            tracing::info!(seq, url = %url, "Discarding superseded response");
            self.events
                .emit(LifecycleEvent::PageLoadSuperseded { seq, url });
            return NavigationOutcome::Superseded;
        }

        let swapped = result
            .map_err(NavigationError::from)
            .and_then(|fragment| self.swap(entry, &fragment));

        match swapped {
            Ok(()) => {
                tracing::info!(seq, url = %url, container = %entry.container, "Page loaded");
                self.events.emit(LifecycleEvent::PageLoaded {
                    seq,
                    url: url.clone(),
                    container: entry.container.clone(),
                    at: chrono::Utc::now(),
                });
                NavigationOutcome::Loaded {
                    url,
                    container: entry.container.clone(),
                }
            }
            Err(err) => {
                tracing::warn!(seq, url = %url, error = %err, "Page load failed");
                self.events.emit(LifecycleEvent::PageLoadFailed {
                    seq,
                    url,
                    reason: err.to_string(),
                });
                NavigationOutcome::Failed(err)
            }
        }
    }

    fn swap(&self, entry: &HistoryEntry, fragment: &str) -> Result<()> {
        self.document.replace_contents(&entry.container, fragment)?;

        if entry.resets_scroll(&self.config) {
            self.document.scroll_to_top();
        }

        self.swap_namespace();

        // Re-run anchor scrolling against the new content.
        if location::hash(&self.window.location()).is_some() {
            self.window.reassign_hash();
        }

        Ok(())
    }

    fn swap_namespace(&self) {
        let namespace = match self
            .document
            .take_element_value(&self.config.namespace_marker_id)
        {
            Ok(Some(namespace)) if !namespace.is_empty() => namespace,
            Ok(_) => return,
            Err(err) => {
                tracing::warn!(error = %err, "Could not read style namespace marker");
                return;
            }
        };

        let key = &self.config.namespace_data_key;
        if let Some(previous) = self.document.root_data(key) {
            self.document.remove_root_class(&previous);
        }
        self.document.add_root_class(&namespace);
        self.document.set_root_data(key, &namespace);

        tracing::debug!(namespace = %namespace, "Swapped style namespace");
    }
}

impl Clone for NavigationExecutor {
    fn clone(&self) -> Self {
        Self {
            document: Arc::clone(&self.document),
            window: Arc::clone(&self.window),
            transport: Arc::clone(&self.transport),
            session: Arc::clone(&self.session),
            events: self.events.clone(),
            config: Arc::clone(&self.config),
        }
    }
}
