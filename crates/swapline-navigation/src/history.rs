//! History state management
//!
//! `pushState` is the one public entry point for programmatic navigation.
//! How a navigation is committed depends on the window, decided once when
//! the manager is built:
//! - [`PushHistory`]: push a history slot, then run the same restore path a
//!   back/forward would
//! - [`FullReload`]: no history API: leave the page with a real load

use std::sync::Arc;

use swapline_dom::{Document, Window};

use crate::completion::{Completion, NavigationHandle, NavigationOutcome};
use crate::config::NavigationConfig;
use crate::descriptor::NavigationDescriptor;
use crate::executor::NavigationExecutor;
use crate::location;

/// Commits a navigation request
pub trait CommitStrategy: Send + Sync {
    fn commit(&self, descriptor: NavigationDescriptor, completion: Completion);

    fn name(&self) -> &'static str;
}

/// Real page load, for windows without `pushState`
pub struct FullReload {
    window: Arc<dyn Window>,
}

impl FullReload {
    pub fn new(window: Arc<dyn Window>) -> Self {
        Self { window }
    }
}

impl CommitStrategy for FullReload {
    fn commit(&self, descriptor: NavigationDescriptor, completion: Completion) {
        tracing::info!(url = %descriptor.url, "Loading page without history push");
        self.window.assign(&descriptor.url);
        completion.finish(NavigationOutcome::Redirected);
    }

    fn name(&self) -> &'static str {
        "full-reload"
    }
}

/// History push followed by a synthetic restore
pub struct PushHistory {
    document: Arc<dyn Document>,
    window: Arc<dyn Window>,
    executor: NavigationExecutor,
    config: Arc<NavigationConfig>,
    fallback: FullReload,
}

impl PushHistory {
    pub fn new(
        document: Arc<dyn Document>,
        window: Arc<dyn Window>,
        executor: NavigationExecutor,
        config: Arc<NavigationConfig>,
    ) -> Self {
        let fallback = FullReload::new(Arc::clone(&window));
        Self {
            document,
            window,
            executor,
            config,
            fallback,
        }
    }
}

impl CommitStrategy for PushHistory {
    fn commit(&self, descriptor: NavigationDescriptor, completion: Completion) {
        let current = self.window.location();

        // Slots can only be pushed for same-origin URLs.
        let target = match current.join(&descriptor.url) {
            Ok(target) if location::same_origin(&current, &target) => target,
            Ok(target) => {
                tracing::debug!(url = %target, "Cross-origin navigation");
                return self.fallback.commit(descriptor, completion);
            }
            Err(e) => {
                tracing::warn!(url = %descriptor.url, error = %e, "Unresolvable navigation URL");
                return self.fallback.commit(descriptor, completion);
            }
        };

        let entry = descriptor.to_entry(&self.config);
        let state = match entry.to_state() {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(url = %target, error = %err, "Could not serialize history state");
                return completion.finish(NavigationOutcome::Failed(err));
            }
        };
        let title = descriptor
            .title
            .clone()
            .unwrap_or_else(|| self.document.title());

        tracing::debug!(
            url = %target,
            container = %entry.container,
            layout = ?entry.layout,
            "Pushing history entry"
        );
        self.window.push_state(state, &title, &target);
        self.executor.restore(Some(completion));
    }

    fn name(&self) -> &'static str {
        "push-history"
    }
}

/// `pushState` front end over the selected [`CommitStrategy`]
pub struct HistoryStateManager {
    strategy: Arc<dyn CommitStrategy>,
}

impl HistoryStateManager {
    /// Select the commit strategy from the window's capabilities.
    pub fn new(
        document: Arc<dyn Document>,
        window: Arc<dyn Window>,
        executor: NavigationExecutor,
        config: Arc<NavigationConfig>,
    ) -> Self {
        let strategy: Arc<dyn CommitStrategy> = if window.supports_push_state() {
            Arc::new(PushHistory::new(document, window, executor, config))
        } else {
            Arc::new(FullReload::new(window))
        };

        tracing::info!(strategy = strategy.name(), "History commit strategy selected");
        Self::with_strategy(strategy)
    }

    pub fn with_strategy(strategy: Arc<dyn CommitStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Navigate to `descriptor`.
    ///
    /// Returns `None` without side effects when the URL is empty. Otherwise
    /// exactly one of a history push or a real page load happens, and the
    /// returned handle resolves with this navigation's outcome.
    pub fn push_state(
        &self,
        descriptor: impl Into<NavigationDescriptor>,
    ) -> Option<NavigationHandle> {
        let mut descriptor = descriptor.into();
        if descriptor.url.is_empty() {
            tracing::debug!("Ignoring navigation without URL");
            return None;
        }

        let (completion, handle) = Completion::new(descriptor.callback.take());
        self.strategy.commit(descriptor, completion);
        Some(handle)
    }

    /// Bare-URL form of [`push_state`](Self::push_state) with a callback
    pub fn push_url<F>(&self, url: impl Into<String>, callback: F) -> Option<NavigationHandle>
    where
        F: FnOnce(&NavigationOutcome) + Send + 'static,
    {
        self.push_state(NavigationDescriptor::new(url).on_complete(callback))
    }
}

impl Clone for HistoryStateManager {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}
