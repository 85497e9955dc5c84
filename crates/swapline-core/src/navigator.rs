//! Page-level navigator
//!
//! One instance per page. Owns the navigation session and exposes the three
//! ways a navigation can start: a programmatic `push_state`, a click on a
//! marked anchor, or the host's back/forward (`popstate`).

use std::sync::Arc;
use tokio::sync::broadcast;

use swapline_dom::{ClickEvent, Document, Window};
use swapline_navigation::{
    EventBus, HistoryStateManager, LifecycleEvent, LinkInterceptor, NavigationDescriptor,
    NavigationExecutor, NavigationHandle, NavigationOutcome, Restore,
};
use swapline_transport::{HttpTransport, Transport};

use crate::config::Config;
use crate::Result;

pub struct Navigator {
    config: Config,
    executor: NavigationExecutor,
    history: HistoryStateManager,
    interceptor: LinkInterceptor,
}

impl Navigator {
    pub fn new(
        config: Config,
        document: Arc<dyn Document>,
        window: Arc<dyn Window>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let navigation = Arc::new(config.navigation.clone());
        let events = EventBus::new(config.event_capacity);

        let executor = NavigationExecutor::new(
            Arc::clone(&document),
            Arc::clone(&window),
            transport,
            events,
            Arc::clone(&navigation),
        );
        let history = HistoryStateManager::new(
            document,
            window,
            executor.clone(),
            Arc::clone(&navigation),
        );
        let interceptor = LinkInterceptor::new(history.clone(), navigation);

        tracing::info!(
            prev_path = %executor.session().prev_path(),
            strategy = history.strategy_name(),
            "Navigator initialized"
        );

        Self {
            config,
            executor,
            history,
            interceptor,
        }
    }

    /// Navigator fetching fragments over HTTP
    pub fn with_http(
        config: Config,
        document: Arc<dyn Document>,
        window: Arc<dyn Window>,
    ) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::new(config, document, window, Arc::new(transport)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Entry points ===
    //
    // Each of these may spawn the navigation's deferred work, so they must be
    // called from within a Tokio runtime.

    /// Programmatic navigation. `None` when the URL is empty.
    ///
    /// # Panics
    ///
    /// Outside a Tokio runtime.
    pub fn push_state(
        &self,
        descriptor: impl Into<NavigationDescriptor>,
    ) -> Option<NavigationHandle> {
        self.history.push_state(descriptor)
    }

    pub fn push_url<F>(&self, url: impl Into<String>, callback: F) -> Option<NavigationHandle>
    where
        F: FnOnce(&NavigationOutcome) + Send + 'static,
    {
        self.history.push_url(url, callback)
    }

    /// Delegated click listener for marked anchors
    ///
    /// # Panics
    ///
    /// Outside a Tokio runtime, when the click starts a navigation.
    pub fn handle_click(&self, event: &mut ClickEvent) -> Option<NavigationHandle> {
        self.interceptor.handle_click(event)
    }

    /// Host back/forward traversal
    ///
    /// # Panics
    ///
    /// Outside a Tokio runtime, unless the location is unchanged.
    pub fn handle_popstate(&self) -> Restore {
        self.executor.restore(None)
    }

    // === Observation ===

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.executor.events().subscribe()
    }

    /// `path + search` of the last settled location
    pub fn prev_path(&self) -> String {
        self.executor.session().prev_path()
    }

    /// Last settled location including its hash
    pub fn prev_location(&self) -> String {
        self.executor.session().prev_location()
    }
}
