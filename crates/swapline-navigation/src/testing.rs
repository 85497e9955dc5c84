//! Headless fixture shared by the navigation tests

use serde_json::Value;
use std::sync::Arc;
use url::Url;

use swapline_dom::{MemoryDocument, MemoryWindow, Window};
use swapline_transport::MemoryTransport;

use crate::config::NavigationConfig;
use crate::events::EventBus;
use crate::executor::NavigationExecutor;
use crate::history::HistoryStateManager;
use crate::interceptor::LinkInterceptor;

pub(crate) const PAGE: &str = r##"<!DOCTYPE html>
<html class="js ns-home" data-cssnamespace="ns-home">
  <head><title>Home</title></head>
  <body>
    <div id="body">
      <nav>
        <a id="dashboard" href="/dashboard" data-ajax="app"><span>Dashboard</span></a>
        <a id="profile" href="/profile#comments" data-ajax>Comments</a>
        <a id="settings" href="/settings" data-ajax="modal" data-target="#modal">Settings</a>
        <a id="plain" href="/plain">Plain</a>
      </nav>
      <div id="main"><p>old</p></div>
      <div id="modal"></div>
    </div>
  </body>
</html>"##;

pub(crate) struct Fixture {
    pub document: Arc<MemoryDocument>,
    pub window: Arc<MemoryWindow>,
    pub transport: MemoryTransport,
    pub events: EventBus,
    pub config: Arc<NavigationConfig>,
    pub executor: NavigationExecutor,
}

impl Fixture {
    pub fn at(url: &str) -> Self {
        Self::with_window(MemoryWindow::parse(url).unwrap())
    }

    pub fn with_window(window: MemoryWindow) -> Self {
        let document = Arc::new(MemoryDocument::parse(PAGE));
        let window = Arc::new(window);
        let transport = MemoryTransport::new();
        let events = EventBus::default();
        let config = Arc::new(NavigationConfig::default());

        let executor = NavigationExecutor::new(
            document.clone(),
            window.clone(),
            Arc::new(transport.clone()),
            events.clone(),
            Arc::clone(&config),
        );

        Self {
            document,
            window,
            transport,
            events,
            config,
            executor,
        }
    }

    pub fn history(&self) -> HistoryStateManager {
        HistoryStateManager::new(
            self.document.clone(),
            self.window.clone(),
            self.executor.clone(),
            Arc::clone(&self.config),
        )
    }

    pub fn interceptor(&self) -> LinkInterceptor {
        LinkInterceptor::new(self.history(), Arc::clone(&self.config))
    }

    /// Put the window on a new slot carrying `state`, as a traversal would.
    pub fn enter(&self, path: &str, state: Value) {
        let url: Url = self.window.location().join(path).unwrap();
        self.window.push_state(state, "", &url);
    }
}
