//! Window surface: location, session history and real page loads

use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

use crate::error::DomError;
use crate::Result;

pub trait Window: Send + Sync {
    /// Absolute URL currently shown in the address bar
    fn location(&self) -> Url;

    /// State object attached to the current session-history slot
    fn history_state(&self) -> Option<Value>;

    /// Whether programmatic history entries can be pushed
    fn supports_push_state(&self) -> bool;

    /// Push a new session-history slot without loading anything.
    fn push_state(&self, state: Value, title: &str, url: &Url);

    /// Assign the current hash to itself so the host re-runs anchor scrolling
    /// against whatever the document now contains.
    fn reassign_hash(&self);

    /// Leave the current document with a full page load.
    fn assign(&self, url: &str);
}

#[derive(Debug, Clone)]
struct HistorySlot {
    url: Url,
    state: Option<Value>,
    title: String,
}

struct WindowState {
    slots: Vec<HistorySlot>,
    index: usize,
    push_supported: bool,
    anchor_jumps: Vec<String>,
    page_loads: Vec<String>,
}

impl WindowState {
    fn current(&self) -> &HistorySlot {
        &self.slots[self.index]
    }

    fn push(&mut self, slot: HistorySlot) {
        self.slots.truncate(self.index + 1);
        self.slots.push(slot);
        self.index = self.slots.len() - 1;
    }
}

/// Headless window with a linear session-history stack.
///
/// Records anchor jumps and full page loads so callers can observe what a
/// real browser would have done.
pub struct MemoryWindow {
    state: Mutex<WindowState>,
}

impl MemoryWindow {
    pub fn new(url: Url) -> Self {
        Self {
            state: Mutex::new(WindowState {
                slots: vec![HistorySlot {
                    url,
                    state: None,
                    title: String::new(),
                }],
                index: 0,
                push_supported: true,
                anchor_jumps: Vec::new(),
                page_loads: Vec::new(),
            }),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| DomError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Self::new(url))
    }

    /// Window whose history API lacks `pushState`
    pub fn without_push_state(self) -> Self {
        self.state.lock().push_supported = false;
        self
    }

    /// Follow an in-page `#fragment` link: a new slot with no state, as the
    /// host does for plain hash navigation.
    pub fn navigate_to_fragment(&self, fragment: &str) {
        let mut state = self.state.lock();
        let mut url = state.current().url.clone();
        url.set_fragment(Some(fragment.trim_start_matches('#')));
        let title = state.current().title.clone();
        state.push(HistorySlot {
            url,
            state: None,
            title,
        });
    }

    /// Step back one slot. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let mut state = self.state.lock();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        true
    }

    /// Step forward one slot. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut state = self.state.lock();
        if state.index + 1 >= state.slots.len() {
            return false;
        }
        state.index += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().slots.len()
    }

    pub fn current_title(&self) -> String {
        self.state.lock().current().title.clone()
    }

    /// Fragments whose anchors were jumped to, oldest first
    pub fn anchor_jumps(&self) -> Vec<String> {
        self.state.lock().anchor_jumps.clone()
    }

    /// URLs handed to [`Window::assign`], oldest first
    pub fn page_loads(&self) -> Vec<String> {
        self.state.lock().page_loads.clone()
    }
}

impl Window for MemoryWindow {
    fn location(&self) -> Url {
        self.state.lock().current().url.clone()
    }

    fn history_state(&self) -> Option<Value> {
        self.state.lock().current().state.clone()
    }

    fn supports_push_state(&self) -> bool {
        self.state.lock().push_supported
    }

    fn push_state(&self, state: Value, title: &str, url: &Url) {
        self.state.lock().push(HistorySlot {
            url: url.clone(),
            state: Some(state),
            title: title.to_string(),
        });
    }

    fn reassign_hash(&self) {
        let mut state = self.state.lock();
        let fragment = state.current().url.fragment().map(str::to_string);
        if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
            state.anchor_jumps.push(fragment);
        }
    }

    fn assign(&self, url: &str) {
        tracing::debug!(url, "Full page load");
        self.state.lock().page_loads.push(url.to_string());
    }
}
