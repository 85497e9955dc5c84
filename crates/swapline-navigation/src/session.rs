//! Navigation session state
//!
//! The only shared mutable state of the navigation subsystem: the previously
//! settled location and the sequence number of the newest real navigation.

use parking_lot::Mutex;
use url::Url;

use crate::location;

struct SessionState {
    /// `path + search + hash` recorded by the last restore
    prev_location: String,
    /// Sequence number of the newest real navigation, 0 before the first
    latest_seq: u64,
}

pub struct NavigationSession {
    state: Mutex<SessionState>,
}

impl NavigationSession {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                prev_location: initial.into(),
                latest_seq: 0,
            }),
        }
    }

    /// Session for a page loaded at `url`. The hash is left out so the first
    /// restore of an anchor link is treated as hash-only.
    pub fn starting_at(url: &Url) -> Self {
        Self::new(location::path_and_search(url))
    }

    /// Previously recorded location including its hash
    pub fn prev_location(&self) -> String {
        self.state.lock().prev_location.clone()
    }

    /// Previously recorded `path + search`
    pub fn prev_path(&self) -> String {
        location::strip_hash(&self.state.lock().prev_location).to_string()
    }

    /// Record `current` as the settled location and return the previous one.
    pub(crate) fn advance(&self, current: String) -> String {
        std::mem::replace(&mut self.state.lock().prev_location, current)
    }

    /// Start a real navigation, superseding every earlier one.
    pub(crate) fn begin_fetch(&self) -> u64 {
        let mut state = self.state.lock();
        state.latest_seq += 1;
        state.latest_seq
    }

    /// Whether `seq` is still the newest real navigation
    pub fn is_current(&self, seq: u64) -> bool {
        self.state.lock().latest_seq == seq
    }

    pub fn latest_seq(&self) -> u64 {
        self.state.lock().latest_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_at_drops_hash() {
        let url = Url::parse("https://app.test/profile?tab=1#comments").unwrap();
        let session = NavigationSession::starting_at(&url);

        assert_eq!(session.prev_location(), "/profile?tab=1");
        assert_eq!(session.latest_seq(), 0);
    }

    #[test]
    fn test_advance() {
        let session = NavigationSession::new("/profile");

        assert_eq!(session.advance("/profile#comments".to_string()), "/profile");
        assert_eq!(session.prev_location(), "/profile#comments");
        assert_eq!(session.prev_path(), "/profile");
    }

    #[test]
    fn test_sequence_supersedes() {
        let session = NavigationSession::new("/");

        let first = session.begin_fetch();
        assert!(session.is_current(first));

        let second = session.begin_fetch();
        assert!(second > first);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }
}
