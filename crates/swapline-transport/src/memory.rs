//! In-memory transport
//!
//! Serves fragments from a route table keyed by URL path. A route can be
//! held so its response only resolves once released, which lets callers
//! reproduce out-of-order completion.

use futures_util::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::FetchError;
use crate::request::FragmentRequest;
use crate::{Result, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Fragment(String),
    Status(u16),
}

#[derive(Default)]
struct Routes {
    replies: HashMap<String, Reply>,
    holds: HashMap<String, oneshot::Receiver<()>>,
    requests: Vec<FragmentRequest>,
}

pub struct MemoryTransport {
    routes: Arc<Mutex<Routes>>,
}

/// Releases a held route
pub struct Release {
    sender: oneshot::Sender<()>,
}

impl Release {
    pub fn release(self) {
        let _ = self.sender.send(());
    }
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(Routes::default())),
        }
    }

    /// Serve `fragment` for GETs to `path`
    pub fn route(&self, path: &str, fragment: &str) -> &Self {
        self.routes
            .lock()
            .replies
            .insert(path.to_string(), Reply::Fragment(fragment.to_string()));
        self
    }

    /// Answer GETs to `path` with an error status
    pub fn fail(&self, path: &str, status: u16) -> &Self {
        self.routes
            .lock()
            .replies
            .insert(path.to_string(), Reply::Status(status));
        self
    }

    /// Hold the next response for `path` until the returned handle is released
    pub fn hold(&self, path: &str) -> Release {
        let (sender, receiver) = oneshot::channel();
        self.routes.lock().holds.insert(path.to_string(), receiver);
        Release { sender }
    }

    /// Every request issued so far, oldest first
    pub fn requests(&self) -> Vec<FragmentRequest> {
        self.routes.lock().requests.clone()
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryTransport {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
        }
    }
}

impl Transport for MemoryTransport {
    fn fetch(&self, request: FragmentRequest) -> BoxFuture<'static, Result<String>> {
        let path = request.path().to_string();
        let url = request.target().to_string();

        let (reply, gate) = {
            let mut routes = self.routes.lock();
            routes.requests.push(request);
            (routes.replies.get(&path).cloned(), routes.holds.remove(&path))
        };

        async move {
            if let Some(gate) = gate {
                // A dropped release handle behaves like a release.
                let _ = gate.await;
            }

            match reply {
                Some(Reply::Fragment(body)) => Ok(body),
                Some(Reply::Status(status)) => Err(FetchError::Status { status, url }),
                None => Err(FetchError::Status { status: 404, url }),
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn request(path: &str) -> FragmentRequest {
        FragmentRequest::new(Url::parse("https://app.test").unwrap().join(path).unwrap())
    }

    #[tokio::test]
    async fn test_routes_and_failures() {
        let transport = MemoryTransport::new();
        transport.route("/a", "<p>a</p>").fail("/broken", 500);

        assert_eq!(transport.fetch(request("/a")).await.unwrap(), "<p>a</p>");
        assert_eq!(
            transport.fetch(request("/broken")).await.unwrap_err(),
            FetchError::Status {
                status: 500,
                url: "https://app.test/broken".to_string()
            }
        );
        assert!(matches!(
            transport.fetch(request("/missing")).await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_hold_and_release() {
        let transport = MemoryTransport::new();
        transport.route("/slow", "<p>slow</p>");
        let release = transport.hold("/slow");

        let pending = tokio::spawn(transport.fetch(request("/slow")));
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        release.release();
        assert_eq!(pending.await.unwrap().unwrap(), "<p>slow</p>");

        // Holds apply to a single response
        assert_eq!(transport.fetch(request("/slow")).await.unwrap(), "<p>slow</p>");
    }
}
