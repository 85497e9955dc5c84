//! End-to-end navigation scenarios against the headless host

use parking_lot::Mutex;
use std::sync::Arc;

use swapline_core::{
    ClickEvent, Config, LifecycleEvent, MemoryDocument, MemoryTransport, MemoryWindow,
    NavigationDescriptor, NavigationHandle, NavigationOutcome, Navigator, Window,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html class="ns-other" data-cssnamespace="ns-other">
  <head><title>Other</title></head>
  <body>
    <div id="body">
      <a id="dashboard" href="/dashboard" data-ajax="app">Dashboard</a>
      <a id="comments" href="/profile#comments" data-ajax>Comments</a>
      <a id="legacy" href="/legacy" data-ajax>Legacy</a>
      <div id="main"><p>other</p></div>
    </div>
  </body>
</html>"#;

struct Page {
    document: Arc<MemoryDocument>,
    window: Arc<MemoryWindow>,
    transport: MemoryTransport,
    navigator: Navigator,
}

impl Page {
    fn open(url: &str) -> Self {
        Self::with_window(MemoryWindow::parse(url).unwrap())
    }

    fn with_window(window: MemoryWindow) -> Self {
        let document = Arc::new(MemoryDocument::parse(PAGE));
        let window = Arc::new(window);
        let transport = MemoryTransport::new();
        let navigator = Navigator::new(
            Config::default(),
            document.clone(),
            window.clone(),
            Arc::new(transport.clone()),
        );

        Self {
            document,
            window,
            transport,
            navigator,
        }
    }

    fn click(&self, selector: &str) -> (ClickEvent, Option<NavigationHandle>) {
        let mut event = ClickEvent::new(self.document.click_path(selector).unwrap());
        let handle = self.navigator.handle_click(&mut event);
        (event, handle)
    }
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<LifecycleEvent>) -> Vec<LifecycleEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[tokio::test]
async fn scenario_a_app_layout_link() {
    let page = Page::open("https://app.test/other");
    page.transport.route(
        "/dashboard",
        r#"<input type="hidden" id="css-namespace" value="ns-dashboard"><h1>Dashboard</h1>"#,
    );
    page.document.scroll_to(900);
    let mut events = page.navigator.subscribe();

    let (event, handle) = page.click("#dashboard");
    assert!(event.is_default_prevented());
    let outcome = handle.unwrap().outcome().await;

    match outcome {
        NavigationOutcome::Loaded { container, url } => {
            assert_eq!(container, "#main");
            assert_eq!(url, "/dashboard");
        }
        other => panic!("Expected Loaded, got {:?}", other),
    }

    let requests = page.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].target().path(), "/dashboard");
    assert_eq!(requests[0].target().query(), Some("layout=app"));

    assert_eq!(page.document.text("#main").unwrap(), Some("Dashboard".to_string()));
    assert_eq!(page.document.scroll_top(), 0);
    assert_eq!(page.navigator.prev_path(), "/dashboard");

    // Namespace swapped and marker consumed
    assert!(!page.document.contains("#css-namespace").unwrap());
    assert!(page.document.has_root_class("ns-dashboard"));
    assert!(!page.document.has_root_class("ns-other"));

    let names: Vec<_> = drain(&mut events).iter().map(LifecycleEvent::name).collect();
    assert_eq!(names, vec!["beforePageLoad", "pageLoaded"]);
}

#[tokio::test]
async fn scenario_b_hash_only_link() {
    let page = Page::open("https://app.test/profile");
    let mut events = page.navigator.subscribe();

    let (_, handle) = page.click("#comments");
    assert!(page.window.anchor_jumps().is_empty());

    let outcome = handle.unwrap().outcome().await;

    assert!(matches!(outcome, NavigationOutcome::HashAdjusted));
    assert!(page.transport.requests().is_empty());
    assert_eq!(page.window.anchor_jumps(), vec!["comments".to_string()]);
    assert_eq!(page.navigator.prev_path(), "/profile");
    assert_eq!(page.navigator.prev_location(), "/profile#comments");
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn scenario_c_history_unsupported() {
    let page = Page::with_window(
        MemoryWindow::parse("https://app.test/other")
            .unwrap()
            .without_push_state(),
    );

    let (event, handle) = page.click("#legacy");
    assert!(event.is_default_prevented());

    assert!(matches!(
        handle.unwrap().outcome().await,
        NavigationOutcome::Redirected
    ));
    assert_eq!(page.window.page_loads(), vec!["/legacy".to_string()]);
    assert_eq!(page.window.history_len(), 1);
    assert!(page.transport.requests().is_empty());
}

#[tokio::test]
async fn scenario_d_late_response_does_not_overwrite() {
    let page = Page::open("https://app.test/other");
    page.transport
        .route("/a", "<p>content a</p>")
        .route("/b", "<p>content b</p>");
    let release_a = page.transport.hold("/a");
    let mut events = page.navigator.subscribe();

    let a = page
        .navigator
        .push_state(NavigationDescriptor::new("/a").layout("app"))
        .unwrap();
    let b = page
        .navigator
        .push_state(NavigationDescriptor::new("/b").layout("app"))
        .unwrap();

    assert!(b.outcome().await.is_loaded());
    release_a.release();
    assert!(matches!(a.outcome().await, NavigationOutcome::Superseded));

    assert_eq!(page.document.text("#main").unwrap(), Some("content b".to_string()));
    assert_eq!(page.navigator.prev_path(), "/b");
    assert_eq!(page.window.location().path(), "/b");

    let events = drain(&mut events);
    let superseded = events
        .iter()
        .find(|event| event.name() == "pageLoadSuperseded")
        .unwrap();
    let loaded = events
        .iter()
        .find(|event| event.name() == "pageLoaded")
        .unwrap();
    assert!(superseded.seq() < loaded.seq());
}

#[tokio::test]
async fn back_and_forward_replay_partial_loads() {
    let page = Page::open("https://app.test/other");
    page.transport
        .route("/dashboard", "<h1>Dashboard</h1>")
        .route("/other", r#"<div id="main"><p>other again</p></div>"#);

    page.click("#dashboard").1.unwrap().outcome().await;
    assert_eq!(page.document.text("#main").unwrap(), Some("Dashboard".to_string()));

    // Back to the initial slot, which carries no state
    assert!(page.window.back());
    page.navigator.handle_popstate().settled().await;
    assert_eq!(page.document.text("#body").unwrap(), Some("other again".to_string()));
    assert_eq!(page.navigator.prev_path(), "/other");

    // Forward replays the stored entry into #main with the app layout
    assert!(page.window.forward());
    page.navigator.handle_popstate().settled().await;
    assert_eq!(page.document.text("#main").unwrap(), Some("Dashboard".to_string()));

    let targets: Vec<String> = page
        .transport
        .requests()
        .iter()
        .map(|request| request.target().to_string())
        .collect();
    assert_eq!(
        targets,
        vec![
            "https://app.test/dashboard?layout=app",
            "https://app.test/other",
            "https://app.test/dashboard?layout=app",
        ]
    );
}

#[tokio::test]
async fn failed_fetch_reaches_callback() {
    let page = Page::open("https://app.test/other");
    page.transport.fail("/down", 503);
    let seen = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&seen);
    let handle = page
        .navigator
        .push_url("/down", move |outcome| {
            *slot.lock() = Some(matches!(outcome, NavigationOutcome::Failed(_)));
        })
        .unwrap();
    handle.outcome().await;

    assert_eq!(*seen.lock(), Some(true));
    assert_eq!(page.document.text("#main").unwrap(), Some("other".to_string()));
}

#[tokio::test]
async fn exactly_one_commit_per_navigation() {
    for supported in [true, false] {
        let window = MemoryWindow::parse("https://app.test/other").unwrap();
        let page = Page::with_window(if supported {
            window
        } else {
            window.without_push_state()
        });
        page.transport.route("/x", "<p>x</p>");

        page.navigator.push_state("/x").unwrap().outcome().await;

        let pushed = page.window.history_len() - 1;
        let loaded = page.window.page_loads().len();
        assert_eq!(pushed + loaded, 1, "push supported: {}", supported);
    }
}
