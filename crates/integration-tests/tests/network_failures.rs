//! Favorites against a server that stalls or answers with garbage.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use hotel_favorites_client::notify::messages;
use hotel_favorites_client::{
    FavoriteError, Favorites, HttpRemoteFavorites, KeyValueStore, MemoryStore, Notification,
    PageKind, PageView, RecordingNotifier, RemoteError, ToggleOutcome, WISHLIST_KEY,
};
use hotel_favorites_core::wire::SYNC_PATH;
use hotel_favorites_core::{FavoriteSlug, IdentityContext};
use hotel_favorites_integration_tests::StubServer;

const TOGGLE_ROUTE: &str = "/customers/favorite/{slug}/";

type Page = Favorites<Rc<MemoryStore>, HttpRemoteFavorites, Rc<RecordingNotifier>>;

fn slug(s: &str) -> FavoriteSlug {
    FavoriteSlug::parse(s).expect("valid slug")
}

fn customer_page(
    server: &StubServer,
    timeout: Duration,
    store: &Rc<MemoryStore>,
) -> (Page, Rc<RecordingNotifier>) {
    let mut page = PageView::new(PageKind::Browse);
    page.add_card(slug("grand-plaza"), false);

    let remote = HttpRemoteFavorites::new(&server.config(timeout)).expect("client");
    let notifier = Rc::new(RecordingNotifier::new());
    let favorites = Favorites::new(
        IdentityContext::Customer,
        Rc::clone(store),
        remote,
        Rc::clone(&notifier),
        page,
    );
    (favorites, notifier)
}

#[tokio::test]
async fn test_stalled_toggle_times_out_and_keeps_control() {
    // First request never answers in time, later ones confirm the add
    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new().route(
        TOGGLE_ROUTE,
        post(move || {
            let calls = Arc::clone(&calls);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
                r#"{"added": true}"#
            }
        }),
    );
    let server = StubServer::start(router).await;
    let store = Rc::new(MemoryStore::new());
    let (favorites, notifier) = customer_page(&server, Duration::from_millis(200), &store);
    let card = favorites.page().cards()[0].id;
    let plaza = slug("grand-plaza");

    let result = favorites.toggle(&plaza, card).await;

    match result {
        Err(FavoriteError::Network(RemoteError::Http(e))) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {other:?}"),
    }
    assert!(!favorites.page().cards()[0].button.is_favorited());
    assert_eq!(
        notifier.notifications(),
        vec![Notification::danger(messages::REMOTE_FAILED)]
    );

    // Guard released: the next toggle goes out and succeeds
    let outcome = favorites.toggle(&plaza, card).await.expect("retry");
    assert_eq!(outcome, ToggleOutcome::Added);
    assert!(favorites.page().cards()[0].button.is_favorited());
}

#[tokio::test]
async fn test_unparsable_toggle_response_is_a_network_failure() {
    let router = Router::new().route(TOGGLE_ROUTE, post(|| async { (StatusCode::OK, "not json") }));
    let server = StubServer::start(router).await;
    let store = Rc::new(MemoryStore::new());
    let (favorites, notifier) = customer_page(&server, Duration::from_secs(5), &store);
    let card = favorites.page().cards()[0].id;
    let plaza = slug("grand-plaza");

    let result = favorites.toggle(&plaza, card).await;

    assert!(matches!(
        result,
        Err(FavoriteError::Network(RemoteError::Parse(_)))
    ));
    assert!(!favorites.page().cards()[0].button.is_favorited());
    assert_eq!(
        notifier.notifications(),
        vec![Notification::danger(messages::REMOTE_FAILED)]
    );

    // A second attempt reaches the server again instead of being held back
    let again = favorites.toggle(&plaza, card).await;
    assert!(matches!(
        again,
        Err(FavoriteError::Network(RemoteError::Parse(_)))
    ));
}

#[tokio::test]
async fn test_unparsable_sync_response_keeps_wishlist() {
    let router = Router::new().route(SYNC_PATH, post(|| async { (StatusCode::OK, "<html>") }));
    let server = StubServer::start(router).await;
    let store = Rc::new(MemoryStore::with_value(WISHLIST_KEY, r#"["grand-plaza"]"#));
    let (favorites, notifier) = customer_page(&server, Duration::from_secs(5), &store);

    let result = favorites.sync_on_login().await;

    assert!(matches!(
        result,
        Err(FavoriteError::Network(RemoteError::Parse(_)))
    ));
    assert_eq!(
        store.read(WISHLIST_KEY).expect("read").as_deref(),
        Some(r#"["grand-plaza"]"#)
    );
    assert_eq!(
        notifier.notifications(),
        vec![Notification::danger(messages::SYNC_FAILED)]
    );
}
