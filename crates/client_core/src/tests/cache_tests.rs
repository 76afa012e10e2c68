use super::*;
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Hits {
    image: Arc<AtomicUsize>,
    volatile: Arc<AtomicUsize>,
}

async fn handle_image(State(hits): State<Hits>) -> impl IntoResponse {
    hits.image.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "image/png")], vec![1u8, 2, 3])
}

async fn handle_volatile(State(hits): State<Hits>) -> impl IntoResponse {
    hits.volatile.fetch_add(1, Ordering::SeqCst);
    ([(header::CACHE_CONTROL, "private, no-store")], "fresh")
}

async fn spawn_server() -> (Url, Hits) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hits = Hits::default();
    let app = Router::new()
        .route("/images/a.png", get(handle_image))
        .route("/volatile", get(handle_volatile))
        .with_state(hits.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (Url::parse(&format!("http://{addr}")).expect("url"), hits)
}

#[tokio::test]
async fn cached_body_is_returned_without_network() {
    let (base, hits) = spawn_server().await;
    let url = base.join("/images/a.png").expect("join");
    let cache = ResponseCache::new();
    let http = Client::new();

    let first = cache
        .load(&http, &url, CachePolicy::ReturnCacheElseLoad)
        .await
        .expect("load");
    let second = cache
        .load(&http, &url, CachePolicy::ReturnCacheElseLoad)
        .await
        .expect("load");

    assert_eq!(&*first, &[1u8, 2, 3]);
    assert_eq!(first, second);
    assert_eq!(hits.image.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn reload_policy_bypasses_stored_body() {
    let (base, hits) = spawn_server().await;
    let url = base.join("/images/a.png").expect("join");
    let cache = ResponseCache::new();
    let http = Client::new();

    cache
        .load(&http, &url, CachePolicy::ReturnCacheElseLoad)
        .await
        .expect("load");
    cache
        .load(&http, &url, CachePolicy::ReloadIgnoringCache)
        .await
        .expect("reload");

    assert_eq!(hits.image.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_store_responses_are_not_cached() {
    let (base, hits) = spawn_server().await;
    let url = base.join("/volatile").expect("join");
    let cache = ResponseCache::new();
    let http = Client::new();

    for _ in 0..2 {
        cache
            .load(&http, &url, CachePolicy::ReturnCacheElseLoad)
            .await
            .expect("load");
    }

    assert_eq!(hits.volatile.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn error_status_is_reported_and_not_cached() {
    let (base, _hits) = spawn_server().await;
    let url = base.join("/missing.png").expect("join");
    let cache = ResponseCache::new();

    let err = cache
        .load(&Client::new(), &url, CachePolicy::ReturnCacheElseLoad)
        .await
        .expect_err("must fail");

    assert!(matches!(err, LoadError::Status(StatusCode::NOT_FOUND)));
    assert!(cache.is_empty().await);
}

#[test]
fn detects_no_store_among_directives() {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, "max-age=60".parse().expect("header"));
    assert!(!forbids_storage(&headers));

    headers.insert(CACHE_CONTROL, "private, No-Store".parse().expect("header"));
    assert!(forbids_storage(&headers));
}
