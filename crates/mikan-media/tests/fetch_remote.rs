use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};
use mikan_media::MediaStore;
use tokio::sync::oneshot;

async fn start_mock_server() -> (SocketAddr, oneshot::Sender<()>) {
    let (tx, rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route("/img.png", get(|| async { b"\x89PNG fake image bytes".to_vec() }))
        .route(
            "/gone.png",
            get(|| async { (StatusCode::NOT_FOUND, "not found") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .unwrap();
    });

    (addr, tx)
}

#[tokio::test]
async fn fetch_remote_stores_bytes_under_generated_name() {
    let (addr, shutdown) = start_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());

    let url = format!("http://{addr}/img.png");
    let (path, file_name) = store.fetch_remote(&url, ".png").await.unwrap();

    assert!(!file_name.is_empty());
    assert!(file_name.ends_with(".png"));
    assert!(path.starts_with(store.uploads_dir()));
    assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG fake image bytes");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn fetch_remote_http_error_is_retryable() {
    let (addr, shutdown) = start_mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let store = MediaStore::new(dir.path());

    let url = format!("http://{addr}/gone.png");
    let err = store.fetch_remote(&url, ".png").await.unwrap_err();
    assert!(err.is_retryable());
    // Nothing was written for the failed fetch.
    assert!(!store.uploads_dir().exists());

    let _ = shutdown.send(());
}
