#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use places_api::config::{LogFormat, ServerConfig};
use places_api::router::build_app_router;
use places_api::state::AppState;
use places_cloud::{
    LocalObjectStore, LocalStorageConfig, ObjectStore, StorageConfig, StorageError,
};
use places_db::DbPool;
use tower::ServiceExt;

/// Public base URL of the local blob store used by tests.
pub const BLOB_BASE_URL: &str = "http://localhost:3000/blobs";

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "places-test-boundary";

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = places_db::create_pool("sqlite::memory:", 1).await.unwrap();
    places_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build a test `ServerConfig` with safe defaults and local storage at `storage_root`.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 64 * 1024,
        upload_container: "uploads".to_string(),
        log_format: LogFormat::Text,
        storage: StorageConfig::Local(LocalStorageConfig {
            root: storage_root.to_path_buf(),
            public_base_url: BLOB_BASE_URL.to_string(),
        }),
    }
}

/// Build the full application router, exactly as `main.rs` does, around the
/// given pool and a local object store rooted at `storage_root`.
pub fn build_test_app(pool: DbPool, storage_root: &Path) -> Router {
    let object_store = Arc::new(LocalObjectStore::new(storage_root, BLOB_BASE_URL).unwrap());
    build_test_app_with_store(pool, storage_root, object_store)
}

/// Same as [`build_test_app`] but with a caller-supplied object store.
pub fn build_test_app_with_store(
    pool: DbPool,
    storage_root: &Path,
    object_store: Arc<dyn ObjectStore>,
) -> Router {
    let config = test_config(storage_root);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        object_store,
    };

    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// A single-field multipart body. `file_name` of `None` sends a plain form field.
pub fn multipart_body(field: &str, file_name: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = format!("--{BOUNDARY}\r\n").into_bytes();
    match file_name {
        Some(file_name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a place through the API and return its JSON.
pub async fn create_place(
    app: &Router,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/places/",
        serde_json::json!({"name": name, "latitude": latitude, "longitude": longitude}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Object store whose uploads always fail.
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn upload(
        &self,
        _container: &str,
        _object_name: &str,
        _data: Bytes,
    ) -> Result<String, StorageError> {
        Err(StorageError::Upload("bucket unreachable".into()))
    }

    fn provider(&self) -> &'static str {
        "failing"
    }
}

/// Number of rows in `place_photos`.
pub async fn photo_row_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM place_photos")
        .fetch_one(pool)
        .await
        .unwrap()
}
