//! Common test utilities and fixtures
//!
//! Every test app gets its own SQLite file and media directory inside a
//! temp dir that is removed when the app is dropped.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use lumen_server::{create_router, services::MediaStore, state::AppState};
use lumen_storage::{Database, LocalStorageContext};
use serde_json::Value;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const BOUNDARY: &str = "lumen-test-boundary";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub media_store: Arc<MediaStore>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = lumen_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        lumen_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let db = Arc::new(LocalStorageContext::new(pool));

        let media_store = MediaStore::new(temp_dir.path().join("uploads"), "/uploads");
        media_store
            .initialize()
            .await
            .expect("Failed to initialize media store");
        let media_store = Arc::new(media_store);

        let state = AppState::new(Arc::clone(&db), Arc::clone(&media_store));
        let router = create_router(state, MAX_UPLOAD_BYTES);

        Self {
            router,
            db,
            media_store,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
    }

    /// Send a request with an optional JSON body, returning status and JSON
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Upload files to a playlist through the multipart endpoint
    pub async fn upload(&self, playlist_id: &str, files: &[(&str, &[u8])]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/playlists/{}/midias", playlist_id))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body("midias", files)))
            .expect("Failed to build request");

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Create a playlist over HTTP and return its id
    pub async fn create_playlist(&self, name: &str) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/playlists",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("playlist id").to_string()
    }

    /// Create a monitor over HTTP and return its id
    pub async fn create_monitor(&self, name: &str) -> String {
        let (status, body) = self
            .json(
                Method::POST,
                "/monitores",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("monitor id").to_string()
    }

    /// Path on disk behind a media location
    pub fn stored_path(&self, location: &str) -> PathBuf {
        self.media_store
            .resolve(location)
            .expect("Location should resolve")
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Build a multipart/form-data body with one file part per entry
pub fn multipart_body(field: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (file_name, data) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
