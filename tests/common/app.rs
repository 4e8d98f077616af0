//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

use inkframe::models::AppConfig;
use inkframe::server::{build_router, create_app_state, AppState};

use super::fixtures;

/// Test application with router and direct access to services.
///
/// Everything lives in a private temporary directory: the palette table,
/// the image store and the state file.
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application with a black and white palette
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application, adjusting the default test config first
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("palette.act"),
            fixtures::act_table(&[fixtures::colors::BLACK, fixtures::colors::WHITE]),
        )
        .expect("Failed to write palette");

        let mut config = Self::config_for(&dir);
        adjust(&mut config);
        Self::start(dir, config).await
    }

    /// Start a fresh app on an existing directory, as after a restart
    pub async fn reopen(dir: TempDir) -> Self {
        let config = Self::config_for(&dir);
        Self::start(dir, config).await
    }

    pub fn config_for(dir: &TempDir) -> AppConfig {
        AppConfig {
            palette: dir.path().join("palette.act"),
            images_dir: dir.path().join("processed"),
            state_file: dir.path().join("data").join("currentImage.txt"),
            ..Default::default()
        }
    }

    async fn start(dir: TempDir, config: AppConfig) -> Self {
        let state = create_app_state(config)
            .await
            .expect("Failed to create app state");
        let router = build_router(state.clone());
        Self { router, state, dir }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.state.config.images_dir.clone()
    }

    /// Put a stored image in place without going through the pipeline
    pub fn add_image(&self, name: &str) {
        std::fs::write(self.images_dir().join(name), b"BM").expect("Failed to write image");
    }

    /// Contents of the persisted state record
    pub fn recorded_state(&self) -> String {
        std::fs::read_to_string(&self.state.config.state_file).unwrap_or_default()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with an empty body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// POST a photo to /upload
    pub async fn upload(&self, photo: &[u8], fit: Option<&str>) -> TestResponse {
        self.upload_body(fixtures::multipart_body(Some(photo), fit))
            .await
    }

    /// POST a prepared multipart body to /upload
    pub async fn upload_body(&self, body: Vec<u8>) -> TestResponse {
        let request = Request::post("/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", fixtures::BOUNDARY),
            )
            .header("Content-Length", body.len().to_string())
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Open a streaming response without collecting its body
    pub async fn open_stream(&self, path: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .expect("Request failed")
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a BMP image
    pub fn is_bmp(&self) -> bool {
        self.body.len() >= 2 && &self.body[0..2] == b"BM"
    }
}
