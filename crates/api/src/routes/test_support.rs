//! Helpers for driving the router in tests against in-memory backends.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use book_site_core::auth::issue_token;
use book_site_core::blob::memory::MemoryBlobStore;
use book_site_core::store::memory::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::state::AppState;

pub const BOUNDARY: &str = "book-site-test-boundary";
pub const TEST_JWT_SECRET: &str = "book-site-test-secret";

/// Default config with a signing secret so admin routes are enabled.
pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        ..AppConfig::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub blobs: Arc<MemoryBlobStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let blobs = Arc::new(MemoryBlobStore::new());
        let state = AppState::new(Arc::new(MemoryStore::new()), blobs.clone(), config.clone());
        Self {
            router: super::build_router(state),
            blobs,
            config,
        }
    }

    pub fn token(&self) -> String {
        let secret = self.config.jwt_secret.as_deref().unwrap_or(TEST_JWT_SECRET);
        issue_token("admin@example.com", secret, chrono::Duration::hours(1)).expect("token")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub fn json(&self, method: Method, uri: &str, body: Value, admin: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token()));
        }
        builder.body(Body::from(body.to_string())).expect("request")
    }

    pub fn empty(&self, method: Method, uri: &str, admin: bool) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token()));
        }
        builder.body(Body::empty()).expect("request")
    }

    pub fn multipart(&self, method: Method, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token()))
            .body(Body::from(multipart_body(parts)))
            .expect("request")
    }
}

/// One multipart field: plain text, or a file with name and content type.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
