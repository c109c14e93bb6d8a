//! Test utilities for the accounts server tests
//!
//! Builds an application with cheap hashing parameters so tests stay fast,
//! plus helpers to drive the router without a socket.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use backend_lib::{
    config::{HashAlgorithm, HasherSettings, Settings, StorageBackend},
    router::create_router,
    storage::{FlatFileStorage, MemoryStorage},
    AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Settings with low-cost hashing
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.storage.backend = StorageBackend::Memory;
    settings.hasher = HasherSettings {
        algorithm: HashAlgorithm::Scrypt,
        scrypt_log_n: 4,
        argon2_memory_kib: 64,
        argon2_iterations: 1,
    };
    settings
}

/// Router over fresh in-memory storage
pub fn setup_memory_app() -> (Router, Arc<AppState<MemoryStorage>>) {
    let state = Arc::new(
        AppState::new(MemoryStorage::new(), test_settings()).expect("Failed to create AppState for test"),
    );
    (create_router(Arc::clone(&state)), state)
}

/// Router over flat-file storage in a temporary directory.
/// Keep the `TempDir` in scope for the duration of the test.
pub async fn setup_file_app() -> (Router, Arc<AppState<FlatFileStorage>>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FlatFileStorage::open(temp_dir.path()).await.unwrap();
    let state = Arc::new(AppState::new(storage, test_settings()).unwrap());
    (create_router(Arc::clone(&state)), state, temp_dir)
}

/// Send a JSON POST and return status plus parsed body
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send a GET with an optional `Authorization` header
pub async fn get_with_auth(app: &Router, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
