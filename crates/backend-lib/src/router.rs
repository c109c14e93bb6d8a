// ============================
// accounts-backend-lib/src/router.rs
// ============================
//! HTTP router.
use crate::handlers::{accounts, health};
use crate::storage::Storage;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const CREATE_USER_PATH: &str = "/api/user/create/";
pub const TOKEN_PATH: &str = "/api/user/token/";
pub const ME_PATH: &str = "/api/user/me/";
pub const HEALTH_PATH: &str = "/health";

/// Create the accounts router
pub fn create_router<S: Storage + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route(CREATE_USER_PATH, post(accounts::create_account::<S>))
        .route(TOKEN_PATH, post(accounts::issue_token::<S>))
        .route(ME_PATH, get(accounts::me::<S>))
        .route(HEALTH_PATH, get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
