// ============================
// crates/backend-lib/src/handlers/accounts.rs
// ============================
//! Account HTTP handlers. Each one unwraps the request and calls straight
//! into [`AccountApi`](crate::api::AccountApi).
use accounts_common::{AccountResponse, RegisterRequest, TokenRequest, TokenResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::auth::parse_authorization;
use crate::error::AppError;
use crate::storage::Storage;
use crate::AppState;

/// `POST /api/user/create/`
pub async fn create_account<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let Json(req) = payload?;
    let account = state.api.register(req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// `POST /api/user/token/`
pub async fn issue_token<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = payload?;
    Ok(Json(state.api.issue_token(req).await?))
}

/// `GET /api/user/me/`
pub async fn me<S: Storage + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<AccountResponse>, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authorization)
        .ok_or(AppError::InvalidToken)?;
    Ok(Json(state.api.me(token).await?))
}
