// ============================
// accounts-backend-lib/src/lib.rs
// ============================
//! Core functionality for the accounts server: email-keyed accounts,
//! credential validation and opaque bearer tokens.

pub mod accounts;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod telemetry;
pub mod validation;

use std::sync::Arc;
use crate::accounts::AccountManager;
use crate::api::AccountApi;
use crate::auth::{AuthService, DefaultAuth, PasswordHasher};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::Storage;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Operations exposed over HTTP
    pub api: AccountApi<S>,
    /// Account creation and administration
    pub accounts: AccountManager<S>,
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
}

impl<S: Storage + Clone + 'static> AppState<S> {
    /// Wire every service on top of `storage`.
    pub fn new(storage: S, settings: Settings) -> Result<Self, AppError> {
        let hasher = PasswordHasher::from_settings(&settings.hasher)?;
        let accounts = AccountManager::new(storage.clone(), hasher.clone());
        let auth: Arc<dyn AuthService> = Arc::new(DefaultAuth::new(storage.clone(), hasher));
        let api = AccountApi::new(
            accounts.clone(),
            Arc::clone(&auth),
            settings.min_password_length,
        );

        Ok(Self {
            api,
            accounts,
            auth,
            settings: Arc::new(settings),
            storage,
        })
    }
}
