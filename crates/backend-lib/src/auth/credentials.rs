//! Credential validation for the login flow.
use metrics::counter;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::PasswordHasher;
use crate::accounts::{normalize_email, Account};
use crate::error::{AppError, AuthenticationError};
use crate::metrics::AUTH_FAILED;
use crate::storage::Storage;

/// Decides whether a claimed email+password pair belongs to an active account
#[derive(Debug, Clone)]
pub struct CredentialValidator<S> {
    storage: S,
    hasher: PasswordHasher,
}

impl<S: Storage> CredentialValidator<S> {
    pub fn new(storage: S, hasher: PasswordHasher) -> Self {
        Self { storage, hasher }
    }

    /// Return the matching active account.
    ///
    /// Unknown email, inactive account, wrong password and blank password
    /// all fail with [`AuthenticationError::InvalidCredentials`]. An unknown
    /// email still costs one hash so timing does not reveal which case hit.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let email = normalize_email(email);
        let plain = Zeroizing::new(password.to_owned());

        let account = if email.is_empty() {
            None
        } else {
            self.storage.find_by_email(&email).await?
        };

        let Some(account) = account else {
            let _ = self.hasher.hash_secure(plain).await;
            return Err(Self::reject(&email, "unknown email"));
        };

        let matches = self
            .hasher
            .verify_secure(account.password_hash.clone(), plain)
            .await;

        if password.is_empty() || !matches {
            return Err(Self::reject(&email, "password mismatch"));
        }
        if !account.is_active {
            return Err(Self::reject(&email, "inactive account"));
        }

        debug!(account_id = %account.id, "credentials accepted");
        Ok(account)
    }

    fn reject(email: &str, reason: &'static str) -> AppError {
        counter!(AUTH_FAILED).increment(1);
        warn!(%email, reason, "authentication failed");
        AuthenticationError::InvalidCredentials.into()
    }
}
