// ============================
// accounts-backend-lib/src/accounts/manager.rs
// ============================
//! The only creation path for accounts.
use metrics::counter;
use tracing::info;
use zeroize::Zeroizing;

use super::{normalize_email, Account, ExtraFields, NewAccount};
use crate::auth::PasswordHasher;
use crate::error::{AppError, ValidationError};
use crate::metrics::{ACCOUNT_REGISTERED, ACCOUNT_SUPERUSER_CREATED};
use crate::storage::Storage;

/// Creates and administers accounts on top of a storage backend
#[derive(Debug, Clone)]
pub struct AccountManager<S> {
    storage: S,
    hasher: PasswordHasher,
}

impl<S: Storage> AccountManager<S> {
    pub fn new(storage: S, hasher: PasswordHasher) -> Self {
        Self { storage, hasher }
    }

    /// Create, save and return a new account.
    ///
    /// The email is normalized and the password hashed before anything is
    /// stored; the plaintext is wiped once hashed.
    pub async fn create_account(
        &self,
        email: &str,
        password: String,
        name: Option<String>,
        extra: ExtraFields,
    ) -> Result<Account, AppError> {
        let password = Zeroizing::new(password);
        if email.trim().is_empty() {
            return Err(ValidationError::MissingEmail.into());
        }

        let email = normalize_email(email);
        let password_hash = self.hasher.hash_secure(password).await?;
        let new_account = NewAccount::new(email, name.unwrap_or_default(), password_hash, extra);

        let account = self.storage.insert_account(new_account).await?;
        counter!(ACCOUNT_REGISTERED).increment(1);
        info!(account_id = %account.id, email = %account.email, "account created");
        Ok(account)
    }

    /// Create an account with staff and superuser privileges
    pub async fn create_superuser(&self, email: &str, password: String) -> Result<Account, AppError> {
        let mut account = self
            .create_account(email, password, None, ExtraFields::default())
            .await?;
        account.is_staff = true;
        account.is_superuser = true;
        self.storage.update_account(&account).await?;

        counter!(ACCOUNT_SUPERUSER_CREATED).increment(1);
        info!(account_id = %account.id, "superuser created");
        Ok(account)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self.storage.find_by_email(&normalize_email(email)).await?)
    }

    /// Existence query over the normalized email
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.storage.email_exists(&normalize_email(email)).await?)
    }

    /// Activate or deactivate an account
    pub async fn set_active(&self, email: &str, active: bool) -> Result<Account, AppError> {
        let mut account = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account {}", normalize_email(email))))?;
        account.is_active = active;
        self.storage.update_account(&account).await?;
        info!(account_id = %account.id, active, "account activation changed");
        Ok(account)
    }
}
