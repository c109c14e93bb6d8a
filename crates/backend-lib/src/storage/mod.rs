// ============================
// accounts-backend-lib/src/storage/mod.rs
// ============================
//! Storage port for accounts and tokens, with in-memory and flat-file
//! adapters.
//!
//! Adapters own the uniqueness rule: the "email taken?" check and the insert
//! happen in one critical section, so concurrent registrations with the same
//! email cannot both succeed.
use async_trait::async_trait;
use std::sync::Arc;

use crate::accounts::{Account, AccountId, NewAccount};
use crate::config::{StorageBackend, StorageSettings};
use crate::error::StorageError;

mod flat_file;
mod memory;

pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert an account, assigning its id.
    /// Fails with [`StorageError::DuplicateEmail`] when the email is taken.
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StorageError>;

    /// Look up by already-normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError>;

    /// Replace the stored record with the same id
    async fn update_account(&self, account: &Account) -> Result<(), StorageError>;

    /// Whether any account is stored under this normalized email
    async fn email_exists(&self, email: &str) -> Result<bool, StorageError>;

    /// Return the account's token, storing `candidate` if it has none yet
    async fn get_or_insert_token(
        &self,
        account_id: AccountId,
        candidate: String,
    ) -> Result<String, StorageError>;

    /// Account a token was issued to
    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, StorageError>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Arc<T> {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StorageError> {
        (**self).insert_account(account).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        (**self).find_by_id(id).await
    }

    async fn update_account(&self, account: &Account) -> Result<(), StorageError> {
        (**self).update_account(account).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        (**self).email_exists(email).await
    }

    async fn get_or_insert_token(
        &self,
        account_id: AccountId,
        candidate: String,
    ) -> Result<String, StorageError> {
        (**self).get_or_insert_token(account_id, candidate).await
    }

    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, StorageError> {
        (**self).account_for_token(token).await
    }
}

/// Open the backend selected in the settings
pub async fn open(settings: &StorageSettings) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match settings.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FlatFileStorage::open(&settings.path).await?),
    };
    tracing::info!(backend = ?settings.backend, "storage opened");
    Ok(storage)
}
