//! Token issuance and lookup.
use super::token_generator::generate_secure_token;
use crate::accounts::Account;
use crate::error::StorageError;
use crate::storage::Storage;

/// Hands out one opaque token per account
#[derive(Debug, Clone)]
pub struct TokenIssuer<S> {
    storage: S,
}

impl<S: Storage> TokenIssuer<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Existing token for the account, or a freshly generated one
    pub async fn issue(&self, account: &Account) -> Result<String, StorageError> {
        self.storage
            .get_or_insert_token(account.id, generate_secure_token())
            .await
    }

    /// Active account the token belongs to
    pub async fn resolve(&self, token: &str) -> Result<Option<Account>, StorageError> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .storage
            .account_for_token(token)
            .await?
            .filter(|account| account.is_active))
    }
}
