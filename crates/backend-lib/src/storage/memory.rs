//! In-memory storage adapter.
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::Storage;
use crate::accounts::{Account, AccountId, NewAccount};
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    by_email: HashMap<String, AccountId>,
}

/// Process-local storage. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
    /// account -> token
    tokens: Arc<DashMap<AccountId, String>>,
    /// token -> account
    token_owners: Arc<DashMap<String, AccountId>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StorageError> {
        let mut tables = self.tables.write();
        if tables.by_email.contains_key(account.email()) {
            return Err(StorageError::DuplicateEmail(account.email().to_string()));
        }

        let account = account.into_account(AccountId::new());
        tables.by_email.insert(account.email.clone(), account.id);
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        let tables = self.tables.read();
        Ok(tables
            .by_email
            .get(email)
            .and_then(|id| tables.accounts.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.tables.read().accounts.get(&id).cloned())
    }

    async fn update_account(&self, account: &Account) -> Result<(), StorageError> {
        let mut tables = self.tables.write();
        let previous_email = match tables.accounts.get(&account.id) {
            Some(existing) => existing.email.clone(),
            None => return Err(StorageError::AccountNotFound(account.id)),
        };

        if previous_email != account.email {
            if tables.by_email.contains_key(&account.email) {
                return Err(StorageError::DuplicateEmail(account.email.clone()));
            }
            tables.by_email.remove(&previous_email);
            tables.by_email.insert(account.email.clone(), account.id);
        }

        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        Ok(self.tables.read().by_email.contains_key(email))
    }

    async fn get_or_insert_token(
        &self,
        account_id: AccountId,
        candidate: String,
    ) -> Result<String, StorageError> {
        if !self.tables.read().accounts.contains_key(&account_id) {
            return Err(StorageError::AccountNotFound(account_id));
        }

        let token = self
            .tokens
            .entry(account_id)
            .or_insert_with(|| candidate.clone())
            .clone();
        if token == candidate {
            self.token_owners.insert(candidate, account_id);
        }
        Ok(token)
    }

    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, StorageError> {
        let Some(account_id) = self.token_owners.get(token).map(|entry| *entry) else {
            return Ok(None);
        };
        self.find_by_id(account_id).await
    }
}
