// ============================
// accounts-backend-lib/src/storage/flat_file.rs
// ============================
//! Flat-file storage adapter.
//!
//! The whole dataset lives in one JSON document (`accounts.json`). Every
//! mutation runs under a single async mutex, writes a temp file and renames
//! it over the old document, then commits to the in-memory copy.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::{fs as tokio_fs, sync::Mutex};

use super::Storage;
use crate::accounts::{Account, AccountId, NewAccount};
use crate::error::StorageError;

const DOCUMENT_FILE: &str = "accounts.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    accounts: Vec<Account>,
    /// token -> owning account
    tokens: BTreeMap<String, AccountId>,
}

impl Document {
    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    fn account_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn token_of(&self, id: AccountId) -> Option<&String> {
        self.tokens
            .iter()
            .find_map(|(token, owner)| (*owner == id).then_some(token))
    }
}

/// JSON-document implementation of the Storage trait
#[derive(Debug, Clone)]
pub struct FlatFileStorage {
    path: PathBuf,
    doc: Arc<Mutex<Document>>,
}

impl FlatFileStorage {
    /// Open (or create) the document under `root`
    pub async fn open<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref();
        tokio_fs::create_dir_all(root).await?;
        let path = root.join(DOCUMENT_FILE);

        let doc = match tokio_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Document::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), accounts = doc.accounts.len(), "loaded account document");

        Ok(Self {
            path,
            doc: Arc::new(Mutex::new(doc)),
        })
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, doc: &Document) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(doc)?;
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StorageError> {
        let mut doc = self.doc.lock().await;
        if doc.account_by_email(account.email()).is_some() {
            return Err(StorageError::DuplicateEmail(account.email().to_string()));
        }

        let account = account.into_account(AccountId::new());
        let mut next = doc.clone();
        next.accounts.push(account.clone());
        self.persist(&next).await?;
        *doc = next;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.doc.lock().await.account_by_email(email).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self.doc.lock().await.account_by_id(id).cloned())
    }

    async fn update_account(&self, account: &Account) -> Result<(), StorageError> {
        let mut doc = self.doc.lock().await;
        let Some(index) = doc.accounts.iter().position(|a| a.id == account.id) else {
            return Err(StorageError::AccountNotFound(account.id));
        };
        if doc
            .accounts
            .iter()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(StorageError::DuplicateEmail(account.email.clone()));
        }

        let mut next = doc.clone();
        next.accounts[index] = account.clone();
        self.persist(&next).await?;
        *doc = next;
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        Ok(self.doc.lock().await.account_by_email(email).is_some())
    }

    async fn get_or_insert_token(
        &self,
        account_id: AccountId,
        candidate: String,
    ) -> Result<String, StorageError> {
        let mut doc = self.doc.lock().await;
        if doc.account_by_id(account_id).is_none() {
            return Err(StorageError::AccountNotFound(account_id));
        }
        if let Some(existing) = doc.token_of(account_id) {
            return Ok(existing.clone());
        }

        let mut next = doc.clone();
        next.tokens.insert(candidate.clone(), account_id);
        self.persist(&next).await?;
        *doc = next;
        Ok(candidate)
    }

    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, StorageError> {
        let doc = self.doc.lock().await;
        Ok(doc
            .tokens
            .get(token)
            .and_then(|id| doc.account_by_id(*id))
            .cloned())
    }
}
