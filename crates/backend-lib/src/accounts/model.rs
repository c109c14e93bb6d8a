//! Account records.
use accounts_common::AccountResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity assigned by the storage layer on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted user identity keyed by normalized email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Flag overrides for account creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraFields {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Normalized, hashed account data waiting for an id.
///
/// Only [`AccountManager`](super::AccountManager) can build one, so every
/// stored account went through normalization and hashing.
#[derive(Debug, Clone)]
pub struct NewAccount {
    email: String,
    name: String,
    password_hash: String,
    extra: ExtraFields,
}

impl NewAccount {
    pub(crate) fn new(email: String, name: String, password_hash: String, extra: ExtraFields) -> Self {
        Self {
            email,
            name,
            password_hash,
            extra,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the storage-assigned id
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            is_active: self.extra.is_active.unwrap_or(true),
            is_staff: self.extra.is_staff.unwrap_or(false),
            is_superuser: self.extra.is_superuser.unwrap_or(false),
            date_joined: Utc::now(),
        }
    }
}
