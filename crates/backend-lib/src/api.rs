// ============================
// accounts-backend-lib/src/api.rs
// ============================
//! The externally visible account operations, independent of HTTP.
use accounts_common::{AccountResponse, RegisterRequest, TokenRequest, TokenResponse};
use std::sync::Arc;

use crate::accounts::{AccountManager, ExtraFields};
use crate::auth::AuthService;
use crate::error::{AppError, ValidationError};
use crate::storage::Storage;
use crate::validation;

pub struct AccountApi<S> {
    accounts: AccountManager<S>,
    auth: Arc<dyn AuthService>,
    min_password_length: usize,
}

impl<S: Storage> AccountApi<S> {
    pub fn new(accounts: AccountManager<S>, auth: Arc<dyn AuthService>, min_password_length: usize) -> Self {
        Self {
            accounts,
            auth,
            min_password_length,
        }
    }

    /// Validate the request, create the account and return its public fields.
    /// Nothing is stored when any field is rejected.
    pub async fn register(&self, req: RegisterRequest) -> Result<AccountResponse, AppError> {
        let mut errors = validation::registration_errors(&req, self.min_password_length);
        let email_well_formed = !errors.contains(&ValidationError::MissingEmail)
            && !errors.contains(&ValidationError::InvalidEmail);
        if email_well_formed && self.accounts.email_exists(&req.email).await? {
            errors.push(ValidationError::DuplicateEmail);
        }
        errors.into_result()?;

        let RegisterRequest { email, name, password } = req;
        let account = self
            .accounts
            .create_account(&email, password, Some(name.trim().to_string()), ExtraFields::default())
            .await?;

        Ok(AccountResponse::from(&account))
    }

    /// Exchange credentials for the account's token
    pub async fn issue_token(&self, req: TokenRequest) -> Result<TokenResponse, AppError> {
        let account = self.auth.authenticate(&req.email, &req.password).await?;
        let token = self.auth.issue_token(&account).await?;
        Ok(TokenResponse { token })
    }

    /// Public fields of the account holding `token`
    pub async fn me(&self, token: &str) -> Result<AccountResponse, AppError> {
        self.auth
            .account_for_token(token)
            .await?
            .map(|account| AccountResponse::from(&account))
            .ok_or(AppError::InvalidToken)
    }
}
