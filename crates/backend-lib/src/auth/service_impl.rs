use async_trait::async_trait;
use metrics::counter;
use tracing::info;

use crate::accounts::Account;
use crate::auth::{AuthService, CredentialValidator, PasswordHasher, TokenIssuer};
use crate::error::AppError;
use crate::metrics::TOKEN_ISSUED;
use crate::storage::Storage;

pub struct DefaultAuth<S> {
    validator: CredentialValidator<S>,
    tokens: TokenIssuer<S>,
}

impl<S: Storage + Clone> DefaultAuth<S> {
    pub fn new(storage: S, hasher: PasswordHasher) -> Self {
        Self {
            validator: CredentialValidator::new(storage.clone(), hasher),
            tokens: TokenIssuer::new(storage),
        }
    }
}

#[async_trait]
impl<S: Storage + Clone + 'static> AuthService for DefaultAuth<S> {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AppError> {
        self.validator.authenticate(email, password).await
    }

    async fn issue_token(&self, account: &Account) -> Result<String, AppError> {
        let token = self.tokens.issue(account).await?;
        counter!(TOKEN_ISSUED).increment(1);
        info!(account_id = %account.id, "token issued");
        Ok(token)
    }

    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, AppError> {
        Ok(self.tokens.resolve(token).await?)
    }
}
