use async_trait::async_trait;

use crate::accounts::Account;
use crate::error::AppError;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Matched active account, or the single credential error
    async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AppError>;
    /// Token bound to `account`, created on first use
    async fn issue_token(&self, account: &Account) -> Result<String, AppError>;
    /// Active account holding `token`, if any
    async fn account_for_token(&self, token: &str) -> Result<Option<Account>, AppError>;
}
