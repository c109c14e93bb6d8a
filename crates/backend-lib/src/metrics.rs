// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ACCOUNT_REGISTERED: &str = "account.registered";
pub const ACCOUNT_SUPERUSER_CREATED: &str = "account.superuser_created";
pub const TOKEN_ISSUED: &str = "auth.token_issued";
pub const AUTH_FAILED: &str = "auth.failed";
