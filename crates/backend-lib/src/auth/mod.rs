// ============================
// accounts-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod credentials;
pub mod password;
pub mod token_generator;
pub mod tokens;
mod service;
mod service_impl;

pub use credentials::CredentialValidator;
pub use password::{PasswordHasher, MIN_PASSWORD_LENGTH};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token_generator::generate_secure_token;
pub use tokens::TokenIssuer;

/// Token from an `Authorization: Token <key>` or `Bearer <key>` header value
pub fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    let known = scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    (known && !key.is_empty() && !key.contains(' ')).then_some(key)
}
