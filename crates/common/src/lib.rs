// ================
// common/src/lib.rs
// ================
//! Request and response bodies shared between the accounts server and its
//! clients.
//!
//! Every request field defaults to an empty string when absent so that
//! missing fields reach the server's own validation instead of failing JSON
//! decoding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/user/create/`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    /// Login identifier
    #[serde(default)]
    pub email: String,
    /// Display label
    #[serde(default)]
    pub name: String,
    /// Plaintext password (min 7 chars). Never echoed back.
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /api/user/token/`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TokenRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of an account.
///
/// Deliberately has no password field of any kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountResponse {
    pub email: String,
    pub name: String,
}

/// Successful token issuance
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Per-field validation messages, keyed by request field name
pub type FieldMessages = BTreeMap<String, Vec<String>>;

/// Error payload returned with every non-2xx response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner part of [`ErrorBody`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `VAL_001`
    pub code: String,
    /// Human readable message
    pub message: String,
    /// Only present for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMessages>,
}
