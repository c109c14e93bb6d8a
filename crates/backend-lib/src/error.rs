// crates/backend-lib/src/error.rs

//! Central error types + Axum integration.
use accounts_common::{ErrorBody, ErrorDetail, FieldMessages};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

use crate::accounts::AccountId;

/// Client input that violates a field constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an email address.")]
    MissingEmail,

    #[error("Enter a valid email address.")]
    InvalidEmail,

    #[error("This field may not be blank.")]
    MissingName,

    #[error("Ensure this field has no more than {max} characters.")]
    NameTooLong { max: usize },

    #[error("Ensure this field has at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("An account with this email already exists.")]
    DuplicateEmail,
}

impl ValidationError {
    /// Request field the error is reported under
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingEmail
            | ValidationError::InvalidEmail
            | ValidationError::DuplicateEmail => "email",
            ValidationError::MissingName | ValidationError::NameTooLong { .. } => "name",
            ValidationError::PasswordTooShort { .. } => "password",
        }
    }
}

/// Every validation failure found in one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }

    /// Group messages by field for the response body
    pub fn to_messages(&self) -> FieldMessages {
        let mut messages = FieldMessages::new();
        for error in &self.0 {
            messages
                .entry(error.field().to_string())
                .or_default()
                .push(error.to_string());
        }
        messages
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field(), error)?;
            first = false;
        }
        Ok(())
    }
}

/// Credential mismatch. Unknown email, inactive account, wrong and blank
/// passwords all map to the same kind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Unable to authenticate with provided credentials.")]
    InvalidCredentials,
}

/// Failures raised by storage adapters
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Password hashing failures
#[derive(Error, Debug)]
pub enum HashingError {
    #[error("invalid hasher parameters: {0}")]
    Params(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Hashing error: {0}")]
    Hashing(#[from] HashingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Authentication(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Hashing(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::Authentication(_) => "AUTH_001",
            AppError::InvalidToken => "AUTH_002",
            AppError::BadRequest(_) => "REQ_001",
            AppError::NotFound(_) => "NF_001",
            AppError::Storage(_) => "STORE_001",
            AppError::Hashing(_) => "HASH_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Invalid input provided".to_string(),
            AppError::Authentication(e) => e.to_string(),
            AppError::InvalidToken => "Invalid token.".to_string(),
            AppError::BadRequest(_) => "Invalid request format".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Storage(_) | AppError::Hashing(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }

    /// Validation failures collected for this error, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error.into())
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::DuplicateEmail(_) => ValidationError::DuplicateEmail.into(),
            StorageError::AccountNotFound(id) => AppError::NotFound(format!("account {id}")),
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Internal(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
                fields: self.field_errors().map(FieldErrors::to_messages),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}
