// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Registration input validation.

use accounts_common::RegisterRequest;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, FieldErrors, ValidationError};

const MAX_EMAIL_LENGTH: usize = 255;
const MAX_NAME_LENGTH: usize = 255;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(email)
}

/// Validate a display name
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name)
}

/// Validate a password. Length counts characters, not bytes.
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<&str> {
    if password.chars().count() < min_length {
        return Err(ValidationError::PasswordTooShort { min: min_length });
    }

    Ok(password)
}

/// Collect the failures of every registration field
pub fn registration_errors(req: &RegisterRequest, min_password_length: usize) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_email(&req.email) {
        errors.push(e);
    }
    if let Err(e) = validate_name(&req.name) {
        errors.push(e);
    }
    if let Err(e) = validate_password(&req.password, min_password_length) {
        errors.push(e);
    }

    errors
}

/// Check every registration field, reporting all failures at once
pub fn validate_registration(req: &RegisterRequest, min_password_length: usize) -> Result<(), AppError> {
    registration_errors(req, min_password_length).into_result()
}
