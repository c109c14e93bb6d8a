//! Email normalization.

/// Lower-case the domain part of `email`, keeping the local part verbatim.
///
/// Surrounding whitespace is trimmed. The split happens at the last `@`;
/// input without one is returned trimmed and otherwise unchanged.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}
