//! Client-side checks run before a draft is sent to the backend

use thiserror::Error;

/// A required field was empty or a value failed a shape check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the offending field
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Implemented by every create/update body.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fails when `value` is empty after trimming.
pub fn require(value: &str, field: &'static str, label: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{} is required!", label)));
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with characters on both sides.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
