// models/src/errors.rs

pub use thiserror::Error;

use crate::medical::RiskLevel;

/// Errors raised by the in-memory stores.
///
/// A missing record is not an error: lookups return `Option` and deletes
/// return `bool`. Only rejected input reaches this type.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// An identifier has an invalid length.
    #[error("identifier has invalid length")]
    InvalidIdentifierLength,
    /// A required text field was empty or blank.
    #[error("required field '{0}' is missing or blank")]
    RequiredFieldMissing(&'static str),
    /// The email address is not plausibly an address.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),
    /// Analysis confidence must lie within [0, 1].
    #[error("confidence {0} is outside the range [0, 1]")]
    ConfidenceOutOfRange(f64),
    /// Medium and high risk results must be flagged for follow-up.
    #[error("risk level '{0}' requires follow-up")]
    FollowUpRequired(RiskLevel),
    /// An analysis needs at least one image to refer to.
    #[error("analysis must reference at least one image file")]
    MissingImageFiles,
    /// A price was negative or not a finite number.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
    /// A duration of zero minutes.
    #[error("duration must be greater than zero minutes")]
    InvalidDuration,
}

/// A type alias for a `Result` that returns a `StoreError` on failure.
pub type StoreResult<T> = Result<T, StoreError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks that a text field has content beyond whitespace.
pub fn require_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing(field));
    }
    Ok(())
}

/// Checks that an email is non-blank and has a local part and a domain.
pub fn require_email(value: &str) -> ValidationResult<()> {
    require_text("email", value)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(require_text("name", "   "), Err(ValidationError::RequiredFieldMissing("name")));
        assert!(require_text("name", "Ana").is_ok());
    }

    #[test]
    fn email_needs_both_sides_of_the_at_sign() {
        assert!(require_email("maria.silva@email.com").is_ok());
        assert_eq!(
            require_email("maria.silva"),
            Err(ValidationError::InvalidEmail("maria.silva".to_string()))
        );
        assert!(require_email("@email.com").is_err());
        assert!(require_email("maria@").is_err());
        assert_eq!(require_email(""), Err(ValidationError::RequiredFieldMissing("email")));
    }

    #[test]
    fn validation_error_converts_into_store_error() {
        let err: StoreError = ValidationError::InvalidDuration.into();
        assert_eq!(err.to_string(), "duration must be greater than zero minutes");
    }
}
