//! Field-level checks shared by the aggregates.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::EMAIL_PATTERN;
use crate::error::{DomainError, DomainResult};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(DomainError::NoValidMail)
    }
}

/// Whitespace-only text counts as empty.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `Err(err)` when `value` is blank.
pub fn require_text(value: &str, err: DomainError) -> DomainResult<()> {
    if is_blank(value) {
        Err(err)
    } else {
        Ok(())
    }
}

/// Same as [`require_text`] for optional fields; `None` is blank.
pub fn require_some_text(value: Option<&str>, err: DomainError) -> DomainResult<()> {
    require_text(value.unwrap_or_default(), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("vet@clinic.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@host"));
        assert!(!is_valid_email("user@host.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("Rex", DomainError::NoValidPetName).is_ok());
        assert_eq!(
            require_text("   ", DomainError::NoValidPetName),
            Err(DomainError::NoValidPetName)
        );
        assert_eq!(
            require_some_text(None, DomainError::NotValidResult),
            Err(DomainError::NotValidResult)
        );
    }
}
