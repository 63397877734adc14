//! # Input Validation
//!
//! Pure predicates deciding whether user input may leave the controller.
//! They are total over every `&str` and never touch the network.
//!
//! The checks are deliberately permissive: an email only needs to *look*
//! like an address. Real verification belongs to the subscription service.

use thiserror::Error;

/// Minimum trimmed length of a search term.
pub const MIN_SEARCH_LEN: usize = 2;

/// Why a submission was blocked locally.
///
/// These never reach the user as messages; the rendering layer shows them
/// as a disabled control.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search term must be at least {min} characters")]
    SearchTermTooShort { min: usize },
    #[error("Email address is malformed")]
    MalformedEmail,
}

/// Returns `true` iff the trimmed input has at least [`MIN_SEARCH_LEN`] characters.
pub fn is_valid_search_term(s: &str) -> bool {
    is_valid_search_term_with(s, MIN_SEARCH_LEN)
}

/// Same as [`is_valid_search_term`] with a configurable minimum.
///
/// Length is counted in characters, not bytes.
pub fn is_valid_search_term_with(s: &str, min: usize) -> bool {
    s.trim().chars().count() >= min
}

/// Returns `true` iff `s` is `local@domain` with exactly one `@` and both parts non-empty.
pub fn is_valid_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

pub fn check_search_term(s: &str, min: usize) -> Result<&str, ValidationError> {
    if is_valid_search_term_with(s, min) {
        Ok(s.trim())
    } else {
        Err(ValidationError::SearchTermTooShort { min })
    }
}

pub fn check_email(s: &str) -> Result<&str, ValidationError> {
    if is_valid_email(s) {
        Ok(s)
    } else {
        Err(ValidationError::MalformedEmail)
    }
}
