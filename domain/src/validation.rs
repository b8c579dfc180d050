//! Input checks for ticket fields.

use crate::error::DomainError;

/// Longest accepted ticket title, in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// Title must be non-blank and, once trimmed, at most [`MAX_TITLE_LENGTH`]
/// characters
///
/// # Errors
///
/// Returns [`DomainError::InvalidArgument`] describing the violation.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::invalid_argument("title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::invalid_argument(format!(
            "title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Priority is free text but must not be blank
///
/// # Errors
///
/// Returns [`DomainError::InvalidArgument`] for a blank priority.
pub fn validate_priority(priority: &str) -> Result<(), DomainError> {
    if priority.trim().is_empty() {
        return Err(DomainError::invalid_argument("priority cannot be empty"));
    }
    Ok(())
}
