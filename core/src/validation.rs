//! The "title is required" rule, shared by the request handler and the store.

use crate::error::ValidationError;
use crate::types::{FieldError, TodoForm};

pub const TITLE_FIELD: &str = "title";
pub const TITLE_REQUIRED: &str = "The Title field is required.";

/// A title counts as present when it has at least one non-whitespace char.
pub fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Validate a submitted form, returning the accepted title or the field
/// annotations to send back with the unchanged form.
pub fn validate_form(form: &TodoForm) -> Result<String, Vec<FieldError>> {
    let title = form.title.as_deref().unwrap_or("");
    match check_title(title) {
        Ok(()) => Ok(title.to_string()),
        Err(ValidationError::EmptyTitle) => Err(vec![FieldError::new(TITLE_FIELD, TITLE_REQUIRED)]),
    }
}
