//! Error types for the to-do store.
//!
//! # Design
//! A missing id is not an error anywhere in this crate: lookups return
//! `Option` and deletes return `bool`. What remains is the title rule and the
//! persistence layer failing to complete a read or a write.

use thiserror::Error;

/// Input rejected by the title rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
}

/// Errors returned by `TodoStore` and `TodoRepository` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The backing store could not complete a read or write. Never retried
    /// by this crate.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
