//! Domain types for the to-do list.
//!
//! # Design
//! `TodoItem` is the only persisted entity. `TodoForm` is its request-scoped
//! counterpart: the fields a submitter proposed, kept verbatim (including an
//! empty or missing title) so a rejected submission can be handed back
//! unchanged. `TodoRecord` is the row shape the repository stages; its `id` is
//! `None` until the repository assigns one at commit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a [`TodoItem`]. Never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        TodoId(id)
    }
}

/// A single stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub is_complete: bool,
}

/// Proposed fields for a new item, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub title: Option<String>,
}

impl TodoForm {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// A validation annotation attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Row shape staged through a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: Option<TodoId>,
    pub title: String,
    pub is_complete: bool,
}

impl TodoRecord {
    /// A row that does not exist yet; the repository assigns its id.
    pub fn new(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            is_complete: false,
        }
    }
}

impl From<TodoItem> for TodoRecord {
    fn from(item: TodoItem) -> Self {
        Self {
            id: Some(item.id),
            title: item.title,
            is_complete: item.is_complete,
        }
    }
}
