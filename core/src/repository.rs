//! Persistence seam for the store.
//!
//! # Design
//! Writes are staged with `upsert` / `remove` and applied together by
//! `commit`, which is the only durable boundary. Reads (`list`, `find`) see
//! committed state only. Pending changes are dropped when a commit fails, so a
//! failed commit never leaves a partial write behind.

use crate::error::StoreResult;
use crate::types::{TodoId, TodoItem, TodoRecord};

/// A staged, uncommitted change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Upsert(TodoRecord),
    Remove(TodoId),
}

pub trait TodoRepository: Send {
    /// All committed items in id order.
    fn list(&self) -> StoreResult<Vec<TodoItem>>;

    fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>>;

    /// Stage an insert (`record.id == None`) or a full-row write by id.
    fn upsert(&mut self, record: TodoRecord) -> StoreResult<()>;

    /// Stage a removal. Removing an id that does not exist is a no-op.
    fn remove(&mut self, id: TodoId) -> StoreResult<()>;

    /// Apply every staged change atomically. Returns the ids assigned to
    /// staged inserts, in staging order.
    fn commit(&mut self) -> StoreResult<Vec<TodoId>>;

    /// Number of staged, uncommitted changes.
    fn pending(&self) -> usize;
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn list(&self) -> StoreResult<Vec<TodoItem>> {
        (**self).list()
    }

    fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        (**self).find(id)
    }

    fn upsert(&mut self, record: TodoRecord) -> StoreResult<()> {
        (**self).upsert(record)
    }

    fn remove(&mut self, id: TodoId) -> StoreResult<()> {
        (**self).remove(id)
    }

    fn commit(&mut self) -> StoreResult<Vec<TodoId>> {
        (**self).commit()
    }

    fn pending(&self) -> usize {
        (**self).pending()
    }
}
