//! CRUD operations over the to-do collection.
//!
//! # Design
//! Every mutation stages exactly one record and commits it, so no operation
//! can leave a half-written item visible. Toggle is a read followed by a
//! write of the same row; two toggles racing on one id resolve last write
//! wins.

use crate::error::{StoreError, StoreResult};
use crate::repository::TodoRepository;
use crate::types::{TodoId, TodoItem, TodoRecord};
use crate::validation::check_title;

/// Sole owner of the persisted to-do collection.
pub struct TodoStore<R> {
    repo: R,
}

impl<R: TodoRepository> TodoStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_all(&self) -> StoreResult<Vec<TodoItem>> {
        self.repo.list()
    }

    /// Persist a new open item. The title rule is checked again here so the
    /// store never depends on callers having validated.
    pub fn create(&mut self, title: &str) -> StoreResult<TodoItem> {
        check_title(title)?;

        self.repo.upsert(TodoRecord::new(title))?;
        let ids = self.repo.commit()?;
        let id = ids.first().copied().ok_or_else(|| {
            StoreError::StorageUnavailable("commit did not assign an id".to_string())
        })?;

        tracing::debug!(%id, "created todo item");
        Ok(TodoItem {
            id,
            title: title.to_string(),
            is_complete: false,
        })
    }

    pub fn find_by_id(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        self.repo.find(id)
    }

    /// Flip `is_complete`. `None` when the id does not exist; nothing is
    /// written in that case.
    pub fn toggle_complete(&mut self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        let Some(mut item) = self.repo.find(id)? else {
            tracing::debug!(%id, "toggle on missing todo item");
            return Ok(None);
        };

        item.is_complete = !item.is_complete;
        self.repo.upsert(TodoRecord::from(item.clone()))?;
        self.repo.commit()?;

        tracing::debug!(%id, is_complete = item.is_complete, "toggled todo item");
        Ok(Some(item))
    }

    /// Returns whether an item was removed.
    pub fn delete(&mut self, id: TodoId) -> StoreResult<bool> {
        if self.repo.find(id)?.is_none() {
            tracing::debug!(%id, "delete on missing todo item");
            return Ok(false);
        }

        self.repo.remove(id)?;
        self.repo.commit()?;

        tracing::debug!(%id, "deleted todo item");
        Ok(true)
    }
}
