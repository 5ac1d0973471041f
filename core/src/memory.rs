//! In-process repository backend.

use std::collections::BTreeMap;

use crate::error::StoreResult;
use crate::repository::{Change, TodoRepository};
use crate::types::{TodoId, TodoItem, TodoRecord};

/// Keeps committed items in a `BTreeMap`, so id order is insertion order.
/// Ids come from a counter that only moves forward.
#[derive(Debug)]
pub struct InMemoryRepository {
    items: BTreeMap<TodoId, TodoItem>,
    next_id: i64,
    staged: Vec<Change>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
            staged: Vec::new(),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository for InMemoryRepository {
    fn list(&self) -> StoreResult<Vec<TodoItem>> {
        Ok(self.items.values().cloned().collect())
    }

    fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        Ok(self.items.get(&id).cloned())
    }

    fn upsert(&mut self, record: TodoRecord) -> StoreResult<()> {
        self.staged.push(Change::Upsert(record));
        Ok(())
    }

    fn remove(&mut self, id: TodoId) -> StoreResult<()> {
        self.staged.push(Change::Remove(id));
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<Vec<TodoId>> {
        let mut inserted = Vec::new();
        for change in self.staged.drain(..) {
            match change {
                Change::Upsert(record) => {
                    let id = match record.id {
                        Some(id) => id,
                        None => {
                            let id = TodoId(self.next_id);
                            inserted.push(id);
                            id
                        }
                    };
                    self.next_id = self.next_id.max(id.0 + 1);
                    self.items.insert(
                        id,
                        TodoItem {
                            id,
                            title: record.title,
                            is_complete: record.is_complete,
                        },
                    );
                }
                Change::Remove(id) => {
                    self.items.remove(&id);
                }
            }
        }
        Ok(inserted)
    }

    fn pending(&self) -> usize {
        self.staged.len()
    }
}
