//! SQLite repository backend.
//!
//! # Design
//! Each `commit` runs all staged changes inside one SQLite transaction; a
//! failing statement rolls the whole batch back when the transaction drops.
//! `AUTOINCREMENT` keeps ids from being reused after deletion, including
//! across restarts.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{StoreError, StoreResult};
use crate::repository::{Change, TodoRepository};
use crate::types::{TodoId, TodoItem, TodoRecord};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todo_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT    NOT NULL CHECK (trim(title) <> ''),
    is_complete INTEGER NOT NULL DEFAULT 0
);
";

pub struct SqliteRepository {
    path: Option<PathBuf>,
    conn: Connection,
    staged: Vec<Change>,
}

impl SqliteRepository {
    /// Open (or create) a database file and bootstrap the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::StorageUnavailable(format!(
                        "cannot create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(Some(path), conn)
    }

    /// A private database that lives as long as this value.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(None, Connection::open_in_memory()?)
    }

    fn init(path: Option<PathBuf>, conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = ?path, "todo_items schema ready");
        Ok(Self {
            path,
            conn,
            staged: Vec::new(),
        })
    }

    /// Database file, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
        Ok(TodoItem {
            id: TodoId(row.get(0)?),
            title: row.get(1)?,
            is_complete: row.get(2)?,
        })
    }
}

impl TodoRepository for SqliteRepository {
    fn list(&self) -> StoreResult<Vec<TodoItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, is_complete FROM todo_items ORDER BY id")?;
        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, title, is_complete FROM todo_items WHERE id = ?1",
                params![id.0],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
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
        let staged = std::mem::take(&mut self.staged);
        let tx = self.conn.transaction()?;
        let mut inserted = Vec::new();

        for change in staged {
            match change {
                Change::Upsert(TodoRecord {
                    id: None,
                    title,
                    is_complete,
                }) => {
                    tx.execute(
                        "INSERT INTO todo_items (title, is_complete) VALUES (?1, ?2)",
                        params![title, is_complete],
                    )?;
                    inserted.push(TodoId(tx.last_insert_rowid()));
                }
                Change::Upsert(TodoRecord {
                    id: Some(id),
                    title,
                    is_complete,
                }) => {
                    tx.execute(
                        "INSERT INTO todo_items (id, title, is_complete) VALUES (?1, ?2, ?3)
                         ON CONFLICT(id) DO UPDATE SET
                             title = excluded.title,
                             is_complete = excluded.is_complete",
                        params![id.0, title, is_complete],
                    )?;
                }
                Change::Remove(id) => {
                    tx.execute("DELETE FROM todo_items WHERE id = ?1", params![id.0])?;
                }
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    fn pending(&self) -> usize {
        self.staged.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.upsert(TodoRecord::new("a")).unwrap();
        repo.upsert(TodoRecord::new("b")).unwrap();
        assert_eq!(repo.commit().unwrap(), vec![TodoId(1), TodoId(2)]);

        let titles: Vec<_> = repo.list().unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn find_missing_is_none() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert!(repo.find(TodoId(1)).unwrap().is_none());
    }

    #[test]
    fn failed_commit_leaves_nothing_behind() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.upsert(TodoRecord::new("kept")).unwrap();
        repo.upsert(TodoRecord::new("   ")).unwrap();

        let err = repo.commit().unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
        assert_eq!(repo.pending(), 0);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn file_database_survives_reopen_without_reusing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("todo.db");

        let deleted = {
            let mut repo = SqliteRepository::open(&path).unwrap();
            assert_eq!(repo.path(), Some(path.as_path()));
            repo.upsert(TodoRecord::new("first")).unwrap();
            repo.upsert(TodoRecord::new("second")).unwrap();
            let ids = repo.commit().unwrap();
            repo.remove(ids[1]).unwrap();
            repo.commit().unwrap();
            ids[1]
        };

        let mut repo = SqliteRepository::open(&path).unwrap();
        let items = repo.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "first");

        repo.upsert(TodoRecord::new("third")).unwrap();
        let id = repo.commit().unwrap()[0];
        assert!(id > deleted);
    }
}
