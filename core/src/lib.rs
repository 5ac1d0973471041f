//! Store and request handling for a minimal to-do list.
//!
//! # Overview
//! `TodoStore` owns the persisted collection of `TodoItem`s and exposes
//! list / create / find / toggle / delete. `RequestHandler` sits in front of
//! it, validates input and turns every request into an explicit `Outcome`
//! that a web layer can dispatch on.
//!
//! # Design
//! - Persistence goes through the `TodoRepository` trait: staged `upsert` /
//!   `remove` plus a `commit` boundary. `InMemoryRepository` and
//!   `SqliteRepository` implement it.
//! - A missing id is `None` / `false`, never an error.
//! - Storage failures surface as `StoreError::StorageUnavailable` and are
//!   never retried here.

pub mod error;
pub mod handler;
pub mod memory;
pub mod repository;
pub mod sqlite;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{StoreError, StoreResult, ValidationError};
pub use handler::{Outcome, RequestHandler, View};
pub use memory::InMemoryRepository;
pub use repository::{Change, TodoRepository};
pub use sqlite::SqliteRepository;
pub use store::TodoStore;
pub use types::{FieldError, TodoForm, TodoId, TodoItem, TodoRecord};
