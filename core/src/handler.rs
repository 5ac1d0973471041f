//! Request handling on top of `TodoStore`.
//!
//! # Design
//! Handlers never return `Result`. Each request ends in one `Outcome`:
//! a view to present, the rejected form with its annotations, or the storage
//! error that stopped it. Mutations end in `View::RedirectToList` whether or
//! not their id existed, so callers get no "not found" signal.

use crate::error::StoreError;
use crate::repository::TodoRepository;
use crate::store::TodoStore;
use crate::types::{FieldError, TodoForm, TodoId, TodoItem};
use crate::validation::validate_form;

/// What a successful request asks the presentation layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List(Vec<TodoItem>),
    CreateForm(TodoForm),
    RedirectToList,
}

#[derive(Debug)]
pub enum Outcome {
    Success(View),
    /// The submitted form, unchanged, plus what was wrong with it.
    ValidationFailure {
        form: TodoForm,
        errors: Vec<FieldError>,
    },
    StorageFailure(StoreError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

pub struct RequestHandler<R> {
    store: TodoStore<R>,
}

impl<R: TodoRepository> RequestHandler<R> {
    pub fn new(store: TodoStore<R>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TodoStore<R> {
        &self.store
    }

    pub fn list(&self) -> Outcome {
        match self.store.list_all() {
            Ok(items) => Outcome::Success(View::List(items)),
            Err(err) => storage_failure("list", err),
        }
    }

    pub fn show_create_form(&self) -> Outcome {
        Outcome::Success(View::CreateForm(TodoForm::default()))
    }

    pub fn submit_create(&mut self, form: TodoForm) -> Outcome {
        let title = match validate_form(&form) {
            Ok(title) => title,
            Err(errors) => {
                tracing::warn!(?form, "rejected todo submission");
                return Outcome::ValidationFailure { form, errors };
            }
        };

        match self.store.create(&title) {
            Ok(_) => Outcome::Success(View::RedirectToList),
            Err(err) => storage_failure("create", err),
        }
    }

    pub fn toggle_complete(&mut self, id: TodoId) -> Outcome {
        match self.store.toggle_complete(id) {
            Ok(_) => Outcome::Success(View::RedirectToList),
            Err(err) => storage_failure("toggle", err),
        }
    }

    pub fn delete(&mut self, id: TodoId) -> Outcome {
        match self.store.delete(id) {
            Ok(_) => Outcome::Success(View::RedirectToList),
            Err(err) => storage_failure("delete", err),
        }
    }
}

fn storage_failure(op: &str, err: StoreError) -> Outcome {
    tracing::error!(op, error = %err, "todo store operation failed");
    Outcome::StorageFailure(err)
}
