//! HTTP surface for the to-do list.
//!
//! Routes follow the conventional `/{controller}/{action}/{id}` layout and
//! forward to `RequestHandler`. Outcomes are rendered as JSON documents or a
//! `303 See Other` back to the list.

pub mod config;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::Mutex};
use todo_core::{
    FieldError, InMemoryRepository, Outcome, RequestHandler, TodoForm, TodoId, TodoRepository,
    TodoStore, View,
};

pub const LIST_PATH: &str = "/todo";

pub type Handler = RequestHandler<Box<dyn TodoRepository>>;
pub type AppState = Arc<Mutex<Handler>>;

/// Wrap a repository in a store and handler ready to serve.
pub fn state(repo: Box<dyn TodoRepository>) -> AppState {
    Arc::new(Mutex::new(RequestHandler::new(TodoStore::new(repo))))
}

/// Router over a fresh in-memory store.
pub fn app() -> Router {
    router(state(Box::new(InMemoryRepository::new())))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_todos))
        .route(LIST_PATH, get(list_todos))
        .route("/todo/index", get(list_todos))
        .route("/todo/create", get(create_form).post(create_todo))
        .route(
            "/todo/togglecomplete/{id}",
            get(toggle_complete).post(toggle_complete),
        )
        .route("/todo/delete/{id}", get(delete_todo).post(delete_todo))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

/// Run store work off the async runtime; SQLite calls block.
async fn dispatch<F>(state: AppState, op: F) -> Response
where
    F: FnOnce(&mut Handler) -> Outcome + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let mut handler = state.blocking_lock();
        op(&mut handler)
    })
    .await;

    match result {
        Ok(outcome) => render(outcome),
        Err(err) => {
            tracing::error!(error = %err, "request task failed");
            error_response("internal error".to_string())
        }
    }
}

async fn list_todos(State(state): State<AppState>) -> Response {
    dispatch(state, |h| h.list()).await
}

async fn create_form(State(state): State<AppState>) -> Response {
    dispatch(state, |h| h.show_create_form()).await
}

async fn create_todo(State(state): State<AppState>, Form(form): Form<TodoForm>) -> Response {
    dispatch(state, move |h| h.submit_create(form)).await
}

async fn toggle_complete(State(state): State<AppState>, Path(id): Path<TodoId>) -> Response {
    dispatch(state, move |h| h.toggle_complete(id)).await
}

async fn delete_todo(State(state): State<AppState>, Path(id): Path<TodoId>) -> Response {
    dispatch(state, move |h| h.delete(id)).await
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Body of the create form, fresh or re-presented with errors.
#[derive(Debug, Serialize)]
pub struct FormPage {
    pub form: TodoForm,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub error: String,
}

pub fn render(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Success(View::List(items)) => Json(items).into_response(),
        Outcome::Success(View::CreateForm(form)) => Json(FormPage {
            form,
            errors: Vec::new(),
        })
        .into_response(),
        Outcome::Success(View::RedirectToList) => Redirect::to(LIST_PATH).into_response(),
        Outcome::ValidationFailure { form, errors } => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(FormPage { form, errors })).into_response()
        }
        Outcome::StorageFailure(err) => error_response(err.to_string()),
    }
}

fn error_response(error: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorPage { error })).into_response()
}
