use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::storage::CreateTodoValues;
use crate::storage::Storage;
use crate::todos::Todo;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_content;

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl TodoResponse {
    fn from_todo(todo: Todo) -> Self {
        Self {
            id: todo.id,
            content: todo.content,
            created_at: todo.created_at,
        }
    }

    fn from_todo_multiple(todos: Vec<Todo>) -> Vec<Self> {
        todos.into_iter().map(Self::from_todo).collect::<Vec<Self>>()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
) -> Result<Success<Vec<TodoResponse>>, Error> {
    let todos = storage
        .find_all_todos()
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Found {} todos", todos.len());

    Ok(Success::ok(TodoResponse::from_todo_multiple(todos)))
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoForm {
    content: Option<String>,
}

pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateTodoForm>,
) -> Result<Success<TodoResponse>, Error> {
    let content = parse_content(form.content)?;

    let values = CreateTodoValues { content: &content };

    let todo = storage
        .create_todo(&values)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::info!("Created todo {}", todo.id);

    Ok(Success::ok(TodoResponse::from_todo(todo)))
}

pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(todo_id): PathParameters<i64>,
) -> Result<Success<MessageResponse>, Error> {
    let deleted = storage
        .delete_todo(todo_id)
        .await
        .map_err(Error::internal_server_error)?;

    if !deleted {
        return Err(Error::not_found("Todo not found"));
    }

    tracing::info!("Deleted todo {todo_id}");

    Ok(Success::ok(MessageResponse {
        message: "Todo deleted",
    }))
}
