//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::todos::Todo;

use super::CreateTodoValues;
use super::Result;
use super::Storage;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All todos in storage, together with the last handed out ID
    todos: Arc<Mutex<Todos>>,
}

#[derive(Debug, Default)]
struct Todos {
    /// Last assigned ID, IDs are never reused
    last_id: i64,

    /// All todos by ID
    by_id: BTreeMap<i64, Todo>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for Memory {
    async fn create_todo(&self, values: &CreateTodoValues<'_>) -> Result<Todo> {
        let mut todos = self.todos.lock().await;

        todos.last_id += 1;

        let todo = Todo {
            id: todos.last_id,
            content: values.content.to_string(),
            created_at: Utc::now().naive_utc(),
        };

        todos.by_id.insert(todo.id, todo.clone());

        Ok(todo)
    }

    async fn find_all_todos(&self) -> Result<Vec<Todo>> {
        Ok(self
            .todos
            .lock()
            .await
            .by_id
            .values()
            .rev()
            .cloned()
            .collect())
    }

    async fn delete_todo(&self, id: i64) -> Result<bool> {
        Ok(self.todos.lock().await.by_id.remove(&id).is_some())
    }
}
