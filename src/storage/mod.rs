//! All things related to the storage of todos

use core::fmt;
use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgConnectOptions;

pub use Config as StorageConfig;
pub use memory::Memory;
pub use postgres::Postgres;

use crate::todos::Todo;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),

    /// The migrations could not run
    Migration(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::Migration(error) => write!(f, "Migration error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage configuration
#[derive(Debug)]
pub enum Config {
    /// Connect to Postgres with the given settings
    Postgres(DatabaseConfig),

    /// Use existing connection pool
    ExistingConnection(PgPool),

    /// Keep everything in memory
    Memory,
}

/// Postgres connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where and how to connect
    pub connect_options: PgConnectOptions,

    /// Size of the connection pool
    pub max_connections: u32,

    /// How long a request waits for a free connection
    pub acquire_timeout: Duration,
}

/// Values to create a Todo
pub struct CreateTodoValues<'a> {
    /// Content of the todo, never empty
    pub content: &'a str,
}

/// Storage with all supported operations
pub trait Storage: Clone + Send + Sync + 'static {
    /// Create a todo
    ///
    /// The storage assigns the ID and creation date
    fn create_todo(
        &self,
        values: &CreateTodoValues<'_>,
    ) -> impl Future<Output = Result<Todo>> + Send;

    /// Find all todos, highest ID first
    fn find_all_todos(&self) -> impl Future<Output = Result<Vec<Todo>>> + Send;

    /// Delete a todo
    ///
    /// Returns `false` when there was no todo with this ID
    fn delete_todo(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;
}

/// Convert any storage library error to a storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
