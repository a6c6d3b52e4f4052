//! Postgres storage

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;

use crate::todos::Todo;

use super::CreateTodoValues;
use super::DatabaseConfig;
use super::Error;
use super::Result;
use super::Storage;
use super::connection_error;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone, Debug)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Migrations will be run
    pub async fn connect(config: DatabaseConfig) -> Result<Self> {
        let connection_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options)
            .await
            .map_err(connection_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Migration(err.to_string()))?;

        tracing::debug!("Migrations are up to date");

        Ok(Self { connection_pool })
    }

    /// Get a dedicated connection for a single storage call
    ///
    /// The connection goes back to the pool when it is dropped
    async fn acquire(&self) -> Result<PoolConnection<sqlx::Postgres>> {
        self.connection_pool
            .acquire()
            .await
            .map_err(connection_error)
    }
}

impl Storage for Postgres {
    async fn create_todo(&self, values: &CreateTodoValues<'_>) -> Result<Todo> {
        let mut connection = self.acquire().await?;

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO todo (content)
            VALUES ($1)
            RETURNING id
            ",
        )
        .bind(values.content)
        .fetch_one(&mut *connection)
        .await
        .map_err(connection_error)?;

        // read back to get the values assigned by the database
        let todo = sqlx::query_as::<_, Todo>(
            r"
            SELECT id, content, created_at
            FROM todo
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_one(&mut *connection)
        .await
        .map_err(connection_error)?;

        Ok(todo)
    }

    async fn find_all_todos(&self) -> Result<Vec<Todo>> {
        let mut connection = self.acquire().await?;

        let todos = sqlx::query_as::<_, Todo>(
            r"
            SELECT id, content, created_at
            FROM todo
            ORDER BY id DESC
            ",
        )
        .fetch_all(&mut *connection)
        .await
        .map_err(connection_error)?;

        Ok(todos)
    }

    async fn delete_todo(&self, id: i64) -> Result<bool> {
        let mut connection = self.acquire().await?;

        let result = sqlx::query(
            r"
            DELETE FROM todo
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&mut *connection)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }
}
