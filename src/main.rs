#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Context;
use anyhow::Result;
use axum::Extension;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::DefaultMakeSpan;
use tower_http::trace::DefaultOnResponse;
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::storage::Memory;
use crate::storage::Postgres;
use crate::storage::Storage;
use crate::storage::StorageConfig;
use crate::utils::env_var;

mod api;
mod config;
mod fallback;
mod graceful_shutdown;
mod storage;
#[cfg(test)]
mod tests;
mod todos;
mod utils;

const DEFAULT_RUST_LOG: &str = "todos=debug,tower_http=debug";
const LOG_FILE_PREFIX: &str = "app";
const LOG_FILE_SUFFIX: &str = "log";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();

    let config = Config::from_env()?;

    // flushes the file log when dropped, keep it until the end
    let _log_guard = setup_tracing(&config)?;

    let address = config.address;

    let app = setup_app(config.storage).await?;

    let listener = TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage fails to load:
/// - Database connection
/// - Migrations
pub async fn setup_app(config: StorageConfig) -> Result<Router> {
    let router = match config {
        StorageConfig::Postgres(database_config) => {
            tracing::info!("Using Postgres storage");
            create_router(Postgres::connect(database_config).await?)
        }
        StorageConfig::ExistingConnection(pool) => {
            create_router(Postgres::new_with_pool(pool).await?)
        }
        StorageConfig::Memory => {
            tracing::warn!("Using memory storage, todos are lost on shutdown");
            create_router(Memory::new())
        }
    };

    Ok(router)
}

/// Create the router for the todos
fn create_router<S: Storage>(storage: S) -> Router {
    Router::new()
        .merge(router::<S>())
        .fallback(fallback::fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(Extension(storage))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

/// Log to the console and to a rotating file
fn setup_tracing(config: &Config) -> Result<WorkerGuard> {
    use tracing_appender::rolling::RollingFileAppender;
    use tracing_appender::rolling::Rotation;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.log_max_files)
        .build(&config.log_directory)
        .with_context(|| {
            format!(
                "Could not setup log files in {}",
                config.log_directory.display()
            )
        })?;

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    registry()
        .with(EnvFilter::new(
            env_var("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}
