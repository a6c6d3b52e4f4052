//! Process configuration
//!
//! Built once at startup from the environment and handed to whatever needs it

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use sqlx::postgres::PgConnectOptions;

use crate::storage::DatabaseConfig;
use crate::storage::StorageConfig;
use crate::utils::env_var;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_HOST: &str = "localhost";
const DEFAULT_DATABASE_PORT: u16 = 5432;
const DEFAULT_DATABASE_USER: &str = "postgres";
const DEFAULT_DATABASE_NAME: &str = "todos";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECONDS: u64 = 3;
const DEFAULT_LOG_DIRECTORY: &str = "logs";
const DEFAULT_LOG_MAX_FILES: usize = 5;

/// Configuration of the whole process
#[derive(Debug)]
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Where the todos are kept
    pub storage: StorageConfig,

    /// Directory of the rotating log files
    pub log_directory: PathBuf,

    /// Number of rotated log files to keep around
    pub log_max_files: usize,
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when a variable is set to something unparseable
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_var)
    }

    /// Read the configuration with a custom variable lookup
    ///
    /// Empty values are treated as unset
    fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut address: SocketAddr = parse_or(&lookup, "ADDRESS", || DEFAULT_ADDRESS.parse())?;

        // optional override of just the port
        if let Some(port) = parse_optional::<u16>(&lookup, "PORT")? {
            address.set_port(port);
        }

        let storage = match lookup("STORAGE").as_deref() {
            None | Some("postgres") => StorageConfig::Postgres(database_config(&lookup)?),
            Some("memory") => StorageConfig::Memory,
            Some(other) => bail!("Unknown `STORAGE`: {other}, expected `postgres` or `memory`"),
        };

        let log_directory = lookup("LOG_DIRECTORY")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_DIRECTORY), PathBuf::from);

        let log_max_files =
            parse_optional(&lookup, "LOG_MAX_FILES")?.unwrap_or(DEFAULT_LOG_MAX_FILES);

        Ok(Self {
            address,
            storage,
            log_directory,
            log_max_files,
        })
    }
}

/// Postgres settings, either a full `DATABASE_URL` or the separate parts
fn database_config<L>(lookup: &L) -> Result<DatabaseConfig>
where
    L: Fn(&str) -> Option<String>,
{
    let connect_options = if let Some(url) = lookup("DATABASE_URL") {
        PgConnectOptions::from_str(&url).context("Invalid `DATABASE_URL`")?
    } else {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&lookup("DATABASE_HOST").unwrap_or_else(|| DEFAULT_DATABASE_HOST.into()))
            .port(parse_optional(lookup, "DATABASE_PORT")?.unwrap_or(DEFAULT_DATABASE_PORT))
            .username(&lookup("DATABASE_USER").unwrap_or_else(|| DEFAULT_DATABASE_USER.into()))
            .database(&lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.into()));

        if let Some(password) = lookup("DATABASE_PASSWORD") {
            options = options.password(&password);
        }

        options
    };

    let max_connections =
        parse_optional(lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let acquire_timeout = parse_optional(lookup, "DATABASE_ACQUIRE_TIMEOUT")?
        .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECONDS);

    Ok(DatabaseConfig {
        connect_options,
        max_connections,
        acquire_timeout: Duration::from_secs(acquire_timeout),
    })
}

fn parse_optional<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("Invalid `{name}`: {value}"))
        })
        .transpose()
}

fn parse_or<T, D>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: D) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    D: FnOnce() -> Result<T, T::Err>,
{
    match parse_optional(lookup, name)? {
        Some(value) => Ok(value),
        None => Ok(default()?),
    }
}
