use std::env;
use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("STORAGE_BACKEND must be `postgres` or `memory`, got `{0}`")]
    UnknownBackend(String),
    #[error("set DATABASE_URL, or DB_USER and DB_PASSWORD, to use the postgres backend")]
    MissingDatabase,
}

/// Where artworks are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Database location. Credentials never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Url(String),
    Credentials {
        user: String,
        password: String,
        host: String,
        port: u16,
        name: String,
    },
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            DatabaseConfig::Url(url) => PgConnectOptions::from_str(url),
            DatabaseConfig::Credentials {
                user,
                password,
                host,
                port,
                name,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(name)),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConfig::Url(_) => f.write_str("Url(<redacted>)"),
            DatabaseConfig::Credentials {
                user,
                host,
                port,
                name,
                ..
            } => f
                .debug_struct("Credentials")
                .field("user", user)
                .field("host", host)
                .field("port", port)
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    pub storage_backend: StorageBackend,
    /// Required when `storage_backend` is postgres.
    pub database: Option<DatabaseConfig>,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Largest accepted request body.
    pub body_limit_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup, applying defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_backend = match get("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Postgres,
        };

        let database = match (get("DATABASE_URL"), get("DB_USER"), get("DB_PASSWORD")) {
            (Some(url), _, _) => Some(DatabaseConfig::Url(url)),
            (None, Some(user), Some(password)) => Some(DatabaseConfig::Credentials {
                user,
                password,
                host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&get, "DB_PORT", 5432, "port number")?,
                name: get("DB_NAME").unwrap_or_else(|| "artworks".to_string()),
            }),
            _ => None,
        };
        if storage_backend == StorageBackend::Postgres && database.is_none() {
            return Err(ConfigError::MissingDatabase);
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 5000, "port number")?,
            storage_backend,
            database,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 20, "u32")?,
            db_min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", 1, "u32")?,
            body_limit_bytes: parse_or(&get, "BODY_LIMIT_BYTES", 1024 * 1024, "byte count")?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
            expected,
        }),
    }
}
