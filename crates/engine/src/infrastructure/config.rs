//! Engine configuration from environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::unit_of_work::DEFAULT_TRANSACTION_TIMEOUT;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 42731;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Postgres connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database: DatabaseConfig,
    /// `host:port` the HTTP server binds to.
    pub address: String,
    /// Upper bound for one transactional unit of work.
    pub transaction_timeout: Duration,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            get(key).map(|value| parse(key, &value)).transpose()
        };

        let database = DatabaseConfig {
            username: required("DB_USERNAME")?,
            password: required("DB_PASSWORD")?,
            database_name: required("DB_DATABASE_NAME")?,
            host: get("DB_URL").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            port: get("DB_PORT")
                .map(|value| parse("DB_PORT", &value))
                .transpose()?
                .unwrap_or(DEFAULT_DB_PORT),
            max_connections: get("DB_MAX_CONNECTIONS")
                .map(|value| parse("DB_MAX_CONNECTIONS", &value))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            connect_timeout: parsed("DB_CONNECT_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            query_timeout: parsed("DB_QUERY_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT),
        };

        Ok(Self {
            database,
            address: required("ADDRESS")?,
            transaction_timeout: parsed("TRANSACTION_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TRANSACTION_TIMEOUT),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
