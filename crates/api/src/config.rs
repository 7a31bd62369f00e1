use std::str::FromStr;

use places_cloud::{StorageConfig, StorageError};

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite URL (default: `sqlite://places.db?mode=rwc`).
    pub database_url: String,
    /// Pool size for file-backed databases (default: `10`).
    pub database_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body, which bounds photo uploads (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Container that receives photo uploads (default: `uploads`).
    pub upload_container: String,
    pub log_format: LogFormat,
    /// Object store provider settings.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                        |
    /// |----------------------------|--------------------------------|
    /// | `HOST`                     | `0.0.0.0`                      |
    /// | `PORT`                     | `3000`                         |
    /// | `DATABASE_URL`             | `sqlite://places.db?mode=rwc`  |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                           |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                           |
    /// | `MAX_UPLOAD_BYTES`         | `10485760`                     |
    /// | `UPLOAD_CONTAINER`         | `uploads`                      |
    /// | `LOG_FORMAT`               | `text`                         |
    ///
    /// Storage variables are documented on [`StorageConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&get, "PORT", 3000, "a valid u16")?;
        let database_url =
            get("DATABASE_URL").unwrap_or_else(|| "sqlite://places.db?mode=rwc".into());
        let database_max_connections =
            parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10, "a positive u32")?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DATABASE_MAX_CONNECTIONS",
                expected: "a positive u32",
                value: "0".into(),
            });
        }

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&get, "REQUEST_TIMEOUT_SECS", 30, "a valid u64")?;
        let max_upload_bytes =
            parse_or(&get, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024, "a valid byte count")?;
        let upload_container = get("UPLOAD_CONTAINER").unwrap_or_else(|| "uploads".into());

        let log_format = match get("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "'text' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        let storage = StorageConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            upload_container,
            log_format,
            storage,
        })
    }
}

fn parse_or<T, G>(
    get: &G,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
    }
}
