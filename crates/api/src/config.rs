//! Process configuration loaded once at startup.
//!
//! [`AppConfig::from_env`] is called from `main` after `dotenvy` has loaded a
//! `.env` file; the resulting struct is passed explicitly to everything that
//! needs it.

use std::str::FromStr;

/// Error raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            request_timeout_secs: 10,
        }
    }
}

/// Database connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

// The URL may embed a password.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .finish()
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives.
    pub filter: String,
    pub format: LogFormat,
}

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "proxyhub_api=debug,proxyhub_db=debug,tower_http=info";

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `8080`                                    |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                                      |
    /// | `DATABASE_URL`         | built from the `POSTGRES_*` variables     |
    /// | `POSTGRES_HOST`        | `localhost`                               |
    /// | `POSTGRES_PORT`        | `5432`                                    |
    /// | `POSTGRES_USER`        | `admin`                                   |
    /// | `POSTGRES_PASSWORD`    | `admin`                                   |
    /// | `POSTGRES_DB`          | `database`                                |
    /// | `RUST_LOG`             | [`DEFAULT_LOG_FILTER`]                    |
    /// | `LOG_FORMAT`           | `pretty` (`json` for JSON lines)          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", "u16", defaults.port)?,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                "positive u64",
                defaults.request_timeout_secs,
            )?,
        };
        if server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                expected: "positive u64",
                value: "0".to_string(),
            });
        }

        let url = match lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            Some(url) => url,
            None => {
                let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".into());
                let port: u16 = parse_or(&lookup, "POSTGRES_PORT", "u16", 5432)?;
                let user = lookup("POSTGRES_USER").unwrap_or_else(|| "admin".into());
                let password = lookup("POSTGRES_PASSWORD").unwrap_or_else(|| "admin".into());
                let name = lookup("POSTGRES_DB").unwrap_or_else(|| "database".into());
                format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode=disable")
            }
        };

        let format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    expected: "log format (pretty|json)",
                    value: other.to_string(),
                })
            }
        };
        let log = LogConfig {
            filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
            format,
        };

        Ok(Self {
            server,
            database: DatabaseConfig { url },
            log,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}
