use std::str::FromStr;

use pis_core::config::{env_or, env_parse, ConfigError};
use sqlx::postgres::PgConnectOptions;

/// Database connection settings.
///
/// | Env Var                   | Default     |
/// |---------------------------|-------------|
/// | `DATABASE_URL`            | unset       |
/// | `DB_HOST`                 | `127.0.0.1` |
/// | `DB_PORT`                 | `5432`      |
/// | `DB_USER`                 | `postgres`  |
/// | `DB_PASSWORD`             | `postgres`  |
/// | `DB_DATABASE`             | `pis`       |
/// | `DB_MAX_CONNECTIONS`      | `50`        |
/// | `DB_CONNECT_TIMEOUT_SECS` | `30`        |
/// | `DB_QUEUE_LIMIT`          | `100`       |
///
/// When `DATABASE_URL` is set it wins over the individual `DB_*` parts.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection.
    pub connect_timeout_secs: u64,
    /// Requests allowed to wait for a connection beyond `max_connections`.
    pub queue_limit: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "127.0.0.1".into(),
            port: 5432,
            user: "postgres".into(),
            password: "postgres".into(),
            database: "pis".into(),
            max_connections: 50,
            connect_timeout_secs: 30,
            queue_limit: 100,
        }
    }
}

impl DbConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            host: env_or("DB_HOST", &defaults.host),
            port: env_parse("DB_PORT", defaults.port, "u16")?,
            user: env_or("DB_USER", &defaults.user),
            password: env_or("DB_PASSWORD", &defaults.password),
            database: env_or("DB_DATABASE", &defaults.database),
            max_connections: env_parse("DB_MAX_CONNECTIONS", defaults.max_connections, "u32")?,
            connect_timeout_secs: env_parse(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
                "u64",
            )?,
            queue_limit: env_parse("DB_QUEUE_LIMIT", defaults.queue_limit, "u32")?,
        })
    }

    /// Build connection options from the URL, or from the parts when no URL is set.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }

    /// Requests that may be in flight at once: every pooled connection busy
    /// plus the bounded wait queue.
    pub fn admission_limit(&self) -> usize {
        (self.max_connections as usize).saturating_add(self.queue_limit as usize)
    }
}
