// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Handles connection URLs, pool sizing, busy timeout, and transaction retry settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::constants::database as db_defaults;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names an unsupported backend or an empty path
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Err(AppError::config(
                "Only SQLite databases are supported (DATABASE_URL=sqlite:<path>)",
            ));
        }

        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        match path_str {
            ":memory:" => Ok(Self::Memory),
            "" => Err(AppError::config("DATABASE_URL has an empty path")),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(db_defaults::DEFAULT_DATABASE_PATH),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and transaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Create the schema on startup
    pub auto_migrate: bool,
    /// Maximum number of pooled connections (in-memory databases always use one)
    pub max_connections: u32,
    /// How long a statement waits for a competing writer before failing
    pub busy_timeout_ms: u64,
    /// Attempts for a transaction that fails because the store is busy
    pub transaction_retries: u32,
    /// Delay before the first retry; doubles on every further attempt
    pub retry_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            auto_migrate: true,
            max_connections: db_defaults::DEFAULT_MAX_CONNECTIONS,
            busy_timeout_ms: db_defaults::DEFAULT_BUSY_TIMEOUT_MS,
            transaction_retries: db_defaults::DEFAULT_TRANSACTION_RETRIES,
            retry_delay_ms: db_defaults::DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            ..Self::default()
        }
    }

    /// Configuration for a database file at `path`
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            url: DatabaseUrl::SQLite { path: path.into() },
            ..Self::default()
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if database environment variables are invalid
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            url: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                &DatabaseUrl::default().to_connection_string(),
            ))?,
            auto_migrate: parse_env("AUTO_MIGRATE", true)?,
            max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                db_defaults::DEFAULT_MAX_CONNECTIONS,
            )?,
            busy_timeout_ms: parse_env(
                "DATABASE_BUSY_TIMEOUT_MS",
                db_defaults::DEFAULT_BUSY_TIMEOUT_MS,
            )?,
            transaction_retries: parse_env(
                "DATABASE_TX_RETRIES",
                db_defaults::DEFAULT_TRANSACTION_RETRIES,
            )?,
            retry_delay_ms: parse_env(
                "DATABASE_TX_RETRY_DELAY_MS",
                db_defaults::DEFAULT_RETRY_DELAY_MS,
            )?,
        })
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is empty or retries are disabled entirely
    pub fn validate(&self) -> AppResult<()> {
        if self.max_connections == 0 {
            return Err(AppError::config("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }
        if self.transaction_retries == 0 {
            return Err(AppError::config("DATABASE_TX_RETRIES must be at least 1"));
        }
        Ok(())
    }

    /// Busy timeout as a `Duration`
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// First retry delay as a `Duration`
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Read an environment variable with a default
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
pub(crate) fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
