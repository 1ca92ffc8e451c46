// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Environment-based configuration management for production deployment

use super::database::{env_var_or, parse_env, DatabaseConfig};
use crate::constants::{http, ports};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(label)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Automated tests
    Testing,
    /// Production deployment
    Production,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production deployment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        };
        f.write_str(label)
    }
}

/// HTTP listener and middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Comma-separated allowed CORS origins, or `*`
    pub cors_allowed_origins: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: ports::DEFAULT_HTTP_HOST.to_owned(),
            port: ports::DEFAULT_HTTP_PORT,
            request_timeout_secs: http::DEFAULT_REQUEST_TIMEOUT_SECS,
            cors_allowed_origins: "*".to_owned(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Complete server configuration
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// HTTP settings
    pub http: HttpConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Bearer token required by the admin API; `None` leaves it open
    #[serde(skip_serializing)]
    pub admin_token: Option<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("http", &self.http)
            .field("database", &self.database)
            .field(
                "admin_token",
                &self.admin_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value of the wrong type or the
    /// resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            http: HttpConfig {
                host: env_var_or("HTTP_HOST", ports::DEFAULT_HTTP_HOST),
                port: parse_env("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
                request_timeout_secs: parse_env(
                    "REQUEST_TIMEOUT_SECS",
                    http::DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
                cors_allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            database: DatabaseConfig::from_env()?,
            admin_token: env::var("ADMIN_TOKEN")
                .ok()
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range
    pub fn validate(&self) -> AppResult<()> {
        if self.http.port == 0 {
            return Err(AppError::config("HTTP_PORT must not be 0"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(AppError::config("REQUEST_TIMEOUT_SECS must be at least 1"));
        }
        if self.environment.is_production() && self.admin_token.is_none() {
            return Err(AppError::config(
                "ADMIN_TOKEN is required when ENVIRONMENT=production",
            ));
        }
        self.database.validate()
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Book Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Pool Size: {}\n\
             - Busy Timeout: {}ms\n\
             - Transaction Attempts: {}\n\
             - Admin API: {}",
            self.environment,
            self.http.host,
            self.http.port,
            self.log_level,
            self.database.url,
            self.database.max_connections,
            self.database.busy_timeout_ms,
            self.database.transaction_retries,
            if self.admin_token.is_some() {
                "token required"
            } else {
                "open"
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_production_requires_admin_token() {
        let mut config = ServerConfig {
            environment: Environment::Production,
            database: DatabaseConfig::in_memory(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        config.admin_token = Some("s3cret".to_owned());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_admin_token() {
        let config = ServerConfig {
            admin_token: Some("s3cret".to_owned()),
            ..ServerConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
