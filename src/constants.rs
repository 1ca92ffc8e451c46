// ABOUTME: System-wide constants and configuration defaults for the Recipe Book server
// ABOUTME: Re-exports catalog rules from recipe-core and adds server and database defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! # Constants Module
//!
//! Hardcoded defaults for values that environment variables can override,
//! plus the catalog constants defined in `recipe-core`.

pub use recipe_core::constants::{adequacy, limits, publishing};

/// Service identity used in logs
pub mod service_names {
    /// Default service name
    pub const RECIPE_BOOK_SERVER: &str = "recipe-book-server";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
}

/// Database defaults
pub mod database {
    /// Default database file location
    pub const DEFAULT_DATABASE_PATH: &str = "./data/recipes.db";
    /// Default pool size for file databases
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    /// Default `SQLite` busy timeout in milliseconds
    pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
    /// Default attempts for busy transactions
    pub const DEFAULT_TRANSACTION_RETRIES: u32 = 3;
    /// Default first retry delay in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 25;
}

/// HTTP behaviour defaults
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Header carrying the request correlation id
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}
