// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads server, database, and HTTP settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Configuration module for the Recipe Book server
//!
//! Configuration is environment-only. Binaries may override individual values
//! from command-line flags after loading.

/// Database connection and transaction settings
pub mod database;
/// Server configuration assembled from the environment
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{Environment, HttpConfig, LogLevel, ServerConfig};
