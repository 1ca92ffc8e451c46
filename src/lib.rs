// ABOUTME: Main library entry point for the recipe book service
// ABOUTME: Exposes the catalog store, kitchen operations, HTML pages, and the admin API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

#![deny(unsafe_code)]

//! # Recipe Book
//!
//! A small recipe catalog served over HTTP. Recipes reference ingredients
//! with a quantity and a unit; cooking a recipe counts how often each
//! ingredient has been used.
//!
//! ## Operations
//!
//! - **Add product**: set the amount and unit of an ingredient in a recipe,
//!   creating or updating the single association row for that pair
//! - **Cook**: increment the usage counter of every ingredient of a recipe
//! - **Without product**: list recipes lacking at least 10 g of an ingredient
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_book::config::ServerConfig;
//! use recipe_book::database::Database;
//! use recipe_book::server::{RecipeBookServer, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     RecipeBookServer::new(resources).run().await
//! }
//! ```

/// Environment-based configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage and per-table managers
pub mod database;

/// Error types shared across the crate
pub mod errors;

/// Logging setup and structured event helpers
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Domain services
pub mod services;

/// HTML page rendering
pub mod templates;

pub use recipe_core::models;
