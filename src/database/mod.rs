// ABOUTME: SQLite database management: connection pool, schema migration, and domain managers
// ABOUTME: Stores recipes, units, quantities, ingredients, and their associations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! # Database Management
//!
//! The `Database` owns the `SQLite` pool and hands out one manager per table
//! family. Managers are cheap to construct (the pool is reference counted) and
//! hold no state of their own.

/// Ingredient storage and cook usage counters
pub mod ingredients;
/// Quantity values
pub mod quantities;
/// Recipe-ingredient associations and the upsert transaction
pub mod recipe_ingredients;
/// Recipe storage and listing queries
pub mod recipes;
/// Measurement units
pub mod units;

pub use ingredients::IngredientsManager;
pub use quantities::QuantitiesManager;
pub use recipe_ingredients::RecipeIngredientsManager;
pub use recipes::{ListRecipesFilter, RecipesManager};
pub use units::UnitsManager;

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::logging::AppLogger;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// Database manager for the recipe catalog
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (and create if missing) the database described by `config`
    ///
    /// In-memory databases use a single long-lived connection so every caller
    /// sees the same data. File databases run in WAL mode with the configured
    /// busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let (options, pool_options) = match &config.url {
            DatabaseUrl::Memory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| DatabaseError::from_sqlx("parse in-memory database url", e))?;
                let pool_options = SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                (options, pool_options)
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);
                let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
                (options, pool_options)
            }
        };

        let options = options
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout());

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::from_sqlx("connect to database", e))?;

        let db = Self { pool };

        if config.auto_migrate {
            db.migrate().await?;
        }

        info!(url = %config.url, "Database ready");
        Ok(db)
    }

    /// Open a fresh in-memory database with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseConfig::in_memory()).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe operations
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Unit operations
    #[must_use]
    pub fn units(&self) -> UnitsManager {
        UnitsManager::new(self.pool.clone())
    }

    /// Quantity operations
    #[must_use]
    pub fn quantities(&self) -> QuantitiesManager {
        QuantitiesManager::new(self.pool.clone())
    }

    /// Ingredient operations
    #[must_use]
    pub fn ingredients(&self) -> IngredientsManager {
        IngredientsManager::new(self.pool.clone())
    }

    /// Association operations
    #[must_use]
    pub fn recipe_ingredients(&self) -> RecipeIngredientsManager {
        RecipeIngredientsManager::new(self.pool.clone())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("ping database", e))?;
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        debug!("Applying catalog schema");
        let started = Instant::now();

        let result = match self.migrate_catalog().await {
            Ok(()) => self.migrate_recipe_ingredients().await,
            Err(e) => Err(e),
        };

        AppLogger::log_database_operation(
            "migrate",
            "recipe_ingredients",
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );
        result
    }

    /// Create the four independent catalog tables
    async fn migrate_catalog(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE CHECK (length(title) BETWEEN 1 AND 200),
                description TEXT,
                pub_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create recipes table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_pub_date ON recipes(pub_date)")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("create recipes index", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS units (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                unit TEXT NOT NULL UNIQUE CHECK (length(unit) BETWEEN 1 AND 10),
                description TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create units table", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS qtys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create qtys table", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK (length(name) BETWEEN 1 AND 200),
                times_used INTEGER NOT NULL DEFAULT 0 CHECK (times_used >= 0)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create ingredients table", e))?;

        Ok(())
    }

    /// Create the association table; every reference cascades on delete
    async fn migrate_recipe_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                unit_id INTEGER NOT NULL REFERENCES units(id) ON DELETE CASCADE,
                qty_id INTEGER NOT NULL REFERENCES qtys(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                CONSTRAINT unique_recipe_ingredient UNIQUE (recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create recipe_ingredients table", e))?;

        for (name, column) in [
            ("idx_recipe_ingredients_ingredient", "ingredient_id"),
            ("idx_recipe_ingredients_unit", "unit_id"),
            ("idx_recipe_ingredients_qty", "qty_id"),
        ] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {name} ON recipe_ingredients({column})"
            ))
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("create recipe_ingredients index", e))?;
        }

        Ok(())
    }
}

/// Encode a timestamp as fixed-width RFC 3339 so that text order matches time order
pub(crate) fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
pub(crate) fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime '{raw}': {e}")))
}
