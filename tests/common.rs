// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, router, and catalog fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_book`

use anyhow::Result;
use axum::{body::Body, http::Request, Router};
use recipe_book::{
    config::{DatabaseConfig, ServerConfig},
    database::Database,
    models::{Ingredient, NewIngredient, NewQty, NewRecipe, NewUnit, Qty, Recipe, Unit},
    server::{RecipeBookServer, ServerResources},
    services::{KitchenService, RetryPolicy},
};
use std::path::Path;
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// File-backed database in `dir`, used where several connections must race
pub async fn create_file_database(dir: &Path, max_connections: u32) -> Result<Database> {
    init_test_logging();
    let mut config = DatabaseConfig::for_path(dir.join("recipes.db"));
    config.max_connections = max_connections;
    config.transaction_retries = 10;
    config.retry_delay_ms = 5;
    Ok(Database::new(&config).await?)
}

/// Kitchen service with a short retry delay
pub fn create_test_kitchen(database: &Database) -> KitchenService {
    KitchenService::new(
        database.clone(),
        RetryPolicy {
            attempts: 10,
            initial_delay: Duration::from_millis(5),
        },
    )
}

/// Complete router over `database`, optionally guarding the admin API
pub fn create_test_router(database: &Database, admin_token: Option<&str>) -> Router {
    let config = ServerConfig {
        admin_token: admin_token.map(str::to_owned),
        ..ServerConfig::default()
    };
    let resources = Arc::new(ServerResources::new(database.clone(), config));
    RecipeBookServer::new(resources).router()
}

/// GET request with an empty body
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Read a response body as UTF-8 text
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn create_recipe(database: &Database, title: &str) -> Recipe {
    database
        .recipes()
        .create(&NewRecipe::titled(title))
        .await
        .unwrap()
}

pub async fn create_ingredient(database: &Database, name: &str) -> Ingredient {
    database
        .ingredients()
        .create(&NewIngredient::named(name))
        .await
        .unwrap()
}

pub async fn create_qty(database: &Database, amount: i64) -> Qty {
    database
        .quantities()
        .create(&NewQty { amount })
        .await
        .unwrap()
}

pub async fn create_unit(database: &Database, code: &str) -> Unit {
    database
        .units()
        .create(&NewUnit {
            unit: code.to_owned(),
            description: None,
        })
        .await
        .unwrap()
}

/// The small catalog most tests start from
pub struct PancakeCatalog {
    pub pancake: Recipe,
    pub sugar: Ingredient,
    pub salt: Ingredient,
    pub gram: Unit,
    pub q100: Qty,
    pub q10: Qty,
}

/// Pancake with 100 g sugar; salt exists but is not used yet
pub async fn seed_pancake_catalog(database: &Database) -> PancakeCatalog {
    let pancake = database
        .recipes()
        .create(&NewRecipe {
            title: "Pancake".to_owned(),
            description: Some("Description".to_owned()),
            pub_date: None,
        })
        .await
        .unwrap();
    let gram = database
        .units()
        .create(&NewUnit {
            unit: "g".to_owned(),
            description: Some("gram, one-thousandth of a kilogram in Si".to_owned()),
        })
        .await
        .unwrap();
    let q100 = create_qty(database, 100).await;
    let q10 = create_qty(database, 10).await;
    let sugar = create_ingredient(database, "sugar").await;
    let salt = create_ingredient(database, "salt").await;

    database
        .recipe_ingredients()
        .upsert(pancake.id, sugar.id, q100.id, gram.id)
        .await
        .unwrap();

    PancakeCatalog {
        pancake,
        sugar,
        salt,
        gram,
        q100,
        q10,
    }
}
