// ABOUTME: Kitchen operations: adding products to recipes, cooking, and ingredient queries
// ABOUTME: Checks preconditions in a fixed order and retries transactions the store reports as busy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::DatabaseConfig;
use crate::constants::publishing::LATEST_RECIPES_LIMIT;
use crate::database::Database;
use crate::errors::{AppResult, CatalogError};
use crate::logging::AppLogger;
use recipe_core::models::{Recipe, RecipeIngredientDetail, UpsertOutcome};

/// How often, and how patiently, a busy transaction is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Build the policy from database settings
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            attempts: config.transaction_retries.max(1),
            initial_delay: config.retry_delay(),
        }
    }

    /// A policy that never retries
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            attempts: 1,
            initial_delay: Duration::ZERO,
        }
    }
}

/// A recipe together with its ingredient lines
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    /// The recipe
    pub recipe: Recipe,
    /// Ingredient lines ordered by ingredient name
    pub ingredients: Vec<RecipeIngredientDetail>,
}

/// Business operations over the recipe catalog
#[derive(Clone)]
pub struct KitchenService {
    database: Database,
    retry: RetryPolicy,
}

impl KitchenService {
    /// Create a service over `database`
    #[must_use]
    pub const fn new(database: Database, retry: RetryPolicy) -> Self {
        Self { database, retry }
    }

    /// Set the amount and unit of an ingredient in a recipe
    ///
    /// Preconditions are checked in order: recipe, ingredient, quantity
    /// amount, unit code. The first one that fails is reported and nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns the matching `CatalogError` lookup variant when a referenced
    /// record is missing, or `CatalogError::Store` when the store fails
    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        amount: i64,
        unit_code: &str,
    ) -> Result<UpsertOutcome, CatalogError> {
        let result = self
            .resolve_and_upsert(recipe_id, ingredient_id, amount, unit_code)
            .await;

        match &result {
            Ok(outcome) => AppLogger::log_product_added(
                recipe_id,
                ingredient_id,
                amount,
                unit_code,
                outcome.as_str(),
            ),
            Err(err) if err.is_not_found() => {
                AppLogger::log_product_rejected(recipe_id, ingredient_id, err.kind(), &err.to_string());
            }
            Err(_) => {}
        }

        result
    }

    async fn resolve_and_upsert(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        amount: i64,
        unit_code: &str,
    ) -> Result<UpsertOutcome, CatalogError> {
        self.database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or(CatalogError::RecipeNotFound(recipe_id))?;

        self.database
            .ingredients()
            .get(ingredient_id)
            .await?
            .ok_or(CatalogError::IngredientNotFound(ingredient_id))?;

        let qty = self
            .database
            .quantities()
            .get_by_amount(amount)
            .await?
            .ok_or(CatalogError::QtyNotFound(amount))?;

        let unit = self
            .database
            .units()
            .get_by_code(unit_code)
            .await?
            .ok_or_else(|| CatalogError::UnitNotFound(unit_code.to_owned()))?;

        let links = self.database.recipe_ingredients();
        let outcome = self
            .with_retry("upsert recipe ingredient", || {
                links.upsert(recipe_id, ingredient_id, qty.id, unit.id)
            })
            .await?;

        Ok(outcome)
    }

    /// Increment the usage counter of every ingredient in a recipe
    ///
    /// Returns the number of ingredients touched. Cooking a recipe without
    /// ingredients, or one that does not exist, changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails after all retries
    #[instrument(skip(self))]
    pub async fn cook_recipe(&self, recipe_id: i64) -> AppResult<u64> {
        let ingredients = self.database.ingredients();
        let touched = self
            .with_retry("cook recipe", || ingredients.record_usage_for_recipe(recipe_id))
            .await?;

        AppLogger::log_recipe_cooked(recipe_id, touched);
        Ok(touched)
    }

    /// Recipes lacking an adequate amount of an ingredient
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn recipes_without_product(&self, ingredient_id: i64) -> AppResult<Vec<Recipe>> {
        self.database.recipes().without_adequate(ingredient_id).await
    }

    /// The most recently published recipes as of `now`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn latest_recipes(&self, now: DateTime<Utc>) -> AppResult<Vec<Recipe>> {
        self.database
            .recipes()
            .latest_published(now, LATEST_RECIPES_LIMIT)
            .await
    }

    /// A recipe and its ingredient lines, or `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn recipe_detail(&self, recipe_id: i64) -> AppResult<Option<RecipeDetail>> {
        let Some(recipe) = self.database.recipes().get(recipe_id).await? else {
            return Ok(None);
        };
        let ingredients = self
            .database
            .recipe_ingredients()
            .list_for_recipe(recipe_id)
            .await?;

        Ok(Some(RecipeDetail {
            recipe,
            ingredients,
        }))
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or runs out of attempts
    async fn with_retry<T, F, Fut>(&self, name: &str, mut operation: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut delay = self.retry.initial_delay;
        let mut attempt = 1;

        loop {
            match operation().await {
                Err(err) if err.is_retryable() && attempt < self.retry.attempts => {
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    AppLogger::log_transaction_retry(name, attempt, delay_ms, &err.to_string());
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                    attempt += 1;
                }
                result => {
                    if attempt > 1 {
                        debug!(operation = name, attempt, "Transaction finished after retry");
                    }
                    return result;
                }
            }
        }
    }
}
