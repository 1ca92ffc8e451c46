// ABOUTME: Database operations for ingredients and their cook usage counters
// ABOUTME: Cooking a recipe bumps times_used for every ingredient it references in one statement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::errors::{AppResult, DatabaseError};
use recipe_core::models::{Ingredient, NewIngredient};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Ingredient database operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new ingredient with a zero usage counter
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the name is taken, or the insert fails
    pub async fn create(&self, request: &NewIngredient) -> AppResult<Ingredient> {
        request.validate()?;

        let result = sqlx::query("INSERT INTO ingredients (name, times_used) VALUES ($1, 0)")
            .bind(&request.name)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("create ingredient", e))?;

        Ok(Ingredient {
            id: result.last_insert_rowid(),
            name: request.name.clone(),
            times_used: 0,
        })
    }

    /// Get an ingredient by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, ingredient_id: i64) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT id, name, times_used FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("get ingredient", e))?;

        Ok(row.as_ref().map(row_to_ingredient))
    }

    /// List all ingredients ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query("SELECT id, name, times_used FROM ingredients ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("list ingredients", e))?;

        Ok(rows.iter().map(row_to_ingredient).collect())
    }

    /// Delete an ingredient; associations that use it are removed with it
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, ingredient_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("delete ingredient", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Add one to `times_used` for every association row of a recipe
    ///
    /// The delta is applied by the database to the stored value, so
    /// concurrent cooks never lose an update. Returns the number of
    /// ingredients touched; a recipe without ingredients (or an unknown
    /// recipe) touches none.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn record_usage_for_recipe(&self, recipe_id: i64) -> AppResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE ingredients
            SET times_used = times_used + (
                SELECT COUNT(*)
                FROM recipe_ingredients ri
                WHERE ri.recipe_id = $1 AND ri.ingredient_id = ingredients.id
            )
            WHERE id IN (
                SELECT ingredient_id FROM recipe_ingredients WHERE recipe_id = $1
            )
            ",
        )
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("record ingredient usage", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        times_used: row.get("times_used"),
    }
}
