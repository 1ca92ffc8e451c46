// ABOUTME: Database operations for recipes and recipe listing queries
// ABOUTME: Handles CRUD, latest-published listing, and the negative ingredient query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use super::{decode_timestamp, encode_timestamp};
use crate::constants::{adequacy, limits};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use recipe_core::models::{NewRecipe, Recipe, UpdateRecipe};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Filter options for listing recipes
#[derive(Debug, Clone, Default)]
pub struct ListRecipesFilter {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Only recipes published at or after this time
    pub published_after: Option<DateTime<Utc>>,
    /// Only recipes published at or before this time
    pub published_before: Option<DateTime<Utc>>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ListRecipesFilter {
    /// `LIKE` pattern for the search term, `None` when there is nothing to match
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Predicates shared by `list` and `count_matching`; binds search, after, before
const LIST_FILTER_CLAUSE: &str = r"($1 IS NULL OR title LIKE $1 ESCAPE '\')
              AND ($2 IS NULL OR pub_date >= $2)
              AND ($3 IS NULL OR pub_date <= $3)";

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new recipe; `pub_date` defaults to now
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the title is taken, or the insert fails
    pub async fn create(&self, request: &NewRecipe) -> AppResult<Recipe> {
        request.validate()?;
        let stored_date = encode_timestamp(request.pub_date.unwrap_or_else(Utc::now));

        let result = sqlx::query(
            r"
            INSERT INTO recipes (title, description, pub_date)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&stored_date)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("create recipe", e))?;

        Ok(Recipe {
            id: result.last_insert_rowid(),
            title: request.title.clone(),
            description: request.description.clone(),
            pub_date: decode_timestamp(&stored_date)?,
        })
    }

    /// Get a recipe by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, pub_date
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("get recipe", e))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// List recipes, newest publication first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, filter: &ListRecipesFilter) -> AppResult<Vec<Recipe>> {
        let limit = filter
            .limit
            .unwrap_or(limits::DEFAULT_LIST_LIMIT)
            .min(limits::MAX_LIST_LIMIT);
        let offset = filter.offset.unwrap_or(0);

        let rows = sqlx::query(&format!(
            r"
            SELECT id, title, description, pub_date
            FROM recipes
            WHERE {LIST_FILTER_CLAUSE}
            ORDER BY pub_date DESC, id DESC
            LIMIT $4 OFFSET $5
            "
        ))
        .bind(filter.search_pattern())
        .bind(filter.published_after.map(encode_timestamp))
        .bind(filter.published_before.map(encode_timestamp))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("list recipes", e))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Count the recipes `list` would page through, ignoring limit and offset
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count_matching(&self, filter: &ListRecipesFilter) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM recipes WHERE {LIST_FILTER_CLAUSE}"
        ))
        .bind(filter.search_pattern())
        .bind(filter.published_after.map(encode_timestamp))
        .bind(filter.published_before.map(encode_timestamp))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("count matching recipes", e))?;

        Ok(count.max(0) as u64)
    }

    /// Recipes published at or before `now`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn latest_published(&self, now: DateTime<Utc>, limit: u32) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, pub_date
            FROM recipes
            WHERE pub_date <= $1
            ORDER BY pub_date DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(encode_timestamp(now))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("list latest recipes", e))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Recipes that do not hold an adequate amount of an ingredient
    ///
    /// A recipe holds an adequate amount when it has an association with the
    /// ingredient using the `g` unit and an amount of at least 10. Every other
    /// recipe is returned, including recipes with no associations at all.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn without_adequate(&self, ingredient_id: i64) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT r.id, r.title, r.description, r.pub_date
            FROM recipes r
            WHERE r.id NOT IN (
                SELECT ri.recipe_id
                FROM recipe_ingredients ri
                JOIN qtys q ON q.id = ri.qty_id
                JOIN units u ON u.id = ri.unit_id
                WHERE ri.ingredient_id = $1
                  AND u.unit = $2
                  AND q.amount >= $3
            )
            ORDER BY r.id
            ",
        )
        .bind(ingredient_id)
        .bind(adequacy::ADEQUATE_UNIT)
        .bind(adequacy::ADEQUATE_MIN_AMOUNT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("list recipes without ingredient", e))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Update a recipe, returning the new state or `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the new title is taken, or the update fails
    pub async fn update(&self, recipe_id: i64, request: &UpdateRecipe) -> AppResult<Option<Recipe>> {
        request.validate()?;

        let result = sqlx::query(
            r"
            UPDATE recipes SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                pub_date = COALESCE($3, pub_date)
            WHERE id = $4
            ",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.pub_date.map(encode_timestamp))
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("update recipe", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(recipe_id).await
    }

    /// Delete a recipe and, through cascading, its associations
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, recipe_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("delete recipe", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all recipes
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("count recipes", e))?;

        Ok(count.max(0) as u64)
    }
}

/// Escape `LIKE` wildcards in user input
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Convert a database row to a `Recipe`
fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let pub_date: String = row.get("pub_date");
    Ok(Recipe {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        pub_date: decode_timestamp(&pub_date)?,
    })
}
