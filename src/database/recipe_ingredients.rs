// ABOUTME: Database operations for recipe-ingredient associations
// ABOUTME: Provides the transactional upsert that keeps one row per recipe and ingredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::errors::{AppResult, DatabaseError};
use recipe_core::models::{RecipeIngredient, RecipeIngredientDetail, UpsertOutcome};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Association database operations manager
pub struct RecipeIngredientsManager {
    pool: SqlitePool,
}

impl RecipeIngredientsManager {
    /// Create a new association manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Set the quantity and unit of an ingredient in a recipe
    ///
    /// Overwrites the existing row for the pair or inserts one if none
    /// exists. The transaction opens with the `UPDATE`, so it holds the write
    /// lock before it looks at any data and two concurrent calls for the same
    /// pair cannot both decide to insert.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced row is missing or the transaction fails.
    /// A busy store surfaces as a retryable error.
    pub async fn upsert(
        &self,
        recipe_id: i64,
        ingredient_id: i64,
        qty_id: i64,
        unit_id: i64,
    ) -> AppResult<UpsertOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::from_sqlx("begin upsert", e))?;

        let updated = sqlx::query(
            r"
            UPDATE recipe_ingredients
            SET qty_id = $1, unit_id = $2
            WHERE recipe_id = $3 AND ingredient_id = $4
            ",
        )
        .bind(qty_id)
        .bind(unit_id)
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_sqlx("update recipe ingredient", e))?;

        let outcome = if updated.rows_affected() > 0 {
            UpsertOutcome::Updated
        } else {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, qty_id, unit_id)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .bind(qty_id)
            .bind(unit_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from_sqlx("insert recipe ingredient", e))?;
            UpsertOutcome::Created
        };

        tx.commit()
            .await
            .map_err(|e| DatabaseError::from_sqlx("commit upsert", e))?;

        Ok(outcome)
    }

    /// Get the association for a pair
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, recipe_id: i64, ingredient_id: i64) -> AppResult<Option<RecipeIngredient>> {
        let row = sqlx::query(
            r"
            SELECT id, recipe_id, ingredient_id, qty_id, unit_id
            FROM recipe_ingredients
            WHERE recipe_id = $1 AND ingredient_id = $2
            ",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("get recipe ingredient", e))?;

        Ok(row.map(|r| RecipeIngredient {
            id: r.get("id"),
            recipe_id: r.get("recipe_id"),
            ingredient_id: r.get("ingredient_id"),
            qty_id: r.get("qty_id"),
            unit_id: r.get("unit_id"),
        }))
    }

    /// List a recipe's ingredients with amounts and units, ordered by ingredient name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_recipe(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredientDetail>> {
        let rows = sqlx::query(
            r"
            SELECT ri.id, ri.recipe_id, r.title AS recipe_title,
                   ri.ingredient_id, i.name AS ingredient_name, i.times_used,
                   q.amount, u.unit
            FROM recipe_ingredients ri
            JOIN recipes r ON r.id = ri.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            JOIN qtys q ON q.id = ri.qty_id
            JOIN units u ON u.id = ri.unit_id
            WHERE ri.recipe_id = $1
            ORDER BY i.name, ri.id
            ",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("list recipe ingredients", e))?;

        Ok(rows.iter().map(row_to_detail).collect())
    }

    /// Count the association rows of a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count_for_recipe(&self, recipe_id: i64) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DatabaseError::from_sqlx("count recipe ingredients", e))?;

        Ok(count.max(0) as u64)
    }
}

fn row_to_detail(row: &SqliteRow) -> RecipeIngredientDetail {
    RecipeIngredientDetail {
        id: row.get("id"),
        recipe_id: row.get("recipe_id"),
        recipe_title: row.get("recipe_title"),
        ingredient_id: row.get("ingredient_id"),
        ingredient_name: row.get("ingredient_name"),
        times_used: row.get("times_used"),
        amount: row.get("amount"),
        unit: row.get("unit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::errors::ErrorCode;
    use recipe_core::models::{NewIngredient, NewQty, NewRecipe, NewUnit};

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let db = Database::in_memory().await.unwrap();
        let recipe = db.recipes().create(&NewRecipe::titled("Pancake")).await.unwrap();
        let sugar = db
            .ingredients()
            .create(&NewIngredient::named("sugar"))
            .await
            .unwrap();
        let q100 = db.quantities().create(&NewQty { amount: 100 }).await.unwrap();
        let q5 = db.quantities().create(&NewQty { amount: 5 }).await.unwrap();
        let gram = db
            .units()
            .create(&NewUnit {
                unit: "g".to_owned(),
                description: None,
            })
            .await
            .unwrap();

        let links = db.recipe_ingredients();
        let first = links.upsert(recipe.id, sugar.id, q100.id, gram.id).await.unwrap();
        let second = links.upsert(recipe.id, sugar.id, q5.id, gram.id).await.unwrap();

        assert_eq!(first, UpsertOutcome::Created);
        assert_eq!(second, UpsertOutcome::Updated);
        assert_eq!(links.count_for_recipe(recipe.id).await.unwrap(), 1);
        assert_eq!(
            links.get(recipe.id, sugar.id).await.unwrap().unwrap().qty_id,
            q5.id
        );
    }

    #[tokio::test]
    async fn test_upsert_with_dangling_reference_fails() {
        let db = Database::in_memory().await.unwrap();
        let err = db
            .recipe_ingredients()
            .upsert(1, 1, 1, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
