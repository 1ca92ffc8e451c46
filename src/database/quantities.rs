// ABOUTME: Database operations for allowed quantity values
// ABOUTME: A weight given to a recipe must match one of these amounts exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::errors::{AppResult, DatabaseError};
use recipe_core::models::{NewQty, Qty};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Quantity database operations manager
pub struct QuantitiesManager {
    pool: SqlitePool,
}

impl QuantitiesManager {
    /// Create a new quantities manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new amount
    ///
    /// # Errors
    ///
    /// Returns an error if the amount already exists or the insert fails
    pub async fn create(&self, request: &NewQty) -> AppResult<Qty> {
        let result = sqlx::query("INSERT INTO qtys (amount) VALUES ($1)")
            .bind(request.amount)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("create qty", e))?;

        Ok(Qty {
            id: result.last_insert_rowid(),
            amount: request.amount,
        })
    }

    /// Get a quantity by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, qty_id: i64) -> AppResult<Option<Qty>> {
        let row = sqlx::query("SELECT id, amount FROM qtys WHERE id = $1")
            .bind(qty_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("get qty", e))?;

        Ok(row.as_ref().map(row_to_qty))
    }

    /// Get the quantity row holding exactly `amount`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_amount(&self, amount: i64) -> AppResult<Option<Qty>> {
        let row = sqlx::query("SELECT id, amount FROM qtys WHERE amount = $1")
            .bind(amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("get qty by amount", e))?;

        Ok(row.as_ref().map(row_to_qty))
    }

    /// List all quantities in ascending amount
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self) -> AppResult<Vec<Qty>> {
        let rows = sqlx::query("SELECT id, amount FROM qtys ORDER BY amount")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("list qtys", e))?;

        Ok(rows.iter().map(row_to_qty).collect())
    }

    /// Delete a quantity; associations that use it are removed with it
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, qty_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM qtys WHERE id = $1")
            .bind(qty_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("delete qty", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_qty(row: &SqliteRow) -> Qty {
    Qty {
        id: row.get("id"),
        amount: row.get("amount"),
    }
}
