// ABOUTME: Database operations for measurement units
// ABOUTME: Units are looked up by their unique short code when adding ingredients to recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::errors::{AppResult, DatabaseError};
use recipe_core::models::{NewUnit, Unit};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Unit database operations manager
pub struct UnitsManager {
    pool: SqlitePool,
}

impl UnitsManager {
    /// Create a new units manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new unit
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the code is taken, or the insert fails
    pub async fn create(&self, request: &NewUnit) -> AppResult<Unit> {
        request.validate()?;

        let result = sqlx::query("INSERT INTO units (unit, description) VALUES ($1, $2)")
            .bind(&request.unit)
            .bind(&request.description)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("create unit", e))?;

        Ok(Unit {
            id: result.last_insert_rowid(),
            unit: request.unit.clone(),
            description: request.description.clone(),
        })
    }

    /// Get a unit by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, unit_id: i64) -> AppResult<Option<Unit>> {
        let row = sqlx::query("SELECT id, unit, description FROM units WHERE id = $1")
            .bind(unit_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("get unit", e))?;

        Ok(row.as_ref().map(row_to_unit))
    }

    /// Get a unit by its exact code
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_by_code(&self, code: &str) -> AppResult<Option<Unit>> {
        let row = sqlx::query("SELECT id, unit, description FROM units WHERE unit = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("get unit by code", e))?;

        Ok(row.as_ref().map(row_to_unit))
    }

    /// List all units ordered by code
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self) -> AppResult<Vec<Unit>> {
        let rows = sqlx::query("SELECT id, unit, description FROM units ORDER BY unit")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("list units", e))?;

        Ok(rows.iter().map(row_to_unit).collect())
    }

    /// Delete a unit; associations that use it are removed with it
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, unit_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(unit_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("delete unit", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_unit(row: &SqliteRow) -> Unit {
    Unit {
        id: row.get("id"),
        unit: row.get("unit"),
        description: row.get("description"),
    }
}
