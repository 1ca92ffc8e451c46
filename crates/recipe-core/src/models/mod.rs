// ABOUTME: Catalog data models shared by the store, services, and presentation layers
// ABOUTME: Recipe, Unit, Qty, Ingredient and the recipe-ingredient association
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

mod ingredient;
mod measure;
mod recipe;
mod recipe_ingredient;

pub use ingredient::{Ingredient, NewIngredient};
pub use measure::{NewQty, NewUnit, Qty, Unit};
pub use recipe::{NewRecipe, Recipe, UpdateRecipe};
pub use recipe_ingredient::{RecipeIngredient, RecipeIngredientDetail, UpsertOutcome};

use crate::errors::{AppError, AppResult};

/// Validate a required text field against a maximum character count
///
/// # Errors
///
/// Returns an invalid-input error when the trimmed value is empty or too long
pub fn validate_text(field: &str, value: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::invalid_input(format!(
            "{field} must be at most {max_len} characters (got {len})"
        )));
    }
    Ok(())
}
