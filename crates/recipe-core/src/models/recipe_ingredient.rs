// ABOUTME: Association rows linking a recipe to an ingredient with a quantity and unit
// ABOUTME: At most one row exists per (recipe, ingredient) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw association row as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Unique identifier
    pub id: i64,
    /// Referenced recipe
    pub recipe_id: i64,
    /// Referenced ingredient
    pub ingredient_id: i64,
    /// Referenced quantity value
    pub qty_id: i64,
    /// Referenced unit
    pub unit_id: i64,
}

/// Association row joined with the names it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientDetail {
    /// Association identifier
    pub id: i64,
    /// Recipe identifier
    pub recipe_id: i64,
    /// Recipe title
    pub recipe_title: String,
    /// Ingredient identifier
    pub ingredient_id: i64,
    /// Ingredient name
    pub ingredient_name: String,
    /// Ingredient usage counter at read time
    pub times_used: i64,
    /// Quantity amount
    pub amount: i64,
    /// Unit code
    pub unit: String,
}

impl fmt::Display for RecipeIngredientDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}: {}{}",
            self.recipe_title, self.ingredient_name, self.amount, self.unit
        )
    }
}

/// Result of writing an association row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No row existed for the pair and one was inserted
    Created,
    /// The existing row for the pair was overwritten
    Updated,
}

impl UpsertOutcome {
    /// Convert to a lowercase label for logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}
