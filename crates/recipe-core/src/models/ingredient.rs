// ABOUTME: Ingredient model with its cook usage counter
// ABOUTME: Names are unique; times_used only grows when a recipe is cooked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::constants::limits::INGREDIENT_NAME_MAX_LEN;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ingredient that recipes can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Unique name
    pub name: String,
    /// Number of times a recipe using this ingredient was cooked
    pub times_used: i64,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Request to create an ingredient
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIngredient {
    /// Unique name
    pub name: String,
}

impl NewIngredient {
    /// Create a request for the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Validate field constraints
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the name is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        super::validate_text("name", &self.name, INGREDIENT_NAME_MAX_LEN)
    }
}
