// ABOUTME: Lookup failures for adding an ingredient to a recipe
// ABOUTME: Each variant names the missing record and carries the value that was searched for
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failure of a catalog operation that resolves records before writing
///
/// The four `*NotFound` variants are expected outcomes: the caller decides how
/// to present them. `Store` wraps any failure of the underlying database.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No recipe has the requested id
    #[error("recipe with id {0} is not found in the database")]
    RecipeNotFound(i64),

    /// No ingredient has the requested id
    #[error("ingredient with id {0} is not found in the database")]
    IngredientNotFound(i64),

    /// No quantity row holds the requested amount
    #[error("weight value {0} is not found in the database")]
    QtyNotFound(i64),

    /// No unit has the requested code
    #[error("unit measure {0} is not found in the database")]
    UnitNotFound(String),

    /// The store failed
    #[error(transparent)]
    Store(#[from] AppError),
}

impl CatalogError {
    /// Whether this is one of the lookup failures rather than a store failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Short machine-readable name of the variant, used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RecipeNotFound(_) => "recipe_not_found",
            Self::IngredientNotFound(_) => "ingredient_not_found",
            Self::QtyNotFound(_) => "qty_not_found",
            Self::UnitNotFound(_) => "unit_not_found",
            Self::Store(_) => "store",
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Store(inner) => inner,
            lookup => Self::new(ErrorCode::ResourceNotFound, lookup.to_string()).with_details(
                serde_json::json!({
                    "kind": lookup.kind(),
                }),
            ),
        }
    }
}
