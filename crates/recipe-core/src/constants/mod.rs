// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Field length limits, listing sizes, and the fixed adequate-amount rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than collected in a single list.

/// Maximum lengths of text columns, mirrored by `CHECK` constraints in the schema
pub mod limits {
    /// Maximum recipe title length in characters
    pub const RECIPE_TITLE_MAX_LEN: usize = 200;
    /// Maximum unit code length in characters
    pub const UNIT_CODE_MAX_LEN: usize = 10;
    /// Maximum ingredient name length in characters
    pub const INGREDIENT_NAME_MAX_LEN: usize = 200;
    /// Default page size for admin listings
    pub const DEFAULT_LIST_LIMIT: u32 = 50;
    /// Upper bound for admin listing page size
    pub const MAX_LIST_LIMIT: u32 = 500;
}

/// Rules for which recipes count as holding "enough" of an ingredient
///
/// The negative query only recognizes grams at or above a fixed amount.
/// Stored associations may use any unit and amount; no conversion happens.
pub mod adequacy {
    /// Unit code an association must use to count as adequate
    pub const ADEQUATE_UNIT: &str = "g";
    /// Minimum amount (inclusive) an association must hold to count as adequate
    pub const ADEQUATE_MIN_AMOUNT: i64 = 10;
}

/// Recipe listing and publication constants
pub mod publishing {
    /// Number of recipes shown on the index page
    pub const LATEST_RECIPES_LIMIT: u32 = 5;
    /// Window used by `Recipe::was_published_recently`
    pub const RECENT_PUBLICATION_DAYS: i64 = 7;
}
