// ABOUTME: Recipe model with publication timestamp and recency check
// ABOUTME: Includes create/update request types with title validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::constants::{limits::RECIPE_TITLE_MAX_LEN, publishing::RECENT_PUBLICATION_DAYS};
use crate::errors::AppResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: i64,
    /// Unique title
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Publication timestamp; recipes dated in the future are not listed yet
    pub pub_date: DateTime<Utc>,
}

impl Recipe {
    /// Whether the recipe was published within the last week, relative to `now`
    ///
    /// Recipes scheduled for the future are not considered recent.
    #[must_use]
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(RECENT_PUBLICATION_DAYS) <= self.pub_date && self.pub_date <= now
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Request to create a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Unique title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Publication timestamp; defaults to the creation time
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
}

impl NewRecipe {
    /// Create a request with just a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Validate field constraints
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the title is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        super::validate_text("title", &self.title, RECIPE_TITLE_MAX_LEN)
    }
}

/// Partial update of a recipe; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipe {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New publication timestamp
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
}

impl UpdateRecipe {
    /// Validate field constraints
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if a new title is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        match &self.title {
            Some(title) => super::validate_text("title", title, RECIPE_TITLE_MAX_LEN),
            None => Ok(()),
        }
    }
}
