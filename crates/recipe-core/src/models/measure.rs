// ABOUTME: Measurement units and quantity values available to recipe ingredients
// ABOUTME: Unit codes are short unique strings, quantities are unique integer amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use crate::constants::limits::UNIT_CODE_MAX_LEN;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A measurement unit such as `g` or `ml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier
    pub id: i64,
    /// Unique short code
    pub unit: String,
    /// Optional description
    pub description: Option<String>,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unit)
    }
}

/// Request to create a unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUnit {
    /// Unique short code
    pub unit: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewUnit {
    /// Validate field constraints
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the code is empty or too long
    pub fn validate(&self) -> AppResult<()> {
        super::validate_text("unit", &self.unit, UNIT_CODE_MAX_LEN)
    }
}

/// An allowed quantity value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qty {
    /// Unique identifier
    pub id: i64,
    /// Unique amount
    pub amount: i64,
}

impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}

/// Request to create a quantity value
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NewQty {
    /// Unique amount
    pub amount: i64,
}
