// ABOUTME: Core types and constants for the Recipe Book service
// ABOUTME: Foundation crate with error handling, catalog models, and business-rule constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types for the Recipe Book service. It has
//! no knowledge of HTTP routing or connection pooling.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, `DatabaseError`
//!   and the catalog lookup taxonomy `CatalogError`
//! - **models**: Recipe, Unit, Qty, Ingredient and their association rows
//! - **constants**: Field limits and the fixed "adequate amount" business rule

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Catalog data models (recipes, units, quantities, ingredients)
pub mod models;

/// Field limits and business-rule constants
pub mod constants;
