// ABOUTME: Route module organization for the recipe book HTTP endpoints
// ABOUTME: HTML recipe pages, the admin JSON API, and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Route modules
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the kitchen service or the database managers.

/// Admin JSON API for catalog records
pub mod admin;
/// Health check and readiness routes
pub mod health;
/// Public HTML recipe pages and kitchen actions
pub mod recipes;

pub use admin::AdminRoutes;
pub use health::HealthRoutes;
pub use recipes::RecipesRoutes;
