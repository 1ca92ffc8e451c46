// ABOUTME: Unified error handling re-exported from recipe-core
// ABOUTME: Provides AppError, ErrorCode, and the catalog and database error taxonomies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! # Unified Error Handling System
//!
//! The error types live in `recipe-core` so that the store, the services and
//! the HTTP layer agree on codes and statuses. This module re-exports them.

pub use recipe_core::errors::{
    AppError, AppResult, CatalogError, DatabaseError, ErrorCode, ErrorResponse,
    ErrorResponseDetails,
};
