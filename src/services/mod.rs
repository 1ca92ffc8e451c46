// ABOUTME: Domain service layer for business logic shared by HTML pages and the admin API
// ABOUTME: Resolves catalog lookups, runs store transactions, and retries busy writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Domain service layer
//!
//! Route handlers stay thin: everything that decides what to write, in which
//! order to check preconditions, or how to react to a busy store lives here.

/// Upsert, cook, and recipe queries
pub mod kitchen;

pub use kitchen::{KitchenService, RecipeDetail, RetryPolicy};
