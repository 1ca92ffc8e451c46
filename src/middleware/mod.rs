// ABOUTME: HTTP middleware for request correlation, CORS, and admin authorization
// ABOUTME: Provides request ID generation, cross-origin setup, and the admin bearer-token guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

/// Bearer-token guard for the admin API
pub mod admin_token;
/// Cross-origin configuration
pub mod cors;
/// Request ID generation and propagation
pub mod request_id;

pub use admin_token::{require_admin_token, AdminToken};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
