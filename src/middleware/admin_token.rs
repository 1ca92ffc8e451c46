// ABOUTME: Bearer-token guard for the admin API routes
// ABOUTME: Compares the presented token in constant time; an unset token leaves the API open
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header::AUTHORIZATION;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::AppError;
use crate::middleware::RequestId;

/// The token admin requests must present, if one is configured
#[derive(Clone, Default)]
pub struct AdminToken(Option<Arc<str>>);

impl AdminToken {
    /// Wrap the configured token; empty strings count as unset
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        Self(token.filter(|t| !t.is_empty()).map(Arc::from))
    }

    /// Whether requests must authenticate
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.0.is_some()
    }

    /// Check a presented token against the configured one
    #[must_use]
    pub fn accepts(&self, presented: &str) -> bool {
        self.0
            .as_deref()
            .is_some_and(|expected| bool::from(expected.as_bytes().ct_eq(presented.as_bytes())))
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Reject admin requests without a valid `Authorization: Bearer` header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing or malformed and
/// `PERMISSION_DENIED` when the token does not match
pub async fn require_admin_token(
    State(token): State<AdminToken>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !token.is_required() {
        return Ok(next.run(request).await);
    }

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string);
    let with_id = |error: AppError| match &request_id {
        Some(id) => error.with_request_id(id.clone()),
        None => error,
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| with_id(AppError::auth_required()))?;

    if !token.accepts(presented) {
        warn!(path = %request.uri().path(), "Rejected admin request with invalid token");
        return Err(with_id(AppError::permission_denied("Invalid admin token")));
    }

    Ok(next.run(request).await)
}
