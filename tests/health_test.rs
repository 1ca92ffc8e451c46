// ABOUTME: Integration tests for the liveness and readiness endpoints
// ABOUTME: Readiness follows the database; liveness always answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_version() {
    let database = common::create_test_database().await.unwrap();
    let router = common::create_test_router(&database, None);

    let response = router.oneshot(common::get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&common::body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_while_database_is_open() {
    let database = common::create_test_database().await.unwrap();
    let router = common::create_test_router(&database, Some("secret"));

    let response = router.oneshot(common::get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&common::body_text(response).await).unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_not_ready_after_database_is_closed() {
    let database = common::create_test_database().await.unwrap();
    let router = common::create_test_router(&database, None);
    database.close().await;

    let response = router.oneshot(common::get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = serde_json::from_str(&common::body_text(response).await).unwrap();
    assert_eq!(body["status"], "not_ready");
}
