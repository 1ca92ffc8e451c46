// ABOUTME: HTTP tests for the admin JSON API
// ABOUTME: Token guard, catalog CRUD, ingredient assignment, validation, and cascading deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    Router,
};
use common::{body_text, create_test_database, create_test_router, seed_pancake_catalog};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "kitchen-admin-token";

fn json_request(method: Method, uri: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("content-type", "application/json");
    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request(method, uri, body.as_ref()))
        .await
        .unwrap();
    let status = response.status();
    let text = body_text(response).await;
    let value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_admin_requires_token_when_configured() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, Some(TOKEN));

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/units")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/units")
                .header(AUTHORIZATION, "Bearer not-the-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
    let body: Value = serde_json::from_str(&body_text(wrong).await).unwrap();
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");
    assert!(body["error"]["request_id"].is_string());

    let (status, _) = call(&app, Method::GET, "/admin/units", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_is_open_without_token() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/ingredients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_recipe_crud() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, Some(TOKEN));

    let (status, created) = call(
        &app,
        Method::POST,
        "/admin/recipes",
        Some(json!({ "title": "Apple Pie", "description": "Lattice top" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["was_published_recently"], true);
    let id = created["id"].as_i64().unwrap();

    let (status, duplicate) = call(
        &app,
        Method::POST,
        "/admin/recipes",
        Some(json!({ "title": "Apple Pie" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/admin/recipes/{id}"),
        Some(json!({ "pub_date": "2020-01-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Apple Pie");
    assert_eq!(updated["was_published_recently"], false);

    let (status, list) = call(&app, Method::GET, "/admin/recipes?search=apple", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["recipes"][0]["id"], id);

    let (status, _) = call(&app, Method::DELETE, &format!("/admin/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&app, Method::GET, &format!("/admin/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_list_total_counts_only_matching_recipes() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, Some(TOKEN));
    for title in ["Pancake", "Apple Pie", "Stewed Pork"] {
        let (status, _) = call(&app, Method::POST, "/admin/recipes", Some(json!({ "title": title }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = call(&app, Method::GET, "/admin/recipes?search=pie", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(list["total"], 1);

    let (_, paged) = call(&app, Method::GET, "/admin/recipes?search=p&limit=1", None).await;
    assert_eq!(paged["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(paged["total"], 3);
}

#[tokio::test]
async fn test_list_filters_by_publication_date() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, Some(TOKEN));
    for (title, pub_date) in [
        ("Winter Stew", "2020-01-15T12:00:00Z"),
        ("Spring Salad", "2020-04-10T12:00:00Z"),
        ("Summer Tart", "2020-07-01T12:00:00Z"),
    ] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/admin/recipes",
            Some(json!({ "title": title, "pub_date": pub_date })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = call(
        &app,
        Method::GET,
        "/admin/recipes?published_after=2020-03-01T00:00:00Z&published_before=2020-05-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["recipes"][0]["title"], "Spring Salad");

    let (_, later) = call(&app, Method::GET, "/admin/recipes?published_after=2020-04-10T12:00:00Z", None).await;
    let titles: Vec<&str> = later["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Summer Tart", "Spring Salad"]);
    assert_eq!(later["total"], 2);

    let (status, _) = call(&app, Method::GET, "/admin/recipes?published_after=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_title_validation() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, Some(TOKEN));

    let (status, body) = call(
        &app,
        Method::POST,
        "/admin/recipes",
        Some(json!({ "title": "x".repeat(201) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = call(
        &app,
        Method::POST,
        "/admin/units",
        Some(json!({ "unit": "tablespoons" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_ingredient_uses_upsert() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, Some(TOKEN));
    let uri = format!("/admin/recipes/{}/ingredients", catalog.pancake.id);

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "ingredient_id": catalog.salt.id, "amount": 10, "unit": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"], "created");

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "ingredient_id": catalog.salt.id, "amount": 100, "unit": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "updated");

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "ingredient_id": catalog.salt.id, "amount": 25, "unit": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        "weight value 25 is not found in the database"
    );
    assert_eq!(body["error"]["details"]["kind"], "qty_not_found");

    let (status, detail) = call(
        &app,
        Method::GET,
        &format!("/admin/recipes/{}", catalog.pancake.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = detail["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["ingredient_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["salt", "sugar"]);
}

#[tokio::test]
async fn test_deleting_a_unit_cascades_to_associations() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, Some(TOKEN));

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/admin/units/{}", catalog.gram.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        db.recipe_ingredients()
            .count_for_recipe(catalog.pancake.id)
            .await
            .unwrap(),
        0
    );

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/admin/units/{}", catalog.gram.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_lists() {
    let db = create_test_database().await.unwrap();
    seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, Some(TOKEN));

    let (_, qtys) = call(&app, Method::GET, "/admin/qtys", None).await;
    let amounts: Vec<i64> = qtys
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["amount"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, vec![10, 100]);

    let (status, qty) = call(&app, Method::POST, "/admin/qtys", Some(json!({ "amount": 25 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(qty["amount"], 25);

    let (_, ingredients) = call(&app, Method::GET, "/admin/ingredients", None).await;
    assert_eq!(ingredients.as_array().unwrap().len(), 2);
    assert_eq!(ingredients[0]["name"], "salt");
    assert_eq!(ingredients[0]["times_used"], 0);
}
