// ABOUTME: HTTP tests for the public recipe pages
// ABOUTME: Index limits, detail rendering, add-product redirects and inline errors, cook, without-product
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::http::{header::LOCATION, StatusCode};
use chrono::{Duration, Utc};
use common::{
    body_text, create_ingredient, create_recipe, create_test_database, create_test_router, get,
    seed_pancake_catalog,
};
use recipe_book::models::NewRecipe;
use tower::ServiceExt;

#[tokio::test]
async fn test_index_shows_five_latest_published() {
    let db = create_test_database().await.unwrap();
    let now = Utc::now();
    for num in 0..7 {
        db.recipes()
            .create(&NewRecipe {
                title: format!("Pancake {num}"),
                description: Some(format!("Description {num}")),
                pub_date: Some(now - Duration::hours(7 - num)),
            })
            .await
            .unwrap();
    }
    db.recipes()
        .create(&NewRecipe {
            title: "Future Soup".to_owned(),
            description: None,
            pub_date: Some(now + Duration::days(1)),
        })
        .await
        .unwrap();
    let app = create_test_router(&db, None);

    let response = app.oneshot(get("/recipes/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert_eq!(html.matches("<li>").count(), 5);
    assert!(html.contains("Pancake 6"));
    assert!(html.contains("Pancake 2"));
    assert!(!html.contains("Pancake 1<"));
    assert!(!html.contains("Future Soup"));
    assert!(html.find("Pancake 6").unwrap() < html.find("Pancake 5").unwrap());
}

#[tokio::test]
async fn test_detail_shows_upper_title_and_ingredients() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, None);

    let response = app
        .oneshot(get(&format!("/recipes/{}/", catalog.pancake.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("<h1>PANCAKE</h1>"));
    assert_eq!(html.matches("<li>").count(), 1);
    assert!(html.contains("sugar: 100 g"));
}

#[tokio::test]
async fn test_detail_of_missing_recipe_is_not_found() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, None);

    let response = app.oneshot(get("/recipes/42/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("RECIPE DOES NOT EXIST"));
}

#[tokio::test]
async fn test_add_product_redirects_to_detail() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, None);
    let uri = format!(
        "/recipes/add_product/{}/{}/100/g/",
        catalog.pancake.id, catalog.salt.id
    );

    let response = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[LOCATION],
        format!("/recipes/{}/", catalog.pancake.id).as_str()
    );
    assert_eq!(
        db.recipe_ingredients()
            .count_for_recipe(catalog.pancake.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_add_product_inline_errors() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, None);
    let recipe = catalog.pancake.id;
    let salt = catalog.salt.id;

    let cases = [
        (
            format!("/recipes/add_product/{}/{salt}/10/g/", recipe + 1),
            "RECIPE DOES NOT EXIST".to_owned(),
            format!("recipe with id {} is not found in the database", recipe + 1),
        ),
        (
            format!("/recipes/add_product/{recipe}/33/10/g/"),
            "PANCAKE: upgrade is not possible".to_owned(),
            "ingredient with id 33 is not found in the database".to_owned(),
        ),
        (
            format!("/recipes/add_product/{recipe}/{salt}/25/g/"),
            "PANCAKE: upgrade is not possible".to_owned(),
            "weight value 25 is not found in the database".to_owned(),
        ),
        (
            format!("/recipes/add_product/{recipe}/{salt}/10/fg/"),
            "PANCAKE: upgrade is not possible".to_owned(),
            "unit measure fg is not found in the database".to_owned(),
        ),
    ];

    for (uri, title, message) in cases {
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let html = body_text(response).await;
        assert!(html.contains(&title), "{uri}: missing title");
        assert!(html.contains(&message), "{uri}: missing message");
    }

    assert_eq!(db.recipe_ingredients().count_for_recipe(recipe).await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_product_with_non_integer_weight_is_bad_request() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, None);
    let uri = format!(
        "/recipes/add_product/{}/{}/ten/g/",
        catalog.pancake.id, catalog.salt.id
    );

    let response = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("INVALID_INPUT"));
}

#[tokio::test]
async fn test_cook_recipe_redirects_and_counts() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let app = create_test_router(&db, None);

    let add = format!(
        "/recipes/add_product/{}/{}/100/g/",
        catalog.pancake.id, catalog.salt.id
    );
    app.clone().oneshot(get(&add)).await.unwrap();
    let response = app
        .oneshot(get(&format!("/recipes/cook_recipe/{}/", catalog.pancake.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    for ingredient in db.ingredients().list().await.unwrap() {
        assert_eq!(ingredient.times_used, 1);
    }
}

#[tokio::test]
async fn test_cook_missing_recipe_still_redirects() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, None);

    let response = app.oneshot(get("/recipes/cook_recipe/7/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/recipes/7/");
}

#[tokio::test]
async fn test_without_product_page() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let pie = create_recipe(&db, "Apple Pie").await;
    let stew = create_recipe(&db, "Stewed Pork").await;
    let flour = create_ingredient(&db, "flour").await;
    let pork = create_ingredient(&db, "pork").await;
    let app = create_test_router(&db, None);

    for (recipe, product) in [(pie.id, flour.id), (stew.id, pork.id)] {
        let uri = format!("/recipes/add_product/{recipe}/{product}/100/g/");
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    let html = body_text(
        app.clone()
            .oneshot(get(&format!("/recipes/without_product/{}/", catalog.sugar.id)))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Apple Pie"));
    assert!(html.contains("Stewed Pork"));
    assert!(!html.contains("Pancake"));

    let html = body_text(
        app.oneshot(get(&format!("/recipes/without_product/{}/", pork.id)))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Pancake"));
    assert!(!html.contains("Stewed Pork"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let db = create_test_database().await.unwrap();
    let app = create_test_router(&db, None);

    let response = app.oneshot(get("/recipes/")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
