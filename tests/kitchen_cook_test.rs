// ABOUTME: Integration tests for cooking recipes
// ABOUTME: Verifies usage counters grow by one per cook for every ingredient of the recipe only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{
    create_ingredient, create_recipe, create_test_database, create_test_kitchen,
    seed_pancake_catalog,
};

#[tokio::test]
async fn test_cook_increments_every_ingredient_once() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let kitchen = create_test_kitchen(&db);
    kitchen
        .add_product(catalog.pancake.id, catalog.salt.id, 100, "g")
        .await
        .unwrap();

    let touched = kitchen.cook_recipe(catalog.pancake.id).await.unwrap();

    assert_eq!(touched, 2);
    for ingredient in db.ingredients().list().await.unwrap() {
        assert_eq!(ingredient.times_used, 1, "{}", ingredient.name);
    }
}

#[tokio::test]
async fn test_cooking_twice_counts_twice() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let kitchen = create_test_kitchen(&db);

    kitchen.cook_recipe(catalog.pancake.id).await.unwrap();
    kitchen.cook_recipe(catalog.pancake.id).await.unwrap();

    let sugar = db.ingredients().get(catalog.sugar.id).await.unwrap().unwrap();
    let salt = db.ingredients().get(catalog.salt.id).await.unwrap().unwrap();
    assert_eq!(sugar.times_used, 2);
    assert_eq!(salt.times_used, 0);
}

#[tokio::test]
async fn test_cook_leaves_other_recipes_alone() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let kitchen = create_test_kitchen(&db);
    let pie = create_recipe(&db, "Apple Pie").await;
    let flour = create_ingredient(&db, "flour").await;
    kitchen.add_product(pie.id, flour.id, 100, "g").await.unwrap();

    kitchen.cook_recipe(pie.id).await.unwrap();

    assert_eq!(
        db.ingredients().get(flour.id).await.unwrap().unwrap().times_used,
        1
    );
    assert_eq!(
        db.ingredients()
            .get(catalog.sugar.id)
            .await
            .unwrap()
            .unwrap()
            .times_used,
        0
    );
}

#[tokio::test]
async fn test_cook_without_ingredients_is_a_no_op() {
    let db = create_test_database().await.unwrap();
    let catalog = seed_pancake_catalog(&db).await;
    let kitchen = create_test_kitchen(&db);
    let empty = create_recipe(&db, "Water").await;

    assert_eq!(kitchen.cook_recipe(empty.id).await.unwrap(), 0);
    assert_eq!(kitchen.cook_recipe(9_999).await.unwrap(), 0);
    assert_eq!(
        db.ingredients()
            .get(catalog.sugar.id)
            .await
            .unwrap()
            .unwrap()
            .times_used,
        0
    );
}
