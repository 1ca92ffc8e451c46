// ABOUTME: Route handlers for the public recipe pages and kitchen actions
// ABOUTME: Index, detail, add-product, cook, and recipes-without-product views rendered as HTML
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Recipe routes
//!
//! All pages live under `/recipes/` and keep the trailing slash. Adding a
//! product redirects to the detail page on success; a missing recipe,
//! ingredient, weight, or unit renders the detail page with an inline error
//! and status 200.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;

use crate::{
    errors::{AppError, CatalogError},
    server::ServerResources,
    templates::{self, InlineError},
};

/// Heading used when the recipe itself is missing
const MISSING_RECIPE_TITLE: &str = "RECIPE DOES NOT EXIST";

/// Recipe page routes
pub struct RecipesRoutes;

impl RecipesRoutes {
    /// Create all recipe page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes/", get(Self::handle_index))
            .route("/recipes/:recipe_id/", get(Self::handle_detail))
            .route(
                "/recipes/add_product/:recipe_id/:product_id/:weight/:unit/",
                get(Self::handle_add_product),
            )
            .route(
                "/recipes/cook_recipe/:recipe_id/",
                get(Self::handle_cook_recipe),
            )
            .route(
                "/recipes/without_product/:product_id/",
                get(Self::handle_without_product),
            )
            .with_state(resources)
    }

    /// Handle GET /recipes/ - latest published recipes
    async fn handle_index(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let recipes = resources.kitchen.latest_recipes(Utc::now()).await?;
        Ok(Html(templates::render_index(&recipes)).into_response())
    }

    /// Handle GET /recipes/:id/ - recipe with its ingredient lines
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let Some(detail) = resources.kitchen.recipe_detail(recipe_id).await? else {
            let page = templates::render_detail_error(&InlineError {
                title: MISSING_RECIPE_TITLE.to_owned(),
                message: CatalogError::RecipeNotFound(recipe_id).to_string(),
            });
            return Ok((StatusCode::NOT_FOUND, Html(page)).into_response());
        };

        Ok(Html(templates::render_detail(&detail.recipe, &detail.ingredients)).into_response())
    }

    /// Handle GET /recipes/add_product/:recipe_id/:product_id/:weight/:unit/
    async fn handle_add_product(
        State(resources): State<Arc<ServerResources>>,
        Path((recipe_id, product_id, weight, unit)): Path<(i64, i64, String, String)>,
    ) -> Result<Response, AppError> {
        let amount: i64 = weight
            .parse()
            .map_err(|_| AppError::invalid_input(format!("weight must be an integer, got '{weight}'")))?;

        match resources
            .kitchen
            .add_product(recipe_id, product_id, amount, &unit)
            .await
        {
            Ok(_) => Ok(redirect_to_detail(recipe_id)),
            Err(CatalogError::Store(error)) => Err(error),
            Err(lookup) => {
                let inline = Self::inline_error(&resources, recipe_id, &lookup).await?;
                Ok(Html(templates::render_detail_error(&inline)).into_response())
            }
        }
    }

    /// Handle GET /recipes/cook_recipe/:recipe_id/
    async fn handle_cook_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources.kitchen.cook_recipe(recipe_id).await?;
        Ok(redirect_to_detail(recipe_id))
    }

    /// Handle GET /recipes/without_product/:product_id/
    async fn handle_without_product(
        State(resources): State<Arc<ServerResources>>,
        Path(product_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let recipes = resources.kitchen.recipes_without_product(product_id).await?;
        Ok(Html(templates::render_without_product(&recipes)).into_response())
    }

    /// Build the heading and message for a failed add-product request
    async fn inline_error(
        resources: &ServerResources,
        recipe_id: i64,
        error: &CatalogError,
    ) -> Result<InlineError, AppError> {
        let title = match error {
            CatalogError::RecipeNotFound(_) => MISSING_RECIPE_TITLE.to_owned(),
            _ => match resources.database.recipes().get(recipe_id).await? {
                Some(recipe) => format!("{}: upgrade is not possible", recipe.title.to_uppercase()),
                None => MISSING_RECIPE_TITLE.to_owned(),
            },
        };

        Ok(InlineError {
            title,
            message: error.to_string(),
        })
    }
}

/// 302 redirect to a recipe's detail page
fn redirect_to_detail(recipe_id: i64) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, format!("/recipes/{recipe_id}/"))],
    )
        .into_response()
}
