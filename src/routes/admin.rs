// ABOUTME: Admin JSON API for managing recipes, units, quantities, and ingredients
// ABOUTME: Guarded by the optional admin bearer token; ingredient assignment goes through the kitchen service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Admin routes
//!
//! The record-management surface for the catalog. Lists are JSON, creates
//! answer 201, deletes answer 204, and deleting a unit, quantity, ingredient,
//! or recipe removes the associations that reference it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    database::ListRecipesFilter,
    errors::AppError,
    middleware::{require_admin_token, AdminToken},
    server::ServerResources,
};
use recipe_core::models::{
    NewIngredient, NewQty, NewRecipe, NewUnit, Recipe, UpdateRecipe, UpsertOutcome,
};

/// Recipe as returned by the admin API
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Unique identifier
    pub id: i64,
    /// Title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Publication timestamp
    pub pub_date: DateTime<Utc>,
    /// Published within the last week
    pub was_published_recently: bool,
}

impl RecipeResponse {
    fn from_recipe(recipe: Recipe, now: DateTime<Utc>) -> Self {
        Self {
            was_published_recently: recipe.was_published_recently(now),
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            pub_date: recipe.pub_date,
        }
    }
}

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Page of recipes, newest first
    pub recipes: Vec<RecipeResponse>,
    /// Number of recipes matching the filter across all pages
    pub total: u64,
}

/// Query parameters for listing recipes
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Title substring
    pub search: Option<String>,
    /// Only recipes published at or after this time (RFC 3339)
    pub published_after: Option<DateTime<Utc>>,
    /// Only recipes published at or before this time (RFC 3339)
    pub published_before: Option<DateTime<Utc>>,
    /// Maximum results
    pub limit: Option<u32>,
    /// Pagination offset
    pub offset: Option<u32>,
}

/// Body for setting an ingredient in a recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct SetIngredientBody {
    /// Ingredient to set
    pub ingredient_id: i64,
    /// Amount; must match an existing quantity
    pub amount: i64,
    /// Unit code; must match an existing unit
    pub unit: String,
}

/// Response for setting an ingredient in a recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct SetIngredientResponse {
    /// Whether the association was created or updated
    pub outcome: UpsertOutcome,
}

/// Admin API routes
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes, guarded by `token`
    pub fn routes(resources: Arc<ServerResources>, token: AdminToken) -> Router {
        Router::new()
            .route(
                "/admin/recipes",
                get(Self::handle_list_recipes).post(Self::handle_create_recipe),
            )
            .route(
                "/admin/recipes/:id",
                get(Self::handle_get_recipe)
                    .put(Self::handle_update_recipe)
                    .delete(Self::handle_delete_recipe),
            )
            .route(
                "/admin/recipes/:id/ingredients",
                put(Self::handle_set_ingredient),
            )
            .route(
                "/admin/units",
                get(Self::handle_list_units).post(Self::handle_create_unit),
            )
            .route("/admin/units/:id", delete(Self::handle_delete_unit))
            .route(
                "/admin/qtys",
                get(Self::handle_list_qtys).post(Self::handle_create_qty),
            )
            .route("/admin/qtys/:id", delete(Self::handle_delete_qty))
            .route(
                "/admin/ingredients",
                get(Self::handle_list_ingredients).post(Self::handle_create_ingredient),
            )
            .route(
                "/admin/ingredients/:id",
                delete(Self::handle_delete_ingredient),
            )
            .route_layer(middleware::from_fn_with_state(token, require_admin_token))
            .with_state(resources)
    }

    /// Handle GET /admin/recipes
    async fn handle_list_recipes(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let recipes = resources.database.recipes();
        let filter = ListRecipesFilter {
            search: query.search,
            published_after: query.published_after,
            published_before: query.published_before,
            limit: query.limit,
            offset: query.offset,
        };

        let now = Utc::now();
        let page = recipes.list(&filter).await?;
        let total = recipes.count_matching(&filter).await?;

        let response = ListRecipesResponse {
            recipes: page
                .into_iter()
                .map(|r| RecipeResponse::from_recipe(r, now))
                .collect(),
            total,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /admin/recipes
    async fn handle_create_recipe(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        let recipe = resources.database.recipes().create(&body).await?;
        let response = RecipeResponse::from_recipe(recipe, Utc::now());
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /admin/recipes/:id - recipe with its ingredients
    async fn handle_get_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let detail = resources
            .kitchen
            .recipe_detail(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle PUT /admin/recipes/:id
    async fn handle_update_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
        Json(body): Json<UpdateRecipe>,
    ) -> Result<Response, AppError> {
        let recipe = resources
            .database
            .recipes()
            .update(recipe_id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        let response = RecipeResponse::from_recipe(recipe, Utc::now());
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /admin/recipes/:id
    async fn handle_delete_recipe(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.recipes().delete(recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle PUT /admin/recipes/:id/ingredients
    async fn handle_set_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
        Json(body): Json<SetIngredientBody>,
    ) -> Result<Response, AppError> {
        let outcome = resources
            .kitchen
            .add_product(recipe_id, body.ingredient_id, body.amount, &body.unit)
            .await?;

        let status = match outcome {
            UpsertOutcome::Created => StatusCode::CREATED,
            UpsertOutcome::Updated => StatusCode::OK,
        };
        Ok((status, Json(SetIngredientResponse { outcome })).into_response())
    }

    /// Handle GET /admin/units
    async fn handle_list_units(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let units = resources.database.units().list().await?;
        Ok((StatusCode::OK, Json(units)).into_response())
    }

    /// Handle POST /admin/units
    async fn handle_create_unit(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewUnit>,
    ) -> Result<Response, AppError> {
        let unit = resources.database.units().create(&body).await?;
        Ok((StatusCode::CREATED, Json(unit)).into_response())
    }

    /// Handle DELETE /admin/units/:id
    async fn handle_delete_unit(
        State(resources): State<Arc<ServerResources>>,
        Path(unit_id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.units().delete(unit_id).await? {
            return Err(AppError::not_found(format!("Unit {unit_id}")));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /admin/qtys
    async fn handle_list_qtys(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let qtys = resources.database.quantities().list().await?;
        Ok((StatusCode::OK, Json(qtys)).into_response())
    }

    /// Handle POST /admin/qtys
    async fn handle_create_qty(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewQty>,
    ) -> Result<Response, AppError> {
        let qty = resources.database.quantities().create(&body).await?;
        Ok((StatusCode::CREATED, Json(qty)).into_response())
    }

    /// Handle DELETE /admin/qtys/:id
    async fn handle_delete_qty(
        State(resources): State<Arc<ServerResources>>,
        Path(qty_id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.quantities().delete(qty_id).await? {
            return Err(AppError::not_found(format!("Qty {qty_id}")));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /admin/ingredients
    async fn handle_list_ingredients(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let ingredients = resources.database.ingredients().list().await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle POST /admin/ingredients
    async fn handle_create_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NewIngredient>,
    ) -> Result<Response, AppError> {
        let ingredient = resources.database.ingredients().create(&body).await?;
        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    /// Handle DELETE /admin/ingredients/:id
    async fn handle_delete_ingredient(
        State(resources): State<Arc<ServerResources>>,
        Path(ingredient_id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.ingredients().delete(ingredient_id).await? {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
