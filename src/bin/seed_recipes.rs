// ABOUTME: Demo catalog seeding utility for the recipe book
// ABOUTME: Creates units, quantities, ingredients, and a few recipes with their ingredient lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! Demo data seeder.
//!
//! Usage:
//! ```bash
//! # Seed using DATABASE_URL from the environment
//! cargo run --bin seed-recipes
//!
//! # Override database URL
//! cargo run --bin seed-recipes -- --database-url sqlite:./data/recipes.db
//!
//! # Seed even if recipes already exist
//! cargo run --bin seed-recipes -- --force
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use recipe_book::{
    config::{DatabaseConfig, DatabaseUrl},
    database::Database,
    models::{NewIngredient, NewQty, NewRecipe, NewUnit},
    services::{KitchenService, RetryPolicy},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "seed-recipes",
    about = "Recipe Book demo data seeder",
    long_about = "Create demo units, quantities, ingredients, and recipes"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Seed even if recipes already exist
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

const UNITS: &[(&str, &str)] = &[
    ("g", "gram, one-thousandth of a kilogram in SI"),
    ("kg", "kilogram"),
    ("ml", "millilitre"),
    ("pcs", "pieces"),
];

const AMOUNTS: &[i64] = &[1, 2, 5, 10, 25, 50, 100, 200, 250, 500];

const INGREDIENTS: &[&str] = &["sugar", "salt", "flour", "pork", "apple", "milk", "egg"];

/// Recipe title, description, and (ingredient, amount, unit) lines
const RECIPES: &[(&str, &str, &[(&str, i64, &str)])] = &[
    (
        "Pancake",
        "Thin pancakes for a slow breakfast",
        &[
            ("flour", 200, "g"),
            ("milk", 500, "ml"),
            ("egg", 2, "pcs"),
            ("sugar", 25, "g"),
            ("salt", 1, "g"),
        ],
    ),
    (
        "Apple Pie",
        "Classic pie with a lattice top",
        &[
            ("flour", 250, "g"),
            ("apple", 1, "kg"),
            ("sugar", 100, "g"),
            ("salt", 5, "g"),
        ],
    ),
    (
        "Stewed Pork",
        "Pork slowly stewed with salt and a pinch of sugar",
        &[("pork", 500, "g"), ("salt", 10, "g"), ("sugar", 5, "g")],
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .init();

    let mut config = DatabaseConfig::from_env()?;
    if let Some(url) = args.database_url.as_deref() {
        config.url = DatabaseUrl::parse_url(url)?;
    }
    config.auto_migrate = true;

    info!(url = %config.url, "Seeding recipe book");
    let database = Database::new(&config).await?;

    if !args.force && database.recipes().count().await? > 0 {
        warn!("Recipes already exist, skipping (use --force to seed anyway)");
        return Ok(());
    }

    for (code, description) in UNITS {
        let request = NewUnit {
            unit: (*code).to_owned(),
            description: Some((*description).to_owned()),
        };
        if database.units().get_by_code(code).await?.is_none() {
            database.units().create(&request).await?;
        }
    }

    for &amount in AMOUNTS {
        if database.quantities().get_by_amount(amount).await?.is_none() {
            database.quantities().create(&NewQty { amount }).await?;
        }
    }

    let mut ingredient_ids = Vec::with_capacity(INGREDIENTS.len());
    for name in INGREDIENTS {
        let existing = database
            .ingredients()
            .list()
            .await?
            .into_iter()
            .find(|i| i.name == *name);
        let ingredient = match existing {
            Some(ingredient) => ingredient,
            None => database.ingredients().create(&NewIngredient::named(*name)).await?,
        };
        ingredient_ids.push((*name, ingredient.id));
    }

    let kitchen = KitchenService::new(database.clone(), RetryPolicy::from_config(&config));
    let mut recipes_created = 0;
    for (title, description, lines) in RECIPES {
        let recipe = database
            .recipes()
            .create(&NewRecipe {
                title: (*title).to_owned(),
                description: Some((*description).to_owned()),
                pub_date: None,
            })
            .await
            .with_context(|| format!("Failed to create recipe {title}"))?;

        for (ingredient, amount, unit) in *lines {
            let ingredient_id = ingredient_ids
                .iter()
                .find(|(name, _)| name == ingredient)
                .map(|(_, id)| *id)
                .with_context(|| format!("Unknown ingredient {ingredient}"))?;
            kitchen
                .add_product(recipe.id, ingredient_id, *amount, unit)
                .await
                .with_context(|| format!("Failed to add {ingredient} to {title}"))?;
        }
        recipes_created += 1;
    }

    info!(recipes = recipes_created, "Seeding complete");
    database.close().await;
    Ok(())
}
