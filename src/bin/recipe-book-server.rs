// ABOUTME: Recipe book HTTP server binary
// ABOUTME: Loads configuration, opens the database, and serves the HTML pages and admin API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

//! # Recipe Book Server Binary
//!
//! Configuration comes from the environment; `--http-port` and
//! `--database-url` override the matching variables.

use anyhow::Result;
use clap::Parser;
use recipe_book::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    server::{RecipeBookServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-book-server")]
#[command(about = "Recipe Book - recipes, ingredients, and a kitchen usage counter")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    config.validate()?;

    logging::init_from_env()?;

    info!("Starting Recipe Book server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    let resources = Arc::new(ServerResources::new(database, config));
    let server = RecipeBookServer::new(resources);

    if let Err(e) = server.run().await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    info!("Recipe Book server stopped");
    Ok(())
}
