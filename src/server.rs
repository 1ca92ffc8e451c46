// ABOUTME: HTTP server assembly: shared resources, router composition, and lifecycle
// ABOUTME: Layers CORS, timeout, tracing, and request IDs over the recipe, admin, and health routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Book Contributors

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    config::ServerConfig,
    database::Database,
    middleware::{request_id_middleware, setup_cors, AdminToken},
    routes::{AdminRoutes, HealthRoutes, RecipesRoutes},
    services::{KitchenService, RetryPolicy},
};

/// Everything a request handler may need
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// Kitchen operations over the same database
    pub kitchen: KitchenService,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the database and configuration; the retry policy comes from the database settings
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let kitchen = KitchenService::new(
            database.clone(),
            RetryPolicy::from_config(&config.database),
        );
        Self {
            database,
            kitchen,
            config,
        }
    }
}

/// The recipe book HTTP server
pub struct RecipeBookServer {
    resources: Arc<ServerResources>,
}

impl RecipeBookServer {
    /// Create a server over prepared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete router with all layers applied
    #[must_use]
    pub fn router(&self) -> Router {
        let config = &self.resources.config;
        let admin_token = AdminToken::new(config.admin_token.as_deref());

        Router::new()
            .merge(RecipesRoutes::routes(Arc::clone(&self.resources)))
            .merge(AdminRoutes::routes(Arc::clone(&self.resources), admin_token))
            .merge(HealthRoutes::routes(Arc::clone(&self.resources)))
            .layer(TimeoutLayer::new(config.http.request_timeout()))
            .layer(setup_cors(&config.http))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// Bind the configured address and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the server fails
    pub async fn run(self) -> Result<()> {
        let http = &self.resources.config.http;
        let address = format!("{}:{}", http.host, http.port);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener
            .local_addr()
            .context("Failed to read listener address")?;
        info!(address = %local, "Recipe book server listening");

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("Server stopped, closing database");
        self.resources.database.close().await;
        Ok(())
    }
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
