// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Commits API Server
//!
//! Exchanges Strava authorization codes, keeps the tokens, and serves the
//! athlete's activities next to the activity-graph front end.

use std::sync::Arc;
use strava_commits::{
    config::Config,
    db::TokenStore,
    services::{StravaClient, StravaService},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Missing credentials are fatal at startup and only at startup
    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        e
    })?;
    tracing::info!(port = config.port, "Starting Strava Commits API");

    let db = TokenStore::connect(&config.database_url, config.database_type).await?;

    let client = StravaClient::from_config(&config)?;
    let strava_service = StravaService::new(client, db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        strava_service,
    });

    // Build router
    let app = strava_commits::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("strava_commits=debug,tower_http=info,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
