// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava Commits: a GitHub-style contribution graph of Strava activities.
//!
//! This crate provides the backend that exchanges Strava authorization
//! codes, keeps the resulting tokens, and proxies the athlete's activity
//! listing to the single-page front end it also serves.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::TokenStore;
use services::StravaService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: TokenStore,
    pub strava_service: StravaService,
}
