// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod spa;

use crate::middleware::security::{add_api_security_headers, add_static_security_headers};
use crate::AppState;
use axum::http::{header, Method};
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Hosts allowed as CORS origins on any port, for local front end development.
const LOCAL_ORIGINS: &[&str] = &["http://localhost", "http://127.0.0.1"];

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub store: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        store: state.db.backend_name().to_string(),
    })
}

/// Whether a browser `Origin` may call the API.
///
/// Accepts the configured front end exactly, plus `http://localhost` and
/// `http://127.0.0.1` with or without a numeric port.
pub fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    if origin == frontend_url.trim_end_matches('/') {
        return true;
    }

    LOCAL_ORIGINS.iter().any(|host| match origin.strip_prefix(host) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix(':')
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
        None => false,
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| is_allowed_origin(origin, &frontend_url))
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let json_routes = Router::new()
        .route("/health", get(health_check))
        .merge(api::routes())
        .layer(middleware::from_fn(add_api_security_headers));

    let static_files = spa::routes(&state.config.static_dir, &state.config.public_dir)
        .layer(middleware::from_fn(add_static_security_headers));

    Router::new()
        .merge(json_routes)
        .merge(static_files)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTEND: &str = "http://localhost:3000";

    #[test]
    fn test_allowed_origins() {
        assert!(is_allowed_origin("http://localhost:3000", FRONTEND));
        assert!(is_allowed_origin("http://localhost", FRONTEND));
        assert!(is_allowed_origin("http://localhost:5173", FRONTEND));
        assert!(is_allowed_origin("http://127.0.0.1:8080", FRONTEND));
        assert!(is_allowed_origin(
            "https://commits.example.org",
            "https://commits.example.org/"
        ));
    }

    #[test]
    fn test_lookalike_origins_rejected() {
        assert!(!is_allowed_origin("http://localhost.attacker.example", FRONTEND));
        assert!(!is_allowed_origin("http://localhostevil.com", FRONTEND));
        assert!(!is_allowed_origin("http://127.0.0.1.nip.io", FRONTEND));
        assert!(!is_allowed_origin("http://localhost:", FRONTEND));
        assert!(!is_allowed_origin("http://localhost:80@evil.com", FRONTEND));
        assert!(!is_allowed_origin("https://localhost:3000", FRONTEND));
    }
}
