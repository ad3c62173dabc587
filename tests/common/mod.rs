// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use strava_commits::config::Config;
use strava_commits::db::TokenStore;
use strava_commits::routes::create_router;
use strava_commits::services::{StravaClient, StravaService};
use strava_commits::AppState;
use wiremock::matchers::{body_string_contains, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const GOOD_CODE: &str = "good_code";
#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "access_good";
#[allow(dead_code)]
pub const ATHLETE_ID: i64 = 134815;

/// Config pointing every Strava endpoint at the mock server.
#[allow(dead_code)]
pub fn test_config(strava: &MockServer) -> Config {
    Config {
        strava_api_url: format!("{}/api/v3", strava.uri()),
        strava_oauth_url: format!("{}/oauth/token", strava.uri()),
        ..Config::test_default()
    }
}

/// Create a test app with an in-memory token store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = TokenStore::in_memory()
        .await
        .expect("in-memory store should open");
    let client = StravaClient::from_config(&config).expect("client should build");
    let strava_service = StravaService::new(client, db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        strava_service,
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn sample_activities() -> serde_json::Value {
    json!([
        {
            "id": 1001,
            "name": "Morning Ride",
            "sport_type": "Ride",
            "distance": 24931.4,
            "moving_time": 4500,
            "elapsed_time": 4915,
            "total_elevation_gain": 516.0,
            "start_date": "2024-05-04T15:04:05Z",
            "start_date_local": "2024-05-04T08:04:05Z",
            "kudos_count": 7
        },
        {
            "id": 1002,
            "name": "Lunch Run",
            "sport_type": "Run",
            "distance": 8012.0,
            "moving_time": 2400,
            "start_date": "2024-05-05T19:30:00Z"
        }
    ])
}

/// Token endpoint that accepts [`GOOD_CODE`] and rejects everything else.
#[allow(dead_code)]
pub async fn mock_token_endpoint(strava: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains(format!("code={}", GOOD_CODE)))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=test_client_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_at": 1735711200,
            "expires_in": 21600,
            "refresh_token": "refresh_good",
            "access_token": ACCESS_TOKEN,
            "athlete": { "id": ATHLETE_ID, "username": "marianne_v" }
        })))
        .with_priority(1)
        .mount(strava)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Bad Request",
            "errors": [{ "resource": "AuthorizationCode", "field": "code", "code": "invalid" }]
        })))
        .with_priority(5)
        .mount(strava)
        .await;
}

/// Activities listing that answers only for [`ACCESS_TOKEN`].
#[allow(dead_code)]
pub async fn mock_activities_endpoint(strava: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header_eq("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_activities()))
        .mount(strava)
        .await;
}

/// Write a minimal SPA build and public directory under `root`.
#[allow(dead_code)]
pub fn write_frontend(root: &Path) {
    let build = root.join("build");
    let public = root.join("public");
    std::fs::create_dir_all(build.join("static/js")).unwrap();
    std::fs::create_dir_all(&public).unwrap();

    std::fs::write(
        build.join("index.html"),
        "<!doctype html><div id=\"root\">graph</div><script>!function(e){window.runtime=e}([])</script>",
    )
    .unwrap();
    std::fs::write(build.join("static/js/main.js"), "console.log('graph');").unwrap();
    std::fs::write(public.join("test.json"), "[]").unwrap();
}
