// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava client tests against a mock server.

use serde_json::json;
use std::time::Duration;
use strava_commits::error::AppError;
use strava_commits::services::StravaClient;
use strava_commits::time_utils::year_to_epoch;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{ACCESS_TOKEN, ATHLETE_ID, GOOD_CODE};

#[tokio::test]
async fn test_exchange_code_parses_tokens_and_athlete() {
    let strava = MockServer::start().await;
    common::mock_token_endpoint(&strava).await;
    let client = StravaClient::from_config(&common::test_config(&strava)).unwrap();

    let exchange = client.exchange_code(GOOD_CODE).await.unwrap();

    assert_eq!(exchange.access_token, ACCESS_TOKEN);
    assert_eq!(exchange.refresh_token, "refresh_good");
    assert_eq!(exchange.expires_at, 1735711200);
    assert_eq!(exchange.athlete.id, ATHLETE_ID);
    assert_eq!(exchange.athlete.username.as_deref(), Some("marianne_v"));
}

#[tokio::test]
async fn test_exchange_code_failure_carries_status_and_body() {
    let strava = MockServer::start().await;
    common::mock_token_endpoint(&strava).await;
    let client = StravaClient::from_config(&common::test_config(&strava)).unwrap();

    let err = client.exchange_code("not_a_code").await.unwrap_err();

    match err {
        AppError::TokenExchange { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("AuthorizationCode"), "body was {}", body);
        }
        other => panic!("expected TokenExchange, got {:?}", other),
    }
}

#[tokio::test]
async fn test_exchange_code_without_access_token_is_unauthorized() {
    let strava = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "athlete": { "id": 1 }
        })))
        .mount(&strava)
        .await;
    let client = StravaClient::from_config(&common::test_config(&strava)).unwrap();

    let err = client.exchange_code(GOOD_CODE).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized), "got {:?}", err);
}

#[tokio::test]
async fn test_list_activities_sends_bearer_and_bounds() {
    let strava = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header("authorization", "Bearer tok"))
        .and(query_param("after", "1672531200"))
        .and(query_param("before", "1704067199"))
        .and(query_param("per_page", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_activities()))
        .expect(1)
        .mount(&strava)
        .await;
    let client = StravaClient::from_config(&common::test_config(&strava)).unwrap();

    let activities = client
        .list_activities("tok", Some(year_to_epoch("2023")))
        .await
        .unwrap();

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[1].name, "Lunch Run");
    assert_eq!(activities[1].elapsed_time, 0);
}

#[tokio::test]
async fn test_list_activities_rejects_unexpected_shape() {
    let strava = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "nope" })))
        .mount(&strava)
        .await;
    let client = StravaClient::from_config(&common::test_config(&strava)).unwrap();

    let err = client.list_activities("tok", None).await.unwrap_err();
    assert!(matches!(err, AppError::StravaApi(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let strava = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&strava)
        .await;

    let mut config = common::test_config(&strava);
    config.http_timeout = Duration::from_millis(200);
    let client = StravaClient::from_config(&config).unwrap();

    let err = client.list_activities("tok", None).await.unwrap_err();
    assert!(matches!(err, AppError::StravaApi(_)), "got {:?}", err);
}
