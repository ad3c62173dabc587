// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity API routes.

use crate::error::{AppError, Result};
use crate::models::StravaActivity;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(get_activities))
        .route("/api/activities/year", post(get_activities_for_year))
}

/// Any body the JSON extractor refuses (syntax, missing field, wrong
/// content type) is a plain 400.
fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
}

// ─── Login + Activities ──────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesRequest {
    /// OAuth authorization code from the Strava redirect
    #[serde(default)]
    code: String,
    /// Four-digit year; anything else means 2025 onwards
    #[serde(default)]
    year: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesResponse {
    pub activities: Vec<StravaActivity>,
    pub username: String,
    pub athlete_id: i64,
}

/// Exchange the code, remember the token, and return the year's activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ActivitiesRequest>, JsonRejection>,
) -> Result<Json<ActivitiesResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;

    let code = request.code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("Missing 'code' parameter".to_string()));
    }

    let oauth = state.strava_service.handle_oauth_callback(code).await?;

    let activities = state
        .strava_service
        .activities_for_year(&oauth.access_token, &request.year)
        .await?;

    tracing::info!(
        athlete_id = oauth.athlete_id,
        year = %request.year,
        count = activities.len(),
        "Activities fetched"
    );

    Ok(Json(ActivitiesResponse {
        activities,
        username: oauth.username,
        athlete_id: oauth.athlete_id,
    }))
}

// ─── Activities by stored token ──────────────────────────────

#[derive(Deserialize)]
struct YearRequest {
    #[serde(rename = "athleteId")]
    athlete_id: i64,
    #[serde(default)]
    year: String,
}

#[derive(Serialize)]
pub struct YearActivitiesResponse {
    pub activities: Vec<StravaActivity>,
}

/// Return a year's activities for an athlete who has logged in before.
async fn get_activities_for_year(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<YearRequest>, JsonRejection>,
) -> Result<Json<YearActivitiesResponse>> {
    let Json(request) = payload.map_err(invalid_body)?;

    let activities = state
        .strava_service
        .activities_for_athlete(request.athlete_id, &request.year)
        .await?;

    tracing::info!(
        athlete_id = request.athlete_id,
        year = %request.year,
        count = activities.len(),
        "Activities fetched with stored token"
    );

    Ok(Json(YearActivitiesResponse { activities }))
}
