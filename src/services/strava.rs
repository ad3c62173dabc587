// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client and the service that ties it to the token store.
//!
//! Handles:
//! - Authorization code exchange
//! - Activity listing filtered by year
//!
//! Activity listing asks for a single page of 200 (Strava's maximum page
//! size). Athletes with more activities than that in the requested range get
//! a truncated list.

use crate::config::Config;
use crate::db::TokenStore;
use crate::error::AppError;
use crate::models::{StravaActivity, TokenExchange};
use crate::time_utils::{supported_years, year_to_epoch, YearRange};
use serde::Deserialize;
use std::time::Duration;

/// Page size requested from the activities listing.
pub const ACTIVITIES_PER_PAGE: u32 = 200;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Strava API client.
#[derive(Clone, Debug)]
pub struct StravaClient {
    http: reqwest::Client,
    api_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.strava_api_url.trim_end_matches('/').to_string(),
            oauth_url: config.strava_oauth_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        })
    }

    /// Exchange an authorization code for tokens and athlete identity.
    ///
    /// A rejected code comes back as [`AppError::TokenExchange`] carrying
    /// Strava's status and body.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchange, AppError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let exchange: TokenExchange = response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("Failed to parse token response: {}", e)))?;

        if exchange.access_token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(exchange)
    }

    /// List the authenticated athlete's activities, one page of up to 200.
    pub async fn list_activities(
        &self,
        access_token: &str,
        range: Option<YearRange>,
    ) -> Result<Vec<StravaActivity>, AppError> {
        let url = format!("{}/athlete/activities", self.api_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&activity_query(range))
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Query string for the activities listing. `before` only goes out when it
/// is a positive bound.
fn activity_query(range: Option<YearRange>) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(3);
    if let Some(range) = range {
        query.push(("after", range.after.to_string()));
        if let Some(before) = range.before.filter(|b| *b > 0) {
            query.push(("before", before.to_string()));
        }
    }
    query.push(("per_page", ACTIVITIES_PER_PAGE.to_string()));
    query
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaService - client plus token store
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a successful authorization code exchange.
#[derive(Debug, Clone)]
pub struct OAuthResult {
    pub athlete_id: i64,
    pub username: String,
    pub access_token: String,
}

/// High-level Strava service used by the HTTP handlers and the CLI.
#[derive(Clone, Debug)]
pub struct StravaService {
    client: StravaClient,
    db: TokenStore,
}

impl StravaService {
    pub fn new(client: StravaClient, db: TokenStore) -> Self {
        Self { client, db }
    }

    /// Exchange a code for tokens and record them.
    ///
    /// A store failure is logged and does not fail the login: the caller
    /// still gets a usable access token.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<OAuthResult, AppError> {
        let exchange = self.client.exchange_code(code).await?;
        let athlete_id = exchange.athlete.id;

        if let Err(e) = self
            .db
            .insert(
                athlete_id,
                &exchange.refresh_token,
                exchange.expires_at,
                &exchange.access_token,
            )
            .await
        {
            tracing::warn!(error = %e, athlete_id, "Failed to store token data, continuing anyway");
        }

        tracing::info!(athlete_id, "Authorization code exchanged");

        Ok(OAuthResult {
            athlete_id,
            username: exchange.athlete.username.unwrap_or_default(),
            access_token: exchange.access_token,
        })
    }

    /// Activities for a year, using an access token the caller already has.
    pub async fn activities_for_year(
        &self,
        access_token: &str,
        year: &str,
    ) -> Result<Vec<StravaActivity>, AppError> {
        if !supported_years().any(|y| y == year) {
            tracing::debug!(year, "Unrecognized year, using open-ended default range");
        }

        let activities = self
            .client
            .list_activities(access_token, Some(year_to_epoch(year)))
            .await?;

        if activities.len() >= ACTIVITIES_PER_PAGE as usize {
            tracing::warn!(
                year,
                count = activities.len(),
                "Activity listing hit page size, results may be truncated"
            );
        }

        Ok(activities)
    }

    /// Activities for a year using the athlete's most recently stored token.
    pub async fn activities_for_athlete(
        &self,
        athlete_id: i64,
        year: &str,
    ) -> Result<Vec<StravaActivity>, AppError> {
        let access_token = self
            .db
            .most_recent_access_token(athlete_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No access token found for athlete {}", athlete_id))
            })?;

        self.activities_for_year(&access_token, year).await
    }
}
