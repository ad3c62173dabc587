// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! OAuth token models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the token table. Rows are append-only; the newest row for an
/// athlete holds their current token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TokenRecord {
    /// Store-assigned surrogate key
    pub id: i64,
    /// Strava athlete ID
    pub athlete_id: i64,
    pub refresh_token: String,
    pub access_token: String,
    /// When the access token expires (Unix seconds)
    pub expires_at: i64,
    /// Store-assigned insertion time (UTC)
    pub created_at: NaiveDateTime,
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchange {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: i64,
    pub athlete: StravaAthlete,
}

/// Athlete info from OAuth token exchange.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaAthlete {
    pub id: i64,
    /// Absent for athletes who never chose a username
    #[serde(default)]
    pub username: Option<String>,
}
