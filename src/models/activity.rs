// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity models for the API and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity as returned by the athlete activities listing.
///
/// Only the fields the front end reads are kept; field names match Strava's
/// so the JSON handed to the client looks like the upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Sport type (Ride, Run, Hike, etc.)
    #[serde(default)]
    pub sport_type: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: i64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: i64,
    /// Elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Start time (UTC)
    pub start_date: DateTime<Utc>,
    /// Start time in the athlete's timezone, without offset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<String>,
}

/// Narrowed activity written by the `fetch-activities` CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub name: String,
    pub distance: f64,
    pub moving_time: i64,
    pub start_date: DateTime<Utc>,
}

impl From<&StravaActivity> for ActivitySummary {
    fn from(activity: &StravaActivity) -> Self {
        Self {
            name: activity.name.clone(),
            distance: activity.distance,
            moving_time: activity.moving_time,
            start_date: activity.start_date,
        }
    }
}
