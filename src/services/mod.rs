// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod export;
pub mod strava;

pub use export::{fetch_year_summaries, write_summaries};
pub use strava::{OAuthResult, StravaClient, StravaService};
