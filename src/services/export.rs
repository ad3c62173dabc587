// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot export of a year of activities, used by `fetch-activities`.

use crate::db::TokenStore;
use crate::error::AppError;
use crate::models::ActivitySummary;
use crate::services::StravaClient;
use crate::time_utils::year_to_epoch;
use std::io::Write;

/// Exchange `code`, optionally record the token, and list the year's
/// activities narrowed to the fields the graph needs.
///
/// Unlike the login endpoint, a store failure here is an error: the caller
/// asked for the token to be kept.
pub async fn fetch_year_summaries(
    client: &StravaClient,
    code: &str,
    year: &str,
    store: Option<&TokenStore>,
) -> Result<Vec<ActivitySummary>, AppError> {
    let exchange = client.exchange_code(code).await?;
    tracing::info!(athlete_id = exchange.athlete.id, "Authorization code exchanged");

    if let Some(db) = store {
        db.insert(
            exchange.athlete.id,
            &exchange.refresh_token,
            exchange.expires_at,
            &exchange.access_token,
        )
        .await?;
    }

    let activities = client
        .list_activities(&exchange.access_token, Some(year_to_epoch(year)))
        .await?;
    let summaries: Vec<ActivitySummary> = activities.iter().map(ActivitySummary::from).collect();
    tracing::info!(year, count = summaries.len(), "Activities fetched");

    Ok(summaries)
}

/// Write summaries as pretty JSON followed by a newline.
pub fn write_summaries<W: Write>(mut writer: W, summaries: &[ActivitySummary]) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, summaries)?;
    writeln!(writer)?;
    writer.flush()
}
