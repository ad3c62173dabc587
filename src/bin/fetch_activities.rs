// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fetch one year of activities for a Strava authorization code.
//!
//! Writes the narrowed activity list as JSON, e.g. into the front end's
//! `public/test.json` for offline development of the graph.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use strava_commits::{
    config::Config,
    db::TokenStore,
    services::{fetch_year_summaries, write_summaries, StravaClient},
};

#[derive(Debug, Parser)]
#[command(name = "fetch-activities", about = "Dump a year of Strava activities as JSON")]
struct Args {
    /// Authorization code from the Strava OAuth redirect
    #[arg(long, env = "STRAVA_AUTH_CODE")]
    code: String,

    /// Four-digit year; anything else means 2025 onwards
    #[arg(long, default_value = "2025")]
    year: String,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also append the token to the configured token store
    #[arg(long)]
    store: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strava_commits=info,fetch_activities=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;
    let client = StravaClient::from_config(&config)?;

    let store = if args.store {
        Some(TokenStore::connect(&config.database_url, config.database_type).await?)
    } else {
        None
    };

    let summaries = fetch_year_summaries(&client, &args.code, &args.year, store.as_ref())
        .await
        .context("fetching activities")?;

    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_summaries(std::io::BufWriter::new(file), &summaries)?;
        }
        None => write_summaries(std::io::stdout().lock(), &summaries)?,
    }

    Ok(())
}
