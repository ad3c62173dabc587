// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://strava_tokens.db";
const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Which relational backend holds the token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Sqlite,
    Postgres,
}

impl DatabaseType {
    /// Guess the backend from the scheme of a connection string.
    pub fn detect(database_url: &str) -> Option<Self> {
        if database_url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if database_url.starts_with("postgres://")
            || database_url.starts_with("postgresql://")
        {
            Some(Self::Postgres)
        } else {
            None
        }
    }
}

/// A `DATABASE_TYPE` value naming no supported backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported database type {0:?} (expected sqlite or postgres)")]
pub struct UnknownDatabaseType(pub String);

impl FromStr for DatabaseType {
    type Err = UnknownDatabaseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(UnknownDatabaseType(s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Token store connection string
    pub database_url: String,
    /// Token store backend
    pub database_type: DatabaseType,
    /// Server port
    pub port: u16,
    /// Prebuilt single-page app (served with index fallback)
    pub static_dir: PathBuf,
    /// Raw assets served under `/public`
    pub public_dir: PathBuf,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Strava REST API base URL
    pub strava_api_url: String,
    /// Strava OAuth token endpoint
    pub strava_oauth_url: String,
    /// Deadline for every outbound Strava call
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let database_url = non_empty("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database_type = match non_empty("DATABASE_TYPE") {
            Some(raw) => raw
                .parse::<DatabaseType>()
                .map_err(|e| ConfigError::Invalid {
                    var: "DATABASE_TYPE",
                    value: e.0,
                })?,
            None => DatabaseType::detect(&database_url).ok_or_else(|| ConfigError::Invalid {
                var: "DATABASE_URL",
                value: database_url.clone(),
            })?,
        };

        let port = parse_or("PORT", 8080)?;
        let timeout_secs = parse_or("STRAVA_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            strava_client_id: required("STRAVA_CLIENT_ID")?,
            strava_client_secret: required("STRAVA_CLIENT_SECRET")?,
            database_url,
            database_type,
            port,
            static_dir: non_empty("STATIC_DIR")
                .unwrap_or_else(|| "./graph/build".to_string())
                .into(),
            public_dir: non_empty("PUBLIC_DIR")
                .unwrap_or_else(|| "./graph/public".to_string())
                .into(),
            frontend_url: non_empty("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            strava_api_url: non_empty("STRAVA_API_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_API_URL.to_string()),
            strava_oauth_url: non_empty("STRAVA_OAUTH_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_OAUTH_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config for tests: in-memory SQLite and no real Strava endpoints.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_type: DatabaseType::Sqlite,
            port: 8080,
            static_dir: "./graph/build".into(),
            public_dir: "./graph/public".into(),
            frontend_url: "http://localhost:3000".to_string(),
            strava_api_url: "http://127.0.0.1:9/api/v3".to_string(),
            strava_oauth_url: "http://127.0.0.1:9/oauth/token".to_string(),
            http_timeout: Duration::from_secs(5),
        }
    }
}

/// Read a variable, treating an empty value as unset.
fn non_empty(var: &'static str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    non_empty(var).ok_or(ConfigError::Missing(var))
}

fn parse_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(var) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
