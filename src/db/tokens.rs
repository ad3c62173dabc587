// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only OAuth token store.
//!
//! Every login inserts a new row; nothing is updated or deleted, so history
//! per athlete grows without bound. The current token for an athlete is the
//! most recently created row (ties broken by id).

use crate::config::DatabaseType;
use crate::error::AppError;
use crate::models::TokenRecord;
use sqlx::migrate::MigrateDatabase;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

const SQLITE_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tokens (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    athlete_id INTEGER NOT NULL,
    refresh_token TEXT NOT NULL,
    expires_at INTEGER NOT NULL,
    access_token TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const POSTGRES_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tokens (
    id BIGSERIAL PRIMARY KEY,
    athlete_id BIGINT NOT NULL,
    refresh_token TEXT NOT NULL,
    expires_at BIGINT NOT NULL,
    access_token TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc')
)";

const SELECT_LATEST_SQLITE: &str = "SELECT id, athlete_id, refresh_token, access_token, expires_at, created_at \
     FROM tokens WHERE athlete_id = ? ORDER BY created_at DESC, id DESC LIMIT 1";

const SELECT_LATEST_POSTGRES: &str = "SELECT id, athlete_id, refresh_token, access_token, expires_at, created_at \
     FROM tokens WHERE athlete_id = $1 ORDER BY created_at DESC, id DESC LIMIT 1";

/// Token store backed by whichever engine the configuration selects.
#[derive(Clone, Debug)]
pub enum TokenStore {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl TokenStore {
    /// Connect to the store and create the token table if absent.
    ///
    /// A missing SQLite database file is created.
    pub async fn connect(database_url: &str, database_type: DatabaseType) -> Result<Self, AppError> {
        let store = match database_type {
            DatabaseType::Sqlite => {
                if !Sqlite::database_exists(database_url).await? {
                    tracing::info!(url = %database_url, "Creating SQLite database");
                    Sqlite::create_database(database_url).await?;
                }
                let pool = SqlitePool::connect(database_url).await?;
                Self::Sqlite(pool)
            }
            DatabaseType::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(database_url)
                    .await?;
                Self::Postgres(pool)
            }
        };

        store.ensure_schema().await?;
        tracing::info!(backend = store.backend_name(), "Token store ready");
        Ok(store)
    }

    /// Private in-memory SQLite store.
    ///
    /// Pinned to one connection that never expires: every SQLite
    /// `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self::Sqlite(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        match self {
            Self::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA).execute(pool).await?;
            }
            Self::Postgres(pool) => {
                sqlx::query(POSTGRES_SCHEMA).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Append a token row for an athlete.
    pub async fn insert(
        &self,
        athlete_id: i64,
        refresh_token: &str,
        expires_at: i64,
        access_token: &str,
    ) -> Result<(), AppError> {
        match self {
            Self::Sqlite(pool) => {
                sqlx::query(
                    "INSERT INTO tokens (athlete_id, refresh_token, expires_at, access_token) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(athlete_id)
                .bind(refresh_token)
                .bind(expires_at)
                .bind(access_token)
                .execute(pool)
                .await?;
            }
            Self::Postgres(pool) => {
                sqlx::query(
                    "INSERT INTO tokens (athlete_id, refresh_token, expires_at, access_token) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(athlete_id)
                .bind(refresh_token)
                .bind(expires_at)
                .bind(access_token)
                .execute(pool)
                .await?;
            }
        }

        tracing::debug!(athlete_id, "Stored token row");
        Ok(())
    }

    /// Newest token row for an athlete, if any.
    pub async fn latest(&self, athlete_id: i64) -> Result<Option<TokenRecord>, AppError> {
        let record = match self {
            Self::Sqlite(pool) => {
                sqlx::query_as::<_, TokenRecord>(SELECT_LATEST_SQLITE)
                    .bind(athlete_id)
                    .fetch_optional(pool)
                    .await?
            }
            Self::Postgres(pool) => {
                sqlx::query_as::<_, TokenRecord>(SELECT_LATEST_POSTGRES)
                    .bind(athlete_id)
                    .fetch_optional(pool)
                    .await?
            }
        };
        Ok(record)
    }

    /// Access token from the newest row for an athlete.
    pub async fn most_recent_access_token(
        &self,
        athlete_id: i64,
    ) -> Result<Option<String>, AppError> {
        Ok(self.latest(athlete_id).await?.map(|r| r.access_token))
    }
}
