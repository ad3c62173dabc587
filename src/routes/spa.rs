// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static file serving for the prebuilt front end.

use crate::AppState;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

/// Index document of the single-page app.
pub const INDEX_FILE: &str = "index.html";

/// `/public/*` serves raw assets; every other unmatched path serves the SPA
/// build, falling back to its index so client-side routes resolve.
pub fn routes(static_dir: &Path, public_dir: &Path) -> Router<Arc<AppState>> {
    let index = static_dir.join(INDEX_FILE);
    tracing::debug!(
        static_dir = %static_dir.display(),
        public_dir = %public_dir.display(),
        "Serving front end"
    );

    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest_service("/public", ServeDir::new(public_dir))
        .fallback_service(spa)
}
