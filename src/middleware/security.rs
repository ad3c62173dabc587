// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.
//!
//! JSON responses get a deny-everything CSP. The prebuilt React app gets no
//! CSP at all: its `index.html` carries the inline webpack runtime chunk,
//! which a `script-src 'self'` policy would block.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Policy for API responses, which never render in a browser.
pub const API_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

const COMMON_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

fn insert_all(headers: &mut HeaderMap, pairs: &[(&'static str, &'static str)]) {
    for &(name, value) in pairs {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// Headers for `/api/*` and `/health`.
pub async fn add_api_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    insert_all(headers, COMMON_HEADERS);
    insert_all(
        headers,
        &[("content-security-policy", API_CONTENT_SECURITY_POLICY)],
    );

    response
}

/// Headers for the SPA build and `/public` assets.
pub async fn add_static_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    insert_all(response.headers_mut(), COMMON_HEADERS);
    response
}
