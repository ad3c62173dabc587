// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite or PostgreSQL token store).

pub mod tokens;

pub use tokens::TokenStore;
