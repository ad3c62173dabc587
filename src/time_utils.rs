// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Year filter to Unix epoch bounds.
//!
//! Bounds are a fixed table rather than computed from the calendar, so a new
//! year needs a new entry.

/// Epoch bounds (in seconds) used to filter activities by start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub after: i64,
    /// `None` means no upper bound.
    pub before: Option<i64>,
}

impl YearRange {
    const fn closed(after: i64, before: i64) -> Self {
        Self {
            after,
            before: Some(before),
        }
    }
}

/// 2025-01-01T00:00:00Z onwards, used for any unrecognized year.
pub const DEFAULT_RANGE: YearRange = YearRange {
    after: 1_735_689_600,
    before: None,
};

const YEAR_TABLE: &[(&str, YearRange)] = &[
    ("2025", YearRange::closed(1_735_689_600, 1_767_225_599)),
    ("2024", YearRange::closed(1_704_067_200, 1_735_689_599)),
    ("2023", YearRange::closed(1_672_531_200, 1_704_067_199)),
    ("2022", YearRange::closed(1_640_995_200, 1_672_531_199)),
    ("2021", YearRange::closed(1_609_459_200, 1_640_995_199)),
    ("2020", YearRange::closed(1_577_836_800, 1_609_459_199)),
];

/// Map a four-digit year string to its epoch bounds.
pub fn year_to_epoch(year: &str) -> YearRange {
    YEAR_TABLE
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, range)| *range)
        .unwrap_or(DEFAULT_RANGE)
}

/// Years with an explicit table entry, newest first.
pub fn supported_years() -> impl Iterator<Item = &'static str> {
    YEAR_TABLE.iter().map(|(y, _)| *y)
}
