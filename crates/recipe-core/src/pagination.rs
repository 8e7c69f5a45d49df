// ABOUTME: Offset/limit pagination for recipe listings and searches
// ABOUTME: Handlers clamp raw query values here before calling the query engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// A page of a listing expressed as an offset and a row count
///
/// The query engine executes exactly the offset and count it receives.
/// Request handlers build pages through [`PageRequest::clamped`], which is
/// where the public bounds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip
    pub start: usize,
    /// Maximum number of rows to return
    pub count: usize,
}

impl PageRequest {
    /// Create a page without applying any bounds
    #[must_use]
    pub const fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// Build a page from raw client values
    ///
    /// A count outside `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]` (or absent) becomes
    /// `MAX_PAGE_SIZE`; a negative or absent start becomes zero.
    #[must_use]
    pub fn clamped(start: Option<i64>, count: Option<i64>) -> Self {
        let count = count
            .and_then(|c| usize::try_from(c).ok())
            .filter(|c| (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(c))
            .unwrap_or(MAX_PAGE_SIZE);
        let start = start.and_then(|s| usize::try_from(s).ok()).unwrap_or(0);

        Self { start, count }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, MAX_PAGE_SIZE)
    }
}
