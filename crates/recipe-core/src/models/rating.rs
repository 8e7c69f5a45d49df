// ABOUTME: Rating input and the rated recipe projection with its derived average
// ABOUTME: The average is recomputed from the rating history on every read, never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::recipe::{RecipeDocument, RecipeId};

/// One rating submitted for a recipe
///
/// Not persisted as its own record: the value is folded into the recipe's
/// rating history and the input is echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRating {
    /// Recipe receiving the rating
    pub recipe_id: RecipeId,
    /// Rating value; no range is enforced
    pub rating: i32,
}

/// Read-side projection of a recipe with its average rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRated {
    /// Identifier recovered from the store key
    pub id: RecipeId,
    /// Display name
    pub name: String,
    /// Preparation time in minutes
    #[serde(rename = "preptime")]
    pub prep_time: f32,
    /// Difficulty level
    pub difficulty: i32,
    /// Whether the recipe is vegetarian
    pub vegetarian: bool,
    /// Mean of the rating history, zero when there are no ratings
    pub avg_rating: f32,
}

impl RecipeRated {
    /// Project a stored document, computing its average rating
    #[must_use]
    pub fn project(id: RecipeId, document: &RecipeDocument) -> Self {
        Self {
            id,
            name: document.name.clone(),
            prep_time: document.prep_time,
            difficulty: document.difficulty,
            vegetarian: document.vegetarian,
            avg_rating: average_rating(&document.ratings),
        }
    }
}

/// Arithmetic mean of a rating history
///
/// Returns `0.0` for an empty history.
#[must_use]
pub fn average_rating(ratings: &[i32]) -> f32 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // Safe: rating histories are far below f64 integer precision limits
    #[allow(clippy::cast_precision_loss)]
    let mean = total as f64 / ratings.len() as f64;
    #[allow(clippy::cast_possible_truncation)]
    let mean = mean as f32;
    mean
}
