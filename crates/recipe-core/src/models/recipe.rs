// ABOUTME: Recipe identifier, stored document body, and create/update input types
// ABOUTME: Decoding a stored document requires every field; nothing silently defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Integer identifier of a recipe
///
/// Rendered in decimal it is also the recipe's store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(u64);

impl RecipeId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Store key for this recipe
    #[must_use]
    pub fn storage_key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for RecipeId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| AppError::invalid_input(format!("Invalid recipe ID '{s}'")))
    }
}

/// Mutable business fields of a recipe
///
/// This is the update input: all four fields are overwritten, ratings are
/// never touched by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFields {
    /// Display name
    pub name: String,
    /// Preparation time in minutes
    #[serde(rename = "preptime")]
    pub prep_time: f32,
    /// Difficulty level
    pub difficulty: i32,
    /// Whether the recipe is vegetarian
    pub vegetarian: bool,
}

impl RecipeFields {
    /// Reject values no recipe can hold
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the preparation time is NaN or infinite
    pub fn validate(&self) -> AppResult<()> {
        if !self.prep_time.is_finite() {
            return Err(AppError::invalid_input(format!(
                "Preparation time must be a finite number, got {}",
                self.prep_time
            )));
        }
        Ok(())
    }
}

/// Create input: the business fields plus any ratings the client already has
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Display name
    pub name: String,
    /// Preparation time in minutes
    #[serde(rename = "preptime")]
    pub prep_time: f32,
    /// Difficulty level
    pub difficulty: i32,
    /// Whether the recipe is vegetarian
    pub vegetarian: bool,
    /// Initial ratings, usually empty
    #[serde(default)]
    pub ratings: Vec<i32>,
}

impl NewRecipe {
    /// New recipe with no ratings
    #[must_use]
    pub fn from_fields(fields: RecipeFields) -> Self {
        Self {
            name: fields.name,
            prep_time: fields.prep_time,
            difficulty: fields.difficulty,
            vegetarian: fields.vegetarian,
            ratings: Vec::new(),
        }
    }
}

/// Stored body of a recipe
///
/// Every field is required on decode. A document missing one is reported as
/// a serialization error instead of being read back with zero values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    /// Display name
    pub name: String,
    /// Preparation time in minutes
    #[serde(rename = "preptime")]
    pub prep_time: f32,
    /// Difficulty level
    pub difficulty: i32,
    /// Whether the recipe is vegetarian
    pub vegetarian: bool,
    /// Append-only rating history
    pub ratings: Vec<i32>,
}

impl RecipeDocument {
    /// Overwrite the business fields, keeping the rating history
    pub fn apply_fields(&mut self, fields: RecipeFields) {
        self.name = fields.name;
        self.prep_time = fields.prep_time;
        self.difficulty = fields.difficulty;
        self.vegetarian = fields.vegetarian;
    }

    /// The business fields of this document
    #[must_use]
    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            name: self.name.clone(),
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            vegetarian: self.vegetarian,
        }
    }

    /// Append one rating to the history
    pub fn push_rating(&mut self, rating: i32) {
        self.ratings.push(rating);
    }

    /// Attach the identifier recovered from the store key
    #[must_use]
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            vegetarian: self.vegetarian,
            ratings: self.ratings,
        }
    }
}

impl From<NewRecipe> for RecipeDocument {
    fn from(recipe: NewRecipe) -> Self {
        Self {
            name: recipe.name,
            prep_time: recipe.prep_time,
            difficulty: recipe.difficulty,
            vegetarian: recipe.vegetarian,
            ratings: recipe.ratings,
        }
    }
}

/// A recipe as returned to callers: the stored document plus its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
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
    /// Append-only rating history
    pub ratings: Vec<i32>,
}

impl Recipe {
    /// The business fields of this recipe
    #[must_use]
    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            name: self.name.clone(),
            prep_time: self.prep_time,
            difficulty: self.difficulty,
            vegetarian: self.vegetarian,
        }
    }
}
