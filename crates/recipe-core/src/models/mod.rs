// ABOUTME: Recipe data models shared by the store layer, the core, and the HTTP routes
// ABOUTME: Splits stored documents, write inputs, and read-side projections into distinct types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe models
//!
//! The stored body of a recipe never carries its own id: the id lives in the
//! store key and is attached when a document is read back. `RecipeDocument`
//! is what goes over the store wire, `Recipe` is what leaves the core.

/// Recipe documents, identifiers, and write inputs
pub mod recipe;

/// Ratings and the rated projection
pub mod rating;

pub use rating::{average_rating, RecipeRated, RecipeRating};
pub use recipe::{NewRecipe, Recipe, RecipeDocument, RecipeFields, RecipeId};
