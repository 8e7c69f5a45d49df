// ABOUTME: Re-exports recipe models and projections from recipe-core
// ABOUTME: Recipe, RecipeDocument, and RecipeRated are the same types across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::models::*;
