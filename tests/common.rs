// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory recipe services, sample recipes, and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `recipe_server`

use recipe_server::config::{RecipeConfig, ServerConfig};
use recipe_server::models::{NewRecipe, RecipeFields};
use recipe_server::recipes::RecipeService;
use recipe_server::resources::ServerResources;
use recipe_server::store::memory::InMemoryStore;
use recipe_server::store::Store;
use std::sync::Arc;

/// Recipe service over a fresh in-memory store, plus the store itself
pub fn memory_service() -> (RecipeService<InMemoryStore>, InMemoryStore) {
    let store = InMemoryStore::new();
    let service = RecipeService::new(store.clone(), &RecipeConfig::default());
    (service, store)
}

/// Create input with no ratings
pub fn new_recipe(name: &str, prep_time: f32) -> NewRecipe {
    NewRecipe {
        name: name.to_owned(),
        prep_time,
        difficulty: 2,
        vegetarian: true,
        ratings: Vec::new(),
    }
}

/// Update input
pub fn fields(name: &str, prep_time: f32, difficulty: i32, vegetarian: bool) -> RecipeFields {
    RecipeFields {
        name: name.to_owned(),
        prep_time,
        difficulty,
        vegetarian,
    }
}

/// Server resources over a fresh in-memory store
pub fn memory_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::new(Store::memory(), ServerConfig::default()))
}
