// ABOUTME: Recipe domain components and the service facade the HTTP layer calls
// ABOUTME: Id generation, CRUD, rating appends, and queries share one injected store handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipes
//!
//! Four components, each generic over a [`DocumentStore`] handle injected at
//! construction:
//!
//! - [`IdGenerator`]: unique, increasing ids from a store counter
//! - [`RecipeStore`]: get/create/update/delete, updates under a lease
//! - [`RatingLedger`]: append-only ratings, appended under a lease
//! - [`QueryEngine`]: paginated list and preparation-time search
//!
//! [`RecipeService`] bundles them and logs every operation. None of the
//! components retry; a `ResourceLocked` error goes straight back to the caller.

/// Recipe identifier generator
pub mod ids;
/// Paginated list and search
pub mod queries;
/// Append-only rating ledger
pub mod ratings;
/// Recipe CRUD
pub mod store;

pub use ids::IdGenerator;
pub use queries::QueryEngine;
pub use ratings::RatingLedger;
pub use store::RecipeStore;

use crate::config::RecipeConfig;
use crate::constants::recipes::RESOURCE_NAME;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    NewRecipe, Recipe, RecipeDocument, RecipeFields, RecipeId, RecipeRated, RecipeRating,
};
use crate::store::DocumentStore;
use serde_json::Value;
use std::future::Future;
use std::time::Instant;

/// Error returned for every missing recipe
pub(crate) fn recipe_not_found() -> AppError {
    AppError::not_found(RESOURCE_NAME)
}

/// Decode a stored body, rejecting documents with missing or mistyped fields
pub(crate) fn decode_document(key: &str, document: Value) -> AppResult<RecipeDocument> {
    serde_json::from_value(document).map_err(|e| {
        AppError::serialization(format!("Stored recipe '{key}' is malformed: {e}")).with_source(e)
    })
}

/// Run one operation and emit a structured store-operation event for it
async fn logged<T, F>(operation: &str, key: &str, work: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let started = Instant::now();
    let result = work.await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if let Err(e) = &result {
        if e.is_lock_contention() {
            AppLogger::log_lease_contention(operation, key);
        }
    }
    AppLogger::log_store_operation(operation, key, result.is_ok(), duration_ms);
    result
}

/// All recipe operations over one shared store handle
#[derive(Clone)]
pub struct RecipeService<S> {
    ids: IdGenerator<S>,
    recipes: RecipeStore<S>,
    ratings: RatingLedger<S>,
    queries: QueryEngine<S>,
}

impl<S: DocumentStore> RecipeService<S> {
    /// Wire every component to `store`
    pub fn new(store: S, config: &RecipeConfig) -> Self {
        let lease = config.lease();
        let ids = IdGenerator::new(store.clone(), config.id_counter.clone());
        Self {
            recipes: RecipeStore::new(store.clone(), ids.clone(), lease),
            ratings: RatingLedger::new(store.clone(), lease),
            queries: QueryEngine::new(store),
            ids,
        }
    }

    /// Draw the next recipe id without creating a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the counter cannot be incremented
    pub async fn next_id(&self) -> AppResult<RecipeId> {
        logged("next_id", self.ids.counter(), self.ids.next_id()).await
    }

    /// Fetch one recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is absent
    pub async fn get(&self, id: RecipeId) -> AppResult<Recipe> {
        logged("get", &id.storage_key(), self.recipes.get(id)).await
    }

    /// Create a recipe under a fresh id
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an invalid payload, or a store error
    pub async fn create(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        logged("create", RESOURCE_NAME, self.recipes.create(recipe)).await
    }

    /// Overwrite a recipe's fields, keeping its ratings
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `ResourceLocked`
    pub async fn update(&self, id: RecipeId, fields: RecipeFields) -> AppResult<Recipe> {
        logged("update", &id.storage_key(), self.recipes.update(id, fields)).await
    }

    /// Delete a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is absent
    pub async fn delete(&self, id: RecipeId) -> AppResult<()> {
        logged("delete", &id.storage_key(), self.recipes.delete(id)).await
    }

    /// Append one rating to a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `ResourceLocked`
    pub async fn add_rating(&self, recipe_id: RecipeId, rating: i32) -> AppResult<RecipeRating> {
        logged(
            "add_rating",
            &recipe_id.storage_key(),
            self.ratings.add_rating(recipe_id, rating),
        )
        .await
    }

    /// List recipes in native order
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or a row is malformed
    pub async fn list(&self, start: usize, count: usize) -> AppResult<Vec<Recipe>> {
        logged("list", RESOURCE_NAME, self.queries.list(start, count)).await
    }

    /// Search recipes by preparation time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a NaN threshold, or a scan error
    pub async fn search_by_prep_time(
        &self,
        start: usize,
        count: usize,
        max_prep_time: f32,
    ) -> AppResult<Vec<RecipeRated>> {
        logged(
            "search_by_prep_time",
            RESOURCE_NAME,
            self.queries.search_by_prep_time(start, count, max_prep_time),
        )
        .await
    }
}
