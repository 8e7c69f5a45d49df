// ABOUTME: Paginated listing and preparation-time search over the recipe collection
// ABOUTME: Rows are decoded into typed recipes; averages are computed per read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::decode_document;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeId, RecipeRated};
use crate::store::{DocumentQuery, DocumentRow, DocumentStore, QueryFilter};

/// Stored field the preparation-time search filters on
const PREP_TIME_FIELD: &str = "preptime";

/// Read-only scans over the recipe collection
///
/// Results come back in the store's native order, which is insertion order
/// for both shipped backends. Scans are not synchronized with writers.
#[derive(Clone)]
pub struct QueryEngine<S> {
    store: S,
}

impl<S: DocumentStore> QueryEngine<S> {
    /// Query engine over `store`
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Up to `count` recipes starting at offset `start`
    ///
    /// The bounds are used as given; clamping belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the scan fails, `SerializationError`
    /// if a stored row is malformed
    pub async fn list(&self, start: usize, count: usize) -> AppResult<Vec<Recipe>> {
        let rows = self
            .store
            .execute_query(&DocumentQuery::page(start, count))
            .await?;

        rows.into_iter()
            .map(|row| {
                let (id, key, document) = split_row(row)?;
                Ok(decode_document(&key, document)?.into_recipe(id))
            })
            .collect()
    }

    /// Recipes with a preparation time strictly below `max_prep_time`, with
    /// their average rating
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the threshold is NaN, otherwise the same
    /// errors as [`Self::list`]
    pub async fn search_by_prep_time(
        &self,
        start: usize,
        count: usize,
        max_prep_time: f32,
    ) -> AppResult<Vec<RecipeRated>> {
        if max_prep_time.is_nan() {
            return Err(AppError::invalid_input(
                "Preparation time threshold must be a number",
            ));
        }

        let query = DocumentQuery::page(start, count).with_filter(QueryFilter::LessThan {
            field: PREP_TIME_FIELD.to_owned(),
            value: max_prep_time,
        });
        let rows = self.store.execute_query(&query).await?;

        rows.into_iter()
            .map(|row| {
                let (id, key, document) = split_row(row)?;
                Ok(RecipeRated::project(id, &decode_document(&key, document)?))
            })
            .collect()
    }
}

/// Recover the recipe id from a row's store key
fn split_row(row: DocumentRow) -> AppResult<(RecipeId, String, serde_json::Value)> {
    let id = row.key.parse::<RecipeId>().map_err(|_| {
        AppError::serialization(format!("Store key '{}' is not a recipe id", row.key))
    })?;
    Ok((id, row.key, row.document))
}
