// ABOUTME: Append-only rating ledger stored inside each recipe document
// ABOUTME: Each rating is appended under a lease so concurrent raters never lose an entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{decode_document, recipe_not_found};
use crate::errors::AppResult;
use crate::models::{RecipeId, RecipeRating};
use crate::store::{DocumentStore, LockedDocument};
use std::time::Duration;

/// Appends ratings to recipe histories
#[derive(Clone)]
pub struct RatingLedger<S> {
    store: S,
    lease: Duration,
}

impl<S: DocumentStore> RatingLedger<S> {
    /// Ledger leasing documents for `lease` per append
    pub const fn new(store: S, lease: Duration) -> Self {
        Self { store, lease }
    }

    /// Append `rating` to the recipe's history and echo the input back
    ///
    /// No range check and no deduplication: every accepted call adds exactly
    /// one entry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is absent, `ResourceLocked`
    /// if another writer holds its lease. If the stored body fails to
    /// decode, the key stays locked until the lease expires.
    pub async fn add_rating(&self, recipe_id: RecipeId, rating: i32) -> AppResult<RecipeRating> {
        let key = recipe_id.storage_key();
        let LockedDocument { document, lease } = self
            .store
            .get_and_lock(&key, self.lease)
            .await?
            .ok_or_else(recipe_not_found)?;

        let mut document = decode_document(&key, document)?;
        document.push_rating(rating);
        lease
            .commit(&self.store, &serde_json::to_value(&document)?)
            .await?;

        Ok(RecipeRating { recipe_id, rating })
    }
}
