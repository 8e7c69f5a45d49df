// ABOUTME: Recipe identifier generator backed by an atomic store counter
// ABOUTME: Ids are strictly increasing and never reused, even after a recipe is deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::models::RecipeId;
use crate::store::DocumentStore;

/// Draws recipe ids from a named counter in the document store
#[derive(Clone)]
pub struct IdGenerator<S> {
    store: S,
    counter: String,
}

impl<S: DocumentStore> IdGenerator<S> {
    /// Generator over `counter`, created at 1 on first use
    pub fn new(store: S, counter: impl Into<String>) -> Self {
        Self {
            store,
            counter: counter.into(),
        }
    }

    /// Counter the ids come from
    #[must_use]
    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Next unused recipe id
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the counter cannot be incremented; no
    /// id is handed out in that case
    pub async fn next_id(&self) -> AppResult<RecipeId> {
        let value = self.store.atomic_increment(&self.counter, 1, 1).await?;
        Ok(RecipeId::new(value))
    }
}
