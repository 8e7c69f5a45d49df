// ABOUTME: Recipe CRUD over the document store with leased read-modify-write updates
// ABOUTME: The id lives in the store key only; updates keep the rating history intact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::IdGenerator;
use super::{decode_document, recipe_not_found};
use crate::errors::AppResult;
use crate::models::{NewRecipe, Recipe, RecipeDocument, RecipeFields, RecipeId};
use crate::store::{DocumentStore, LockedDocument};
use std::time::Duration;

/// Create, read, update, and delete recipes
#[derive(Clone)]
pub struct RecipeStore<S> {
    store: S,
    ids: IdGenerator<S>,
    lease: Duration,
}

impl<S: DocumentStore> RecipeStore<S> {
    /// Recipe store drawing ids from `ids` and leasing documents for `lease`
    pub fn new(store: S, ids: IdGenerator<S>, lease: Duration) -> Self {
        Self { store, ids, lease }
    }

    /// Fetch one recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no recipe has this id
    pub async fn get(&self, id: RecipeId) -> AppResult<Recipe> {
        let key = id.storage_key();
        let document = self
            .store
            .get_document(&key)
            .await?
            .ok_or_else(recipe_not_found)?;
        Ok(decode_document(&key, document)?.into_recipe(id))
    }

    /// Assign the next id and store a new recipe under it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-finite preparation time,
    /// `ResourceAlreadyExists` if the store already holds the new key
    pub async fn create(&self, recipe: NewRecipe) -> AppResult<Recipe> {
        let document = RecipeDocument::from(recipe);
        document.fields().validate()?;

        let id = self.ids.next_id().await?;
        let value = serde_json::to_value(&document)?;
        self.store.insert_document(&id.storage_key(), &value).await?;

        Ok(document.into_recipe(id))
    }

    /// Overwrite the business fields of a recipe under a lease
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is absent, `ResourceLocked`
    /// if another writer holds its lease or ours expired before commit.
    /// A `SerializationError` after the lease is taken leaves the document
    /// untouched but locked until the lease expires.
    pub async fn update(&self, id: RecipeId, fields: RecipeFields) -> AppResult<Recipe> {
        fields.validate()?;

        let key = id.storage_key();
        let LockedDocument { document, lease } = self
            .store
            .get_and_lock(&key, self.lease)
            .await?
            .ok_or_else(recipe_not_found)?;

        let mut document = decode_document(&key, document)?;
        document.apply_fields(fields);
        lease
            .commit(&self.store, &serde_json::to_value(&document)?)
            .await?;

        Ok(document.into_recipe(id))
    }

    /// Remove a recipe; its id is never handed out again
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe is absent
    pub async fn delete(&self, id: RecipeId) -> AppResult<()> {
        if self.store.remove_document(&id.storage_key()).await? {
            Ok(())
        } else {
            Err(recipe_not_found())
        }
    }
}
