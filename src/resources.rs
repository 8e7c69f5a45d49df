// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: One store handle and the recipe service built on it, created once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::recipes::RecipeService;
use crate::store::Store;
use std::sync::Arc;

/// Process-wide resources shared by the HTTP handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Document store handle, also used for readiness probes
    pub store: Store,
    /// Recipe operations over `store`
    pub recipes: RecipeService<Store>,
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources around an already-connected store
    #[must_use]
    pub fn new(store: Store, config: ServerConfig) -> Self {
        let recipes = RecipeService::new(store.clone(), &config.recipes);
        Self {
            store,
            recipes,
            config: Arc::new(config),
        }
    }

    /// Connect the configured store and wire resources around it
    ///
    /// # Errors
    ///
    /// Returns an error if the store backend cannot be reached
    pub async fn connect(config: ServerConfig) -> AppResult<Self> {
        let store = Store::new(&config.store).await?;
        Ok(Self::new(store, config))
    }
}
