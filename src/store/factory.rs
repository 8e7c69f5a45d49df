// ABOUTME: Store factory selecting the document store backend from configuration
// ABOUTME: Redis when a URL is configured, otherwise the in-process store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::memory::InMemoryStore;
use super::redis::RedisStore;
use super::{DocumentQuery, DocumentRow, DocumentStore, LockToken, LockedDocument};
use crate::config::store::StoreConfig;
use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Unified store interface
///
/// Dispatches every primitive to the configured backend.
#[derive(Clone)]
pub enum Store {
    /// In-process store
    Memory(InMemoryStore),
    /// Redis-backed store shared between instances
    Redis(RedisStore),
}

impl Store {
    /// Create a store based on configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Redis backend is selected and cannot be reached
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        match &config.redis_url {
            Some(url) => {
                info!("Initializing Redis document store (prefix: {})", config.key_prefix);
                let store =
                    RedisStore::connect(url, &config.key_prefix, &config.redis_connection).await?;
                Ok(Self::Redis(store))
            }
            None => {
                info!("Initializing in-memory document store");
                Ok(Self::memory())
            }
        }
    }

    /// Fresh in-process store
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(InMemoryStore::new())
    }

    /// Human-readable backend name for logs and readiness reports
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

#[async_trait]
impl DocumentStore for Store {
    async fn get_document(&self, key: &str) -> AppResult<Option<Value>> {
        match self {
            Self::Memory(store) => store.get_document(key).await,
            Self::Redis(store) => store.get_document(key).await,
        }
    }

    async fn insert_document(&self, key: &str, value: &Value) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.insert_document(key, value).await,
            Self::Redis(store) => store.insert_document(key, value).await,
        }
    }

    async fn get_and_lock(&self, key: &str, lease: Duration) -> AppResult<Option<LockedDocument>> {
        match self {
            Self::Memory(store) => store.get_and_lock(key, lease).await,
            Self::Redis(store) => store.get_and_lock(key, lease).await,
        }
    }

    async fn replace_with_lock_token(
        &self,
        key: &str,
        value: &Value,
        token: &LockToken,
    ) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.replace_with_lock_token(key, value, token).await,
            Self::Redis(store) => store.replace_with_lock_token(key, value, token).await,
        }
    }

    async fn remove_document(&self, key: &str) -> AppResult<bool> {
        match self {
            Self::Memory(store) => store.remove_document(key).await,
            Self::Redis(store) => store.remove_document(key).await,
        }
    }

    async fn atomic_increment(&self, counter: &str, delta: u64, initial: u64) -> AppResult<u64> {
        match self {
            Self::Memory(store) => store.atomic_increment(counter, delta, initial).await,
            Self::Redis(store) => store.atomic_increment(counter, delta, initial).await,
        }
    }

    async fn execute_query(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentRow>> {
        match self {
            Self::Memory(store) => store.execute_query(query).await,
            Self::Redis(store) => store.execute_query(query).await,
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.health_check().await,
            Self::Redis(store) => store.health_check().await,
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.clear_all().await,
            Self::Redis(store) => store.clear_all().await,
        }
    }
}
