// ABOUTME: Document store abstraction consumed by the recipe core components
// ABOUTME: Pluggable backends (in-memory, Redis) behind one trait, selected by the Store factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Store factory for creating store backends
pub mod factory;
/// Lease and lock token types for read-modify-write cycles
pub mod lease;
/// In-memory store implementation
pub mod memory;
/// Redis store implementation
pub mod redis;

pub use factory::Store;
pub use lease::{Lease, LockToken, LockedDocument};

use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Primitive operations the recipe core needs from a document store
///
/// Documents are JSON values addressed by string keys. Implementations must be
/// cheap to clone and safe to share between concurrent callers; all writer
/// serialization happens through leases held in the store, never through
/// locks in the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use recipe_server::store::{memory::InMemoryStore, DocumentStore};
/// use serde_json::json;
/// use std::time::Duration;
/// # async fn example() -> Result<(), recipe_server::errors::AppError> {
///
/// let store = InMemoryStore::new();
/// store.insert_document("1", &json!({ "name": "soup" })).await?;
///
/// // Take a lease, modify, and commit; the commit releases the lease
/// if let Some(locked) = store.get_and_lock("1", Duration::from_secs(3)).await? {
///     let mut document = locked.document;
///     document["name"] = json!("tomato soup");
///     locked.lease.commit(&store, &document).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync + Clone {
    /// Fetch a document, `None` when the key is absent
    ///
    /// Reads are never blocked by an outstanding lease.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the store cannot be reached
    async fn get_document(&self, key: &str) -> AppResult<Option<Value>>;

    /// Insert a document at a key that must not exist yet
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the key is taken
    async fn insert_document(&self, key: &str, value: &Value) -> AppResult<()>;

    /// Read a document and take an exclusive lease on its key
    ///
    /// Returns `None` when the key is absent. The lease expires on its own
    /// after `lease` if it is never committed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` if another unexpired lease is held on the key
    async fn get_and_lock(&self, key: &str, lease: Duration) -> AppResult<Option<LockedDocument>>;

    /// Overwrite a leased document and release its lease in one step
    ///
    /// Prefer [`Lease::commit`], which consumes the lease so it cannot be
    /// presented twice.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` if the token is stale or its lease expired,
    /// `ResourceNotFound` if the document was removed meanwhile
    async fn replace_with_lock_token(
        &self,
        key: &str,
        value: &Value,
        token: &LockToken,
    ) -> AppResult<()>;

    /// Remove a document regardless of any lease; `false` when it was absent
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the store cannot be reached
    async fn remove_document(&self, key: &str) -> AppResult<bool>;

    /// Add `delta` to a counter and return the new value
    ///
    /// A missing counter is created holding `initial` (which is returned)
    /// and never expires.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the increment cannot complete
    async fn atomic_increment(&self, counter: &str, delta: u64, initial: u64) -> AppResult<u64>;

    /// Run a filtered, paginated scan over the collection in native order
    ///
    /// Any server-side resources used by the scan are released before this
    /// returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if query execution fails
    async fn execute_query(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentRow>>;

    /// Verify the store backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Remove every document, lease, and counter (tests and admin resets)
    ///
    /// # Errors
    ///
    /// Returns an error if the clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Filter applied to a document field during a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryFilter {
    /// Keep documents whose numeric `field` is strictly below `value`
    ///
    /// The comparison is made at single precision, the precision fields are
    /// written with, so a widened stored value never slips under its own bound.
    LessThan {
        /// Top-level document field
        field: String,
        /// Exclusive upper bound
        value: f32,
    },
}

impl QueryFilter {
    /// Check a document against the filter
    ///
    /// A document that lacks the field, or holds a non-number there, does not
    /// match.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Self::LessThan { field, value } => document
                .get(field)
                .and_then(Value::as_f64)
                .is_some_and(|v| (v as f32) < *value),
        }
    }
}

/// Parameterized collection scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Optional row filter, applied before offset and limit
    pub filter: Option<QueryFilter>,
    /// Matching rows to skip
    pub offset: usize,
    /// Maximum rows to return
    pub limit: usize,
}

impl DocumentQuery {
    /// Unfiltered page of the collection
    #[must_use]
    pub const fn page(offset: usize, limit: usize) -> Self {
        Self {
            filter: None,
            offset,
            limit,
        }
    }

    /// Restrict the query with a filter
    #[must_use]
    pub fn with_filter(mut self, filter: QueryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Check a document against the filter, if any
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.filter.as_ref().is_none_or(|f| f.matches(document))
    }
}

/// One row produced by a query: the document and the key it lives at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    /// Store key of the document
    pub key: String,
    /// Raw document body
    pub document: Value,
}
