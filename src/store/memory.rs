// ABOUTME: In-process document store with insertion-ordered scans and lease deadlines
// ABOUTME: Backs tests and single-node development; same semantics as the Redis store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DocumentQuery, DocumentRow, DocumentStore, Lease, LockToken, LockedDocument};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Lease held on a stored document
#[derive(Debug, Clone, Copy)]
struct HeldLease {
    token: LockToken,
    expires_at: Instant,
}

impl HeldLease {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Clone)]
struct Slot {
    document: Value,
    sequence: u64,
    lease: Option<HeldLease>,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: HashMap<String, Slot>,
    /// Insertion sequence -> key, gives scans their native order
    order: BTreeMap<u64, String>,
    counters: HashMap<String, u64>,
    next_sequence: u64,
}

/// In-memory document store
///
/// Uses `Arc<RwLock<..>>` so clones share one collection. Leases are plain
/// deadlines checked on access; an expired lease is simply ignored, so no
/// background sweeper is needed.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored
    pub async fn len(&self) -> usize {
        self.state.read().await.documents.len()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get_document(&self, key: &str) -> AppResult<Option<Value>> {
        let state = self.state.read().await;
        Ok(state.documents.get(key).map(|slot| slot.document.clone()))
    }

    async fn insert_document(&self, key: &str, value: &Value) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.documents.contains_key(key) {
            return Err(AppError::conflict(format!(
                "Document with key '{key}' already exists"
            )));
        }

        state.next_sequence += 1;
        let sequence = state.next_sequence;
        state.order.insert(sequence, key.to_owned());
        state.documents.insert(
            key.to_owned(),
            Slot {
                document: value.clone(),
                sequence,
                lease: None,
            },
        );
        Ok(())
    }

    async fn get_and_lock(&self, key: &str, lease: Duration) -> AppResult<Option<LockedDocument>> {
        let mut state = self.state.write().await;
        let Some(slot) = state.documents.get_mut(key) else {
            return Ok(None);
        };

        if slot.lease.is_some_and(|held| held.is_live()) {
            return Err(AppError::lock_contention(format!(
                "Document '{key}' is leased by another writer"
            )));
        }

        let token = LockToken::generate();
        let granted = Lease::new(key, token, lease)?;
        slot.lease = Some(HeldLease {
            token,
            expires_at: granted.expires_at(),
        });

        Ok(Some(LockedDocument {
            document: slot.document.clone(),
            lease: granted,
        }))
    }

    async fn replace_with_lock_token(
        &self,
        key: &str,
        value: &Value,
        token: &LockToken,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let Some(slot) = state.documents.get_mut(key) else {
            return Err(AppError::not_found(format!("Document '{key}'")));
        };

        match slot.lease {
            Some(held) if held.token == *token && held.is_live() => {
                slot.document = value.clone();
                slot.lease = None;
                Ok(())
            }
            _ => Err(AppError::lock_contention(format!(
                "Lease on '{key}' expired or was superseded"
            ))),
        }
    }

    async fn remove_document(&self, key: &str) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let Some(slot) = state.documents.remove(key) else {
            return Ok(false);
        };
        state.order.remove(&slot.sequence);
        Ok(true)
    }

    async fn atomic_increment(&self, counter: &str, delta: u64, initial: u64) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let value = match state.counters.get_mut(counter) {
            Some(current) => {
                *current = current.checked_add(delta).ok_or_else(|| {
                    AppError::store_unavailable(format!("Counter '{counter}' overflowed"))
                })?;
                *current
            }
            None => {
                state.counters.insert(counter.to_owned(), initial);
                initial
            }
        };
        Ok(value)
    }

    async fn execute_query(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentRow>> {
        let state = self.state.read().await;
        let rows = state
            .order
            .values()
            .filter_map(|key| {
                state
                    .documents
                    .get(key)
                    .map(|slot| (key, &slot.document))
            })
            .filter(|(_, document)| query.matches(document))
            .skip(query.offset)
            .take(query.limit)
            .map(|(key, document)| DocumentRow {
                key: key.clone(),
                document: document.clone(),
            })
            .collect();
        Ok(rows)
    }

    async fn health_check(&self) -> AppResult<()> {
        // In-memory store is always healthy
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        *state = MemoryState::default();
        Ok(())
    }
}
