// ABOUTME: Lease and lock token types that scope a read-modify-write cycle on one document
// ABOUTME: Committing consumes the lease, so a token can only ever be presented once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DocumentStore;
use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Opaque proof of the right to commit one mutation under a lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockToken(Uuid);

impl LockToken {
    /// Fresh random token
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Rebuild a token from its string form, `None` if it is not one
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exclusive, time-bounded claim on one document key
///
/// Obtained from [`DocumentStore::get_and_lock`]. The only way to write under
/// the lease is [`Lease::commit`], which hands the token to the store and
/// consumes the lease. Dropping a lease without committing leaves the key
/// locked until the deadline passes.
#[derive(Debug)]
#[must_use = "an uncommitted lease keeps the document locked until it expires"]
pub struct Lease {
    key: String,
    token: LockToken,
    expires_at: Instant,
}

impl Lease {
    /// Lease on `key` that the store will honor for `duration`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the deadline does not fit in an `Instant`
    pub fn new(key: impl Into<String>, token: LockToken, duration: Duration) -> AppResult<Self> {
        let expires_at = Instant::now().checked_add(duration).ok_or_else(|| {
            AppError::invalid_input(format!("Lease duration {duration:?} is out of range"))
        })?;

        Ok(Self {
            key: key.into(),
            token,
            expires_at,
        })
    }

    /// Leased key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Token presented on commit
    #[must_use]
    pub const fn token(&self) -> &LockToken {
        &self.token
    }

    /// Local estimate of when the store drops the lease
    #[must_use]
    pub const fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the local deadline has passed
    ///
    /// The store stays authoritative: a commit after this point is rejected
    /// there, not here.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Write `value` to the leased key and release the lease
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` if the lease expired or was superseded,
    /// `ResourceNotFound` if the document was removed while leased
    pub async fn commit<S: DocumentStore>(self, store: &S, value: &Value) -> AppResult<()> {
        store
            .replace_with_lock_token(&self.key, value, &self.token)
            .await
    }
}

/// Document read under a freshly acquired lease
#[derive(Debug)]
pub struct LockedDocument {
    /// Document body as it was when the lease was taken
    pub document: Value,
    /// Lease to commit the modified document with
    pub lease: Lease,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trips_through_string() {
        let token = LockToken::generate();
        assert_eq!(LockToken::parse(&token.to_string()), Some(token));
        assert_eq!(LockToken::parse("not-a-token"), None);
    }

    #[test]
    fn test_lease_expiry() {
        let lease = Lease::new("1", LockToken::generate(), Duration::ZERO).unwrap();
        assert!(lease.is_expired());

        let lease = Lease::new("1", LockToken::generate(), Duration::from_secs(3)).unwrap();
        assert!(!lease.is_expired());
        assert_eq!(lease.key(), "1");
    }

    #[test]
    fn test_unrepresentable_deadline_is_rejected() {
        let err = Lease::new("1", LockToken::generate(), Duration::MAX).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
    }
}
