// ABOUTME: Redis document store with server-side Lua scripts for every compound primitive
// ABOUTME: Leases are keys with a PX expiry; native order is an insertion-scored sorted set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DocumentQuery, DocumentRow, DocumentStore, Lease, LockToken, LockedDocument};
use crate::config::store::RedisConnectionConfig;
use crate::constants::store::QUERY_BATCH_SIZE;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, RedisError, Script};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// KEYS: doc, lock. ARGV: token, lease millis.
/// Replies {0, nil} when absent, {2, nil} when leased, {1, doc} when the lease was granted.
const GET_AND_LOCK_LUA: &str = r"
local doc = redis.call('GET', KEYS[1])
if not doc then
  return {0, false}
end
if redis.call('SET', KEYS[2], ARGV[1], 'NX', 'PX', ARGV[2]) then
  return {1, doc}
end
return {2, false}
";

/// KEYS: doc, lock. ARGV: token, document.
/// Returns 0 when absent, 2 when the token does not own the lease, 1 on commit.
const REPLACE_WITH_TOKEN_LUA: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return 0
end
if redis.call('GET', KEYS[2]) ~= ARGV[1] then
  return 2
end
redis.call('SET', KEYS[1], ARGV[2])
redis.call('DEL', KEYS[2])
return 1
";

/// KEYS: doc, index, sequence. ARGV: document, logical key.
/// Returns 1 when inserted, 0 when the key already exists.
const INSERT_LUA: &str = r"
if redis.call('SET', KEYS[1], ARGV[1], 'NX') then
  local seq = redis.call('INCR', KEYS[3])
  redis.call('ZADD', KEYS[2], seq, ARGV[2])
  return 1
end
return 0
";

/// KEYS: doc, lock, index. ARGV: logical key.
/// Returns the number of documents removed.
const REMOVE_LUA: &str = r"
local removed = redis.call('DEL', KEYS[1])
redis.call('DEL', KEYS[2])
redis.call('ZREM', KEYS[3], ARGV[1])
return removed
";

/// KEYS: counter. ARGV: delta, initial.
const INCREMENT_LUA: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
  redis.call('SET', KEYS[1], ARGV[2])
  return tonumber(ARGV[2])
end
return redis.call('INCRBY', KEYS[1], ARGV[1])
";

/// Compiled scripts, shared by every clone of the store
struct Scripts {
    get_and_lock: Script,
    replace_with_token: Script,
    insert: Script,
    remove: Script,
    increment: Script,
}

impl Scripts {
    fn load() -> Self {
        Self {
            get_and_lock: Script::new(GET_AND_LOCK_LUA),
            replace_with_token: Script::new(REPLACE_WITH_TOKEN_LUA),
            insert: Script::new(INSERT_LUA),
            remove: Script::new(REMOVE_LUA),
            increment: Script::new(INCREMENT_LUA),
        }
    }
}

/// Redis document store
///
/// Uses Redis `ConnectionManager` for automatic reconnection. Every key is
/// namespaced under the configured prefix:
///
/// - `{prefix}doc:{key}` holds the JSON document
/// - `{prefix}lock:{key}` holds the current lease token, expiring with the lease
/// - `{prefix}counter:{name}` holds counters
/// - `{prefix}index` orders documents by insertion sequence `{prefix}seq`
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    prefix: Arc<str>,
    scripts: Arc<Scripts>,
}

impl RedisStore {
    /// Connect to Redis
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created or every connection
    /// attempt fails
    pub async fn connect(
        redis_url: &str,
        key_prefix: &str,
        conn_config: &RedisConnectionConfig,
    ) -> AppResult<Self> {
        info!(
            "Connecting to Redis at {} (timeout={}s, response_timeout={}s, retries={})",
            redis_url,
            conn_config.connection_timeout_secs,
            conn_config.response_timeout_secs,
            conn_config.initial_connection_retries
        );

        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::config(format!("Failed to create Redis client: {e}")))?;

        let manager = Self::connect_with_retry(&client, conn_config).await?;

        info!("Successfully connected to Redis");

        Ok(Self {
            manager,
            prefix: Arc::from(key_prefix),
            scripts: Arc::new(Scripts::load()),
        })
    }

    /// Connect to Redis with exponential backoff retry on failure
    async fn connect_with_retry(
        client: &redis::Client,
        conn_config: &RedisConnectionConfig,
    ) -> AppResult<ConnectionManager> {
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(conn_config.connection_timeout_secs))
            .set_response_timeout(Duration::from_secs(conn_config.response_timeout_secs))
            .set_number_of_retries(conn_config.reconnection_retries)
            .set_exponent_base(conn_config.retry_exponent_base)
            .set_max_delay(conn_config.max_retry_delay_ms);

        let max_retries = conn_config.initial_connection_retries;
        let mut delay_ms = conn_config.initial_retry_delay_ms;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match ConnectionManager::new_with_config(client.clone(), manager_config.clone()).await {
                Ok(manager) => {
                    if attempt > 0 {
                        info!("Redis connection established after {} retries", attempt);
                    }
                    return Ok(manager);
                }
                Err(e) => {
                    if attempt < max_retries {
                        warn!(
                            "Redis connection attempt {}/{} failed, retrying in {}ms: {}",
                            attempt + 1,
                            max_retries + 1,
                            delay_ms,
                            e
                        );
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        delay_ms = (delay_ms * 2).min(conn_config.max_retry_delay_ms);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(AppError::store_unavailable(format!(
            "Failed to connect to Redis after {} attempts: {}",
            max_retries + 1,
            last_error.map_or_else(|| "unknown error".to_owned(), |e| e.to_string())
        )))
    }

    fn doc_key(&self, key: &str) -> String {
        format!("{}doc:{key}", self.prefix)
    }

    fn lock_key(&self, key: &str) -> String {
        format!("{}lock:{key}", self.prefix)
    }

    fn counter_key(&self, counter: &str) -> String {
        format!("{}counter:{counter}", self.prefix)
    }

    fn index_key(&self) -> String {
        format!("{}index", self.prefix)
    }

    fn sequence_key(&self) -> String {
        format!("{}seq", self.prefix)
    }

    fn encode(value: &Value) -> AppResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(key: &str, raw: &str) -> AppResult<Value> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::serialization(format!("Document '{key}' is not valid JSON: {e}"))
                .with_source(e)
        })
    }
}

/// Map a Redis failure onto the store-unavailable kind, logging it once
fn unavailable(operation: &'static str) -> impl FnOnce(RedisError) -> AppError {
    move |e| {
        error!("Redis {} failed: {}", operation, e);
        AppError::store_unavailable(format!("Store error during {operation}: {e}")).with_source(e)
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn get_document(&self, key: &str) -> AppResult<Option<Value>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn
            .get(self.doc_key(key))
            .await
            .map_err(unavailable("GET"))?;

        raw.map(|raw| Self::decode(key, &raw)).transpose()
    }

    async fn insert_document(&self, key: &str, value: &Value) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let inserted: i64 = self
            .scripts
            .insert
            .key(self.doc_key(key))
            .key(self.index_key())
            .key(self.sequence_key())
            .arg(Self::encode(value)?)
            .arg(key)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable("insert"))?;

        if inserted == 1 {
            Ok(())
        } else {
            Err(AppError::conflict(format!(
                "Document with key '{key}' already exists"
            )))
        }
    }

    async fn get_and_lock(&self, key: &str, lease: Duration) -> AppResult<Option<LockedDocument>> {
        let token = LockToken::generate();
        let granted = Lease::new(key, token, lease)?;
        let lease_ms = u64::try_from(lease.as_millis()).unwrap_or(u64::MAX).max(1);

        let mut conn = self.manager.clone();
        let (status, raw): (i64, Option<String>) = self
            .scripts
            .get_and_lock
            .key(self.doc_key(key))
            .key(self.lock_key(key))
            .arg(token.to_string())
            .arg(lease_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable("get-and-lock"))?;

        match (status, raw) {
            (0, _) => Ok(None),
            (1, Some(raw)) => Ok(Some(LockedDocument {
                document: Self::decode(key, &raw)?,
                lease: granted,
            })),
            (2, _) => Err(AppError::lock_contention(format!(
                "Document '{key}' is leased by another writer"
            ))),
            (other, _) => Err(AppError::internal(format!(
                "Unexpected get-and-lock reply {other} for '{key}'"
            ))),
        }
    }

    async fn replace_with_lock_token(
        &self,
        key: &str,
        value: &Value,
        token: &LockToken,
    ) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let status: i64 = self
            .scripts
            .replace_with_token
            .key(self.doc_key(key))
            .key(self.lock_key(key))
            .arg(token.to_string())
            .arg(Self::encode(value)?)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable("replace"))?;

        match status {
            1 => Ok(()),
            0 => Err(AppError::not_found(format!("Document '{key}'"))),
            _ => Err(AppError::lock_contention(format!(
                "Lease on '{key}' expired or was superseded"
            ))),
        }
    }

    async fn remove_document(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        let removed: i64 = self
            .scripts
            .remove
            .key(self.doc_key(key))
            .key(self.lock_key(key))
            .key(self.index_key())
            .arg(key)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable("remove"))?;

        Ok(removed > 0)
    }

    async fn atomic_increment(&self, counter: &str, delta: u64, initial: u64) -> AppResult<u64> {
        let mut conn = self.manager.clone();
        let value: u64 = self
            .scripts
            .increment
            .key(self.counter_key(counter))
            .arg(delta)
            .arg(initial)
            .invoke_async(&mut conn)
            .await
            .map_err(unavailable("increment"))?;

        Ok(value)
    }

    async fn execute_query(&self, query: &DocumentQuery) -> AppResult<Vec<DocumentRow>> {
        let mut conn = self.manager.clone();
        let mut rows = Vec::with_capacity(query.limit.min(QUERY_BATCH_SIZE));
        let mut skipped = 0;
        let batch = isize::try_from(QUERY_BATCH_SIZE).unwrap_or(isize::MAX);
        let mut cursor: isize = 0;

        // Walk the index in insertion order; documents removed between the
        // range read and the MGET come back as None and are skipped.
        while rows.len() < query.limit {
            let stop = cursor.saturating_add(batch - 1);
            let keys: Vec<String> = conn
                .zrange(self.index_key(), cursor, stop)
                .await
                .map_err(unavailable("ZRANGE"))?;
            if keys.is_empty() {
                break;
            }
            cursor = stop.saturating_add(1);

            let doc_keys: Vec<String> = keys.iter().map(|k| self.doc_key(k)).collect();
            let documents: Vec<Option<String>> = redis::cmd("MGET")
                .arg(&doc_keys)
                .query_async(&mut conn)
                .await
                .map_err(unavailable("MGET"))?;

            for (key, raw) in keys.into_iter().zip(documents) {
                let Some(raw) = raw else { continue };
                let document = Self::decode(&key, &raw)?;
                if !query.matches(&document) {
                    continue;
                }
                if skipped < query.offset {
                    skipped += 1;
                    continue;
                }
                rows.push(DocumentRow { key, document });
                if rows.len() == query.limit {
                    break;
                }
            }
        }

        Ok(rows)
    }

    async fn health_check(&self) -> AppResult<()> {
        let mut conn = self.manager.clone();

        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(unavailable("PING"))?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(AppError::store_unavailable(format!(
                "Unexpected PING response '{response}'"
            )))
        }
    }

    async fn clear_all(&self) -> AppResult<()> {
        // Clear only keys with our namespace prefix (safe for shared Redis instances)
        let pattern = format!("{}*", self.prefix);

        let mut conn = self.manager.clone();
        let mut cursor = 0u64;

        loop {
            let (new_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(QUERY_BATCH_SIZE)
                .query_async(&mut conn)
                .await
                .map_err(unavailable("SCAN"))?;

            if !keys.is_empty() {
                let _: u64 = conn.del(&keys).await.map_err(unavailable("DEL"))?;
            }

            cursor = new_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(())
    }
}
