// ABOUTME: Document store configuration: backend selection, key namespace, Redis tuning
// ABOUTME: REDIS_URL selects the Redis backend; without it the in-process store is used
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_env, parse_env_or};
use crate::constants::{redis, store};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::env;

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Redis URL; `None` selects the in-memory store
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Namespace prepended to every key the store writes
    pub key_prefix: String,
    /// Redis connection configuration
    #[serde(default)]
    pub redis_connection: RedisConnectionConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            key_prefix: store::DEFAULT_KEY_PREFIX.to_owned(),
            redis_connection: RedisConnectionConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load store configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a Redis tuning variable does not parse
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            key_prefix: env::var("STORE_KEY_PREFIX")
                .unwrap_or_else(|_| store::DEFAULT_KEY_PREFIX.to_owned()),
            redis_connection: RedisConnectionConfig::from_env()?,
        })
    }

    /// Backend this configuration selects
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        if self.redis_url.is_some() {
            "redis"
        } else {
            "memory"
        }
    }
}

/// Redis connection and retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
    /// Response/command timeout in seconds
    pub response_timeout_secs: u64,
    /// Number of reconnection retries after connection drop
    pub reconnection_retries: usize,
    /// Exponential backoff base for retry delays
    pub retry_exponent_base: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Number of retries for initial connection at startup
    pub initial_connection_retries: u32,
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub initial_retry_delay_ms: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: redis::CONNECTION_TIMEOUT_SECS,
            response_timeout_secs: redis::RESPONSE_TIMEOUT_SECS,
            reconnection_retries: redis::RECONNECTION_RETRIES,
            retry_exponent_base: redis::RETRY_EXPONENT_BASE,
            max_retry_delay_ms: redis::MAX_RETRY_DELAY_MS,
            initial_connection_retries: redis::INITIAL_CONNECTION_RETRIES,
            initial_retry_delay_ms: redis::INITIAL_RETRY_DELAY_MS,
        }
    }
}

impl RedisConnectionConfig {
    /// Load Redis connection configuration from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if any variable is set to a non-numeric value
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            connection_timeout_secs: parse_env_or(
                "REDIS_CONNECTION_TIMEOUT_SECS",
                redis::CONNECTION_TIMEOUT_SECS,
            )?,
            response_timeout_secs: parse_env_or(
                "REDIS_RESPONSE_TIMEOUT_SECS",
                redis::RESPONSE_TIMEOUT_SECS,
            )?,
            reconnection_retries: parse_env_or(
                "REDIS_RECONNECTION_RETRIES",
                redis::RECONNECTION_RETRIES,
            )?,
            retry_exponent_base: parse_env::<u64>("REDIS_RETRY_EXPONENT_BASE")?
                .unwrap_or(redis::RETRY_EXPONENT_BASE),
            max_retry_delay_ms: parse_env_or(
                "REDIS_MAX_RETRY_DELAY_MS",
                redis::MAX_RETRY_DELAY_MS,
            )?,
            initial_connection_retries: parse_env_or(
                "REDIS_INITIAL_CONNECTION_RETRIES",
                redis::INITIAL_CONNECTION_RETRIES,
            )?,
            initial_retry_delay_ms: parse_env_or(
                "REDIS_INITIAL_RETRY_DELAY_MS",
                redis::INITIAL_RETRY_DELAY_MS,
            )?,
        })
    }
}
