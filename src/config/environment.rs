// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: HTTP port, transport timeout, recipe lease and id counter settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::store::StoreConfig;
use super::{parse_env, parse_env_or};
use crate::constants::{recipes, service};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Recipe component settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// How long a read-modify-write lease is honored, in seconds
    pub lease_secs: u64,
    /// Name of the counter recipe ids are drawn from
    pub id_counter: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            lease_secs: recipes::DEFAULT_LEASE_SECS,
            id_counter: recipes::ID_COUNTER_KEY.to_owned(),
        }
    }
}

impl RecipeConfig {
    /// Load recipe settings from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the lease duration is outside
    /// `1..=MAX_LEASE_SECS`
    pub fn from_env() -> AppResult<Self> {
        let lease_secs = parse_env_or("RECIPE_LEASE_SECS", recipes::DEFAULT_LEASE_SECS)?;
        if !(1..=recipes::MAX_LEASE_SECS).contains(&lease_secs) {
            return Err(AppError::config_invalid(format!(
                "RECIPE_LEASE_SECS must be between 1 and {}, got {lease_secs}",
                recipes::MAX_LEASE_SECS
            )));
        }

        Ok(Self {
            lease_secs,
            id_counter: env::var("RECIPE_ID_COUNTER")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| recipes::ID_COUNTER_KEY.to_owned()),
        })
    }

    /// Lease duration as a `Duration`
    #[must_use]
    pub const fn lease(&self) -> Duration {
        Duration::from_secs(self.lease_secs)
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Upper bound on a single request, in seconds
    pub request_timeout_secs: u64,
    /// Document store settings
    pub store: StoreConfig,
    /// Recipe component settings
    pub recipes: RecipeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: service::DEFAULT_HTTP_PORT,
            request_timeout_secs: service::DEFAULT_REQUEST_TIMEOUT_SECS,
            store: StoreConfig::default(),
            recipes: RecipeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if any variable holds a value that does not parse
    pub fn from_env() -> AppResult<Self> {
        let http_port = match parse_env::<u16>("HTTP_PORT")? {
            Some(port) => port,
            None => parse_env_or("PORT", service::DEFAULT_HTTP_PORT)?,
        };

        Ok(Self {
            http_port,
            request_timeout_secs: parse_env_or(
                "REQUEST_TIMEOUT_SECS",
                service::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            store: StoreConfig::from_env()?,
            recipes: RecipeConfig::from_env()?,
        })
    }

    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Server Configuration:\n\
             - HTTP Port: {}\n\
             - Request Timeout: {}s\n\
             - Store: {}\n\
             - Key Prefix: {}\n\
             - Lease: {}s\n\
             - Id Counter: {}",
            self.http_port,
            self.request_timeout_secs,
            self.store.backend_name(),
            self.store.key_prefix,
            self.recipes.lease_secs,
            self.recipes.id_counter,
        )
    }
}
