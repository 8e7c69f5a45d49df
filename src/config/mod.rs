// ABOUTME: Configuration management module for the recipe server
// ABOUTME: Server, store, and Redis connection settings loaded from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the recipe server
//!
//! - **Environment**: HTTP port, request timeout, and recipe settings
//! - **Store**: backend selection, key prefix, and Redis connection tuning

/// Environment and server configuration
pub mod environment;
/// Document store and Redis connection configuration
pub mod store;

pub use environment::{RecipeConfig, ServerConfig};
pub use store::{RedisConnectionConfig, StoreConfig};

use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;

/// Read an optional environment variable and parse it
///
/// Unset or empty values yield `None`; values that do not parse are a
/// `ConfigInvalid` error rather than a silent default.
pub(crate) fn parse_env<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e| {
            AppError::config_invalid(format!("Invalid value '{raw}' for {key}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Read a parsed environment variable, using `default` when it is unset
pub(crate) fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_env(key)?.unwrap_or(default))
}
