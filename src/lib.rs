// ABOUTME: Main library entry point for the recipe document server
// ABOUTME: Recipe CRUD, append-only ratings, and paginated search over a leased document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Server
//!
//! An HTTP service storing recipes as JSON documents. Recipes get integer ids
//! from an atomic store counter, updates and rating appends run as leased
//! read-modify-write cycles, and listings and searches page through the
//! collection in insertion order.
//!
//! ## Architecture
//!
//! - **Store**: the `DocumentStore` trait with in-memory and Redis backends
//! - **Recipes**: id generator, recipe store, rating ledger, query engine
//! - **Routes**: `axum` handlers under `/v1` plus health probes
//! - **Config**: environment-driven server, store, and Redis settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_server::config::ServerConfig;
//! use recipe_server::models::NewRecipe;
//! use recipe_server::recipes::RecipeService;
//! use recipe_server::store::Store;
//! use recipe_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let store = Store::new(&config.store).await?;
//!     let recipes = RecipeService::new(store, &config.recipes);
//!
//!     let soup = recipes
//!         .create(NewRecipe {
//!             name: "Tomato soup".to_owned(),
//!             prep_time: 25.0,
//!             difficulty: 1,
//!             vegetarian: true,
//!             ratings: Vec::new(),
//!         })
//!         .await?;
//!     recipes.add_rating(soup.id, 5).await?;
//!     Ok(())
//! }
//! ```

/// Configuration loaded from the environment
pub mod config;

/// Application constants, re-exported from `recipe-core`
pub mod constants;

/// Unified error handling, re-exported from `recipe-core`
pub mod errors;

/// Structured logging setup and application log events
pub mod logging;

/// Recipe models and projections, re-exported from `recipe-core`
pub mod models;

/// Pagination types, re-exported from `recipe-core`
pub mod pagination;

/// Recipe components and the service facade
pub mod recipes;

/// Shared resources handed to HTTP handlers
pub mod resources;

/// HTTP routes and server assembly
pub mod routes;

/// Document store abstraction and backends
pub mod store;
