// ABOUTME: Core types and constants for the recipe document server
// ABOUTME: Foundation crate with error handling, pagination, recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! server. Nothing in here talks to a store or a socket, so the server crate
//! and its tests can depend on it without pulling in the runtime stack.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Store keys, lease duration, and pagination bounds
//! - **pagination**: Offset/limit page requests with handler-side clamping
//! - **models**: Recipe documents, ratings, and read-side projections

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Offset/limit pagination for recipe listings
pub mod pagination;

/// Recipe data models and projections
pub mod models;
