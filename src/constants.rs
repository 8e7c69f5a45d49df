// ABOUTME: Re-exports recipe, store, and Redis constants from recipe-core
// ABOUTME: Keeps a single source for defaults used by config and stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::constants::*;
