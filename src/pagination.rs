// ABOUTME: Re-exports pagination types from recipe-core
// ABOUTME: PageRequest clamping is shared by handlers and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::pagination::*;
