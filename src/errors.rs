// ABOUTME: Re-exports error types (AppError, ErrorCode, AppResult) from recipe-core
// ABOUTME: AppError is the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_core::errors::*;
