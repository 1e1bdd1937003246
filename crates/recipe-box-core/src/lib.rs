// ABOUTME: Core types and constants for the Recipe Box recipe manager
// ABOUTME: Foundation crate with error handling, recipe models, validation, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Box Core
//!
//! Foundation crate providing the shared types used by every store and by the
//! session facade. It changes rarely, so the store adapters and the binary can
//! rebuild without touching it.
//!
//! ## Modules
//!
//! - **errors**: Unified `AppError`/`ErrorCode` plus the store-level `StoreError`
//! - **models**: `Recipe`, `Ingredient`, `RecipeDraft` and validated input
//! - **constants**: Storage keys, remote resource names, user-facing notices, seed data

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Recipe data models and input validation
pub mod models;
