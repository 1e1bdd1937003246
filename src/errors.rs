// ABOUTME: Error handling re-exports for the Recipe Box library
// ABOUTME: Exposes the core crate's AppError, ErrorCode, and StoreError at the crate root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_box_core::errors::{
    AppError, AppResult, ErrorCode, RemoteOperation, StoreError, ValidationError,
};
