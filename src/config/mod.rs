// ABOUTME: Configuration management module for backend selection and runtime settings
// ABOUTME: Exposes environment-derived configuration for stores, HTTP, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Recipe Box
//!
//! - **Environment**: backend credentials, local data directory, HTTP timeouts

/// Environment and backend configuration
pub mod environment;

pub use environment::{
    BackendKind, FirebaseConfig, HttpClientConfig, LocalStoreConfig, RecipeBoxConfig,
    RemoteBackendConfig, SupabaseConfig,
};
