// ABOUTME: Recipe store abstractions: remote adapter trait, backends, and local fallback
// ABOUTME: Selects the configured remote backend and exposes the shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Stores
//!
//! Two remote backends implement [`RemoteRecipeStore`]:
//!
//! - **Row store** ([`supabase::SupabaseStore`]): a `recipes` table behind PostgREST
//! - **Document store** ([`firestore::FirestoreStore`]): a `recipes` collection
//!   scoped to the signed-in user
//!
//! Both normalize their records into the shared [`Recipe`] shape and report
//! every failure as `StoreError::RemoteUnavailable`. The session never runs
//! two backends against one collection: exactly one is chosen from
//! configuration by [`remote_from_config`].
//!
//! [`local::LocalRecipeStore`] is the offline fallback.

/// Document store backend (Firestore REST API)
#[cfg(feature = "backend-firestore")]
pub mod firestore;
/// Shared HTTP client for remote calls
pub mod http_client;
/// Local fallback store and key/value storage
pub mod local;
/// Row store backend (Supabase PostgREST)
#[cfg(feature = "backend-supabase")]
pub mod supabase;

use async_trait::async_trait;
use recipe_box_core::errors::StoreError;
use recipe_box_core::models::{Recipe, ValidatedRecipe};
use tracing::warn;

use crate::config::{RecipeBoxConfig, RemoteBackendConfig};

pub use local::{FileStorage, KeyValueStorage, LocalRecipeStore, MemoryStorage};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Remote persistence capability shared by every backend
///
/// Implementations fail closed: any transport error, unexpected status, or
/// undecodable response is returned as `StoreError::RemoteUnavailable`.
#[async_trait]
pub trait RemoteRecipeStore: Send + Sync {
    /// Backend label for logs and errors
    fn backend_name(&self) -> &'static str;

    /// Whether `list` returns the most recently created recipe first
    fn lists_newest_first(&self) -> bool {
        false
    }

    /// Lightweight connectivity check (a count query)
    async fn probe(&self) -> StoreResult<()>;

    /// Fetch every recipe visible to the caller
    async fn list(&self) -> StoreResult<Vec<Recipe>>;

    /// Persist a new recipe and return the stored record
    async fn insert(&self, recipe: &ValidatedRecipe) -> StoreResult<Recipe>;

    /// Replace the editable fields of recipe `id` and return the stored record
    async fn update(&self, id: &str, recipe: &ValidatedRecipe) -> StoreResult<Recipe>;

    /// Remove recipe `id`
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Build the configured remote store, if any
///
/// Returns `None` when no remote backend is configured or the requested
/// backend was compiled out; the session then runs locally.
#[must_use]
pub fn remote_from_config(config: &RecipeBoxConfig) -> Option<Box<dyn RemoteRecipeStore>> {
    http_client::initialize_shared_client(config.http);
    let client = http_client::shared_client().clone();

    match config.remote.as_ref()? {
        #[cfg(feature = "backend-supabase")]
        RemoteBackendConfig::Supabase(supabase) => {
            match supabase::SupabaseStore::new(supabase, client) {
                Ok(store) => Some(Box::new(store)),
                Err(e) => {
                    warn!(error = %e, "Invalid Supabase configuration, remote store disabled");
                    None
                }
            }
        }
        #[cfg(feature = "backend-firestore")]
        RemoteBackendConfig::Firestore(firebase) => {
            Some(Box::new(firestore::FirestoreStore::new(firebase, client)))
        }
        #[allow(unreachable_patterns)]
        other => {
            warn!(backend = ?other, "Remote backend not compiled into this build, running locally");
            None
        }
    }
}
