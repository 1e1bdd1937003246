// ABOUTME: Local fallback store persisting the whole recipe collection under one key
// ABOUTME: Provides file-backed and in-memory key/value storage plus first-run seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Local Fallback Store
//!
//! The collection is stored as one JSON array under the `myRecipes` key and
//! rewritten in full after every mutation. Raw storage I/O sits behind
//! [`KeyValueStorage`] so the same store runs against the filesystem or
//! against memory in tests.

use chrono::{DateTime, Utc};
use recipe_box_core::constants::storage;
use recipe_box_core::errors::StoreError;
use recipe_box_core::models::Recipe;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Durable client-local key/value storage
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LocalStorage` on I/O failure
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LocalStorage` on I/O failure
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the snapshot files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{key}.{}", storage::SNAPSHOT_EXTENSION))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::local_storage(key, e.to_string())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::local_storage(key, e.to_string()))?;

        // Write-then-rename so a crash never leaves a half-written snapshot
        let target = self.path_for(key);
        let staging = target.with_extension("tmp");
        fs::write(&staging, value).map_err(|e| StoreError::local_storage(key, e.to_string()))?;
        fs::rename(&staging, &target).map_err(|e| StoreError::local_storage(key, e.to_string()))
    }
}

/// Process-local storage, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Recipe collection persisted to client-local storage
#[derive(Clone)]
pub struct LocalRecipeStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl LocalRecipeStore {
    /// Store over the given storage using the standard `myRecipes` key
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: storage::RECIPES_KEY.to_owned(),
        }
    }

    /// File-backed store under `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(data_dir)))
    }

    /// Memory-backed store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Storage key holding the collection
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted collection, seeding it on first run
    ///
    /// Read failures and unreadable snapshots are logged and treated as
    /// "nothing stored"; an unreadable snapshot is copied aside first.
    #[must_use]
    pub fn load(&self) -> Vec<Recipe> {
        match self.read_snapshot() {
            Ok(Some(recipes)) => {
                debug!(count = recipes.len(), key = %self.key, "Loaded recipes from local storage");
                return recipes;
            }
            Ok(None) => info!(key = %self.key, "No local recipes yet, seeding example recipe"),
            Err(e) => warn!(error = %e, "Local recipe snapshot unreadable, seeding example recipe"),
        }

        let seeded = vec![Recipe::seed(Utc::now())];
        if let Err(e) = self.save_all(&seeded) {
            warn!(error = %e, "Failed to persist seed recipe");
        }
        seeded
    }

    /// Replace the persisted snapshot with `recipes`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LocalStorage` if serialization or the write fails
    pub fn save_all(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(recipes)
            .map_err(|e| StoreError::local_storage(&self.key, e.to_string()))?;
        self.storage.set_item(&self.key, &snapshot)?;
        debug!(count = recipes.len(), key = %self.key, "Saved recipes to local storage");
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Option<Vec<Recipe>>, StoreError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            let backup_key = format!("{}.corrupt", self.key);
            if let Err(backup_error) = self.storage.set_item(&backup_key, &raw) {
                warn!(error = %backup_error, "Failed to keep a copy of the unreadable snapshot");
            }
            StoreError::local_storage(&self.key, e.to_string())
        })
    }
}

/// Synthesize an identifier for a recipe created while offline
///
/// Uses `recipe_<unix millis>`, moving forward one millisecond at a time
/// until the id is not already taken.
#[must_use]
pub fn next_local_id(existing: &[Recipe], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = format!("{}{millis}", storage::LOCAL_ID_PREFIX);
        if !existing.iter().any(|recipe| recipe.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
