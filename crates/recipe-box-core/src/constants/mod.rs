// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for storage keys, remote resources, notices, and HTTP defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// First-run example recipe
pub mod seed;

/// Service identification
pub mod service_names {
    /// Service name used in structured logs
    pub const RECIPE_BOX: &str = "recipe-box";
}

/// Local fallback storage
pub mod storage {
    /// Key holding the JSON-serialized recipe collection
    pub const RECIPES_KEY: &str = "myRecipes";
    /// Prefix for identifiers synthesized while offline
    pub const LOCAL_ID_PREFIX: &str = "recipe_";
    /// Extension of per-key snapshot files
    pub const SNAPSHOT_EXTENSION: &str = "json";
    /// Directory name under the platform data directory
    pub const DATA_DIR_NAME: &str = "recipe-box";
    /// Directory used when no platform data directory exists
    pub const FALLBACK_DATA_DIR: &str = "./data";
}

/// Remote backend resource names
pub mod remote {
    /// Row store table holding recipes
    pub const RECIPES_TABLE: &str = "recipes";
    /// PostgREST path prefix
    pub const REST_PATH: &str = "rest/v1";
    /// Document store collection holding recipes
    pub const RECIPES_COLLECTION: &str = "recipes";
    /// Public Firestore REST endpoint
    pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
    /// Firestore database used when none is configured
    pub const FIRESTORE_DEFAULT_DATABASE: &str = "(default)";
    /// Length of client-generated document identifiers
    pub const DOCUMENT_ID_LENGTH: usize = 20;
}

/// HTTP client defaults
pub mod http {
    /// Request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// User-facing notices
pub mod notices {
    /// Title or method missing
    pub const REQUIRED_FIELDS: &str = "Please fill in all required fields.";
    /// No ingredients supplied
    pub const NEED_INGREDIENT: &str = "Please add at least one ingredient.";
    /// An ingredient row is half filled
    pub const INCOMPLETE_INGREDIENT: &str = "Every ingredient needs a name and a quantity.";
    /// Remote save failed
    pub const SAVE_FAILED_OFFLINE: &str =
        "Failed to save recipe to database. Switching to offline mode.";
    /// Remote delete failed
    pub const DELETE_FAILED_OFFLINE: &str =
        "Failed to delete recipe from database. Switching to offline mode.";
    /// Remote load failed
    pub const LOAD_FAILED_OFFLINE: &str =
        "Failed to load recipes from the database. Switching to offline mode.";
    /// Delete confirmation prompt
    pub const CONFIRM_DELETE: &str =
        "Are you sure you want to delete this recipe? This action cannot be undone.";
    /// Placeholder for an unresolved timestamp
    pub const UNKNOWN_DATE: &str = "Unknown";
}
