// ABOUTME: Store-level error types for recipe persistence and the offline degrade policy
// ABOUTME: Separates validation, remote failure, declined confirmation, and local storage errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use thiserror::Error;

use crate::constants::notices;

/// Remote store call that failed, used for logging and user notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    /// Connectivity probe at session start
    Probe,
    /// Fetch of the full collection
    List,
    /// Creation of a new record
    Insert,
    /// Modification of an existing record
    Update,
    /// Removal of a record
    Delete,
}

impl RemoteOperation {
    /// Short lowercase name for structured logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Probe => "probe",
            Self::List => "list",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Notice shown to the user when this operation fails and offline mode begins
    #[must_use]
    pub const fn failure_notice(&self) -> &'static str {
        match self {
            Self::Probe | Self::List => notices::LOAD_FAILED_OFFLINE,
            Self::Insert | Self::Update => notices::SAVE_FAILED_OFFLINE,
            Self::Delete => notices::DELETE_FAILED_OFFLINE,
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a recipe draft is rejected before any store is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty after trimming
    #[error("recipe title is required")]
    MissingTitle,
    /// Method is empty after trimming
    #[error("recipe method is required")]
    MissingMethod,
    /// The ingredient list is empty
    #[error("at least one ingredient is required")]
    NoIngredients,
    /// An ingredient has an empty name or quantity
    #[error("ingredient {index} needs both a name and a quantity")]
    IncompleteIngredient {
        /// Zero-based position of the offending ingredient
        index: usize,
    },
}

impl ValidationError {
    /// Prompt shown to the user for this validation failure
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingTitle | Self::MissingMethod => notices::REQUIRED_FIELDS,
            Self::NoIngredients => notices::NEED_INGREDIENT,
            Self::IncompleteIngredient { .. } => notices::INCOMPLETE_INGREDIENT,
        }
    }
}

/// Errors surfaced by recipe store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input was rejected before dispatch; no store was called
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Any failure of a remote call (network, auth, status, decoding, not found)
    #[error("{backend} {operation} failed: {reason}")]
    RemoteUnavailable {
        /// Backend label (e.g. "supabase", "firestore")
        backend: &'static str,
        /// The call that failed
        operation: RemoteOperation,
        /// Transport or server detail
        reason: String,
    },

    /// The user declined a destructive action
    #[error("deletion of recipe {recipe_id} was not confirmed")]
    ConfirmationDeclined {
        /// Recipe that would have been deleted
        recipe_id: String,
    },

    /// Local snapshot could not be read or written
    #[error("local storage failure for key '{key}': {reason}")]
    LocalStorage {
        /// Storage key involved
        key: String,
        /// I/O or serialization detail
        reason: String,
    },
}

impl StoreError {
    /// Create a remote failure for the given backend and operation
    pub fn remote(
        backend: &'static str,
        operation: RemoteOperation,
        reason: impl Into<String>,
    ) -> Self {
        Self::RemoteUnavailable {
            backend,
            operation,
            reason: reason.into(),
        }
    }

    /// Create a local storage failure
    pub fn local_storage(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LocalStorage {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether this failure should degrade the session to local mode
    #[must_use]
    pub const fn is_remote_failure(&self) -> bool {
        matches!(self, Self::RemoteUnavailable { .. })
    }
}
