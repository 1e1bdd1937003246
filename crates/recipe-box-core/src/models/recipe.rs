// ABOUTME: Stored recipe model in the shape persisted by the local fallback store
// ABOUTME: Defines Recipe and Ingredient plus display helpers and the first-run seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::ValidatedRecipe;
use super::lenient;
use crate::constants::{notices, seed};

/// One line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (e.g. "Onion")
    pub name: String,
    /// Free-text quantity (e.g. "200g", "to taste")
    pub quantity: String,
}

impl Ingredient {
    /// Create an ingredient from a name and quantity
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// A recipe as held in memory and persisted locally
///
/// Serialized field-for-field as
/// `{id, title, method, ingredients: [{name, quantity}], createdAt, updatedAt?}`.
/// Snapshots written with snake_case timestamp keys, numeric row ids, bare
/// `timestamp` text or a null ingredient list are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque identifier assigned by the store that created the recipe
    #[serde(deserialize_with = "lenient::id_as_string")]
    pub id: String,
    /// Display title
    pub title: String,
    /// Preparation instructions
    pub method: String,
    /// Ordered ingredient list
    #[serde(default, deserialize_with = "lenient::nullable_list")]
    pub ingredients: Vec<Ingredient>,
    /// Creation time; `None` while a server timestamp is unresolved
    #[serde(
        default,
        alias = "created_at",
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(
        default,
        alias = "updated_at",
        deserialize_with = "lenient::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Owner identifier (document store only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Recipe {
    /// Build a recipe from validated input with client-assigned timestamps
    #[must_use]
    pub fn from_validated(id: String, input: &ValidatedRecipe, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title().to_owned(),
            method: input.method().to_owned(),
            ingredients: input.ingredients().to_vec(),
            created_at: Some(now),
            updated_at: Some(now),
            user_id: None,
        }
    }

    /// Overwrite the editable fields, keeping `id`, `created_at` and owner
    pub fn apply(&mut self, input: &ValidatedRecipe, now: DateTime<Utc>) {
        input.title().clone_into(&mut self.title);
        input.method().clone_into(&mut self.method);
        self.ingredients = input.ingredients().to_vec();
        self.updated_at = Some(now);
    }

    /// The example recipe shown on first run
    #[must_use]
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            id: seed::SEED_ID.to_owned(),
            title: seed::SEED_TITLE.to_owned(),
            method: seed::SEED_METHOD.to_owned(),
            ingredients: seed::SEED_INGREDIENTS
                .iter()
                .map(|(name, quantity)| Ingredient::new(*name, *quantity))
                .collect(),
            created_at: Some(now),
            updated_at: None,
            user_id: None,
        }
    }

    /// Number of ingredients, as shown on recipe cards
    #[must_use]
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Creation date for display, or "Unknown" while unresolved
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at.map_or_else(
            || notices::UNKNOWN_DATE.to_owned(),
            |at| at.format("%Y-%m-%d").to_string(),
        )
    }
}
