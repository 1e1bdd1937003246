// ABOUTME: Recipe input as entered by the user and its validated counterpart
// ABOUTME: Validation trims text and rejects empty title, method, or ingredient fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::recipe::Ingredient;
use crate::errors::ValidationError;

/// Unvalidated recipe content submitted by the View
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Title as typed
    pub title: String,
    /// Method as typed
    pub method: String,
    /// Ingredient rows as typed
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDraft {
    /// Create a draft from its parts
    pub fn new(
        title: impl Into<String>,
        method: impl Into<String>,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        Self {
            title: title.into(),
            method: method.into(),
            ingredients,
        }
    }

    /// Check the draft and produce trimmed, store-ready content
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found: empty title, empty method,
    /// no ingredients, or an ingredient with an empty name or quantity.
    pub fn validate(&self) -> Result<ValidatedRecipe, ValidationError> {
        let title = self.title.trim();
        let method = self.method.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if method.is_empty() {
            return Err(ValidationError::MissingMethod);
        }
        if self.ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }

        let ingredients = self
            .ingredients
            .iter()
            .enumerate()
            .map(|(index, ingredient)| {
                let name = ingredient.name.trim();
                let quantity = ingredient.quantity.trim();
                if name.is_empty() || quantity.is_empty() {
                    Err(ValidationError::IncompleteIngredient { index })
                } else {
                    Ok(Ingredient::new(name, quantity))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedRecipe {
            title: title.to_owned(),
            method: method.to_owned(),
            ingredients,
        })
    }
}

/// Recipe content that passed validation
///
/// Only obtainable through [`RecipeDraft::validate`], so every store call
/// receives non-empty fields and at least one complete ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecipe {
    title: String,
    method: String,
    ingredients: Vec<Ingredient>,
}

impl ValidatedRecipe {
    /// Trimmed title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed method
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Trimmed ingredients, in input order
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}
