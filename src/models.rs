// ABOUTME: Recipe model re-exports for the Recipe Box library
// ABOUTME: Exposes Recipe, Ingredient, RecipeDraft, and ValidatedRecipe from the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use recipe_box_core::models::{Ingredient, Recipe, RecipeDraft, ValidatedRecipe};
