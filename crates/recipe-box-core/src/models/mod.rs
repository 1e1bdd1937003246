// ABOUTME: Recipe data models shared by every store and the session facade
// ABOUTME: Re-exports Recipe, Ingredient, RecipeDraft, and ValidatedRecipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// User input and its validated form
pub mod draft;
/// Tolerant field decoding shared by the stores
pub mod lenient;
/// Stored recipe representation
pub mod recipe;

pub use draft::{RecipeDraft, ValidatedRecipe};
pub use recipe::{Ingredient, Recipe};
