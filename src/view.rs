// ABOUTME: Presentation capability the recipe book calls into
// ABOUTME: Renders the collection, shows notices, and confirms destructive actions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_box_core::models::Recipe;

/// Presentation layer driven by [`crate::book::RecipeBook`]
///
/// The book calls `render` after every successful state change and
/// `show_error` for validation prompts and offline-mode notices.
pub trait RecipeView {
    /// Display the current collection
    fn render(&mut self, recipes: &[Recipe]);

    /// Show a user-facing notice
    fn show_error(&mut self, message: &str);

    /// Ask the user to confirm deleting `recipe`
    fn confirm_delete(&mut self, recipe: &Recipe) -> bool;
}

impl<V: RecipeView + ?Sized> RecipeView for Box<V> {
    fn render(&mut self, recipes: &[Recipe]) {
        (**self).render(recipes);
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message);
    }

    fn confirm_delete(&mut self, recipe: &Recipe) -> bool {
        (**self).confirm_delete(recipe)
    }
}
