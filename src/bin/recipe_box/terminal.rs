// ABOUTME: Terminal implementation of the recipe view for the recipe-box CLI
// ABOUTME: Prints recipe cards to stdout, notices to stderr, and asks for delete confirmation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_box::models::Recipe;
use recipe_box::view::RecipeView;
use recipe_box_core::constants::notices;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

/// Stdout/stdin view
///
/// Rendering stays off until a command asks for it, so session start-up
/// does not print a list the command never wanted.
#[derive(Default)]
pub struct TerminalView {
    rendering: bool,
    assume_yes: bool,
}

impl TerminalView {
    pub const fn new() -> Self {
        Self {
            rendering: false,
            assume_yes: false,
        }
    }

    /// Print the collection on every following render
    pub fn enable_rendering(&mut self) {
        self.rendering = true;
    }

    /// Skip the confirmation prompt (`--yes`)
    pub fn assume_yes(&mut self) {
        self.assume_yes = true;
    }
}

impl RecipeView for TerminalView {
    fn render(&mut self, recipes: &[Recipe]) {
        if !self.rendering {
            return;
        }
        if recipes.is_empty() {
            println!("No recipes yet. Add one with `recipe-box add`.");
            return;
        }
        for recipe in recipes {
            println!("{}", format_card(recipe));
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm_delete(&mut self, recipe: &Recipe) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} \"{}\" [y/N] ", notices::CONFIRM_DELETE, recipe.title);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// One-recipe summary as shown in the list
pub fn format_card(recipe: &Recipe) -> String {
    let count = recipe.ingredient_count();
    let noun = if count == 1 { "ingredient" } else { "ingredients" };
    format!(
        "{}\n  {count} {noun} | Added {}\n  id: {}",
        recipe.title,
        recipe.created_label(),
        recipe.id
    )
}

/// Full recipe as shown by `show`
pub fn format_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let underline = "=".repeat(recipe.title.chars().count());
    let _ = writeln!(out, "{}\n{underline}\n\nIngredients:", recipe.title);
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}: {}", ingredient.name, ingredient.quantity);
    }
    let _ = write!(
        out,
        "\nMethod:\n{}\n\nAdded {}",
        recipe.method,
        recipe.created_label()
    );
    out
}
