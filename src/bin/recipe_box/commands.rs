// ABOUTME: Command handlers for the recipe-box CLI
// ABOUTME: Translates parsed commands into recipe book operations and reports the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use recipe_box::book::RecipeBook;
use recipe_box::errors::StoreError;
use recipe_box::models::{Ingredient, RecipeDraft};
use std::process::ExitCode;
use tracing::debug;

use crate::terminal::{format_detail, TerminalView};

type Book = RecipeBook<TerminalView>;

/// Print one recipe in full
pub fn show(book: &Book, id: &str) -> ExitCode {
    match book.get(id) {
        Some(recipe) => {
            println!("{}", format_detail(recipe));
            ExitCode::SUCCESS
        }
        None => not_found(id),
    }
}

/// Create a recipe and list the collection
pub async fn add(
    book: &mut Book,
    title: Option<String>,
    method: Option<String>,
    ingredients: Vec<Ingredient>,
) -> ExitCode {
    let draft = RecipeDraft::new(
        title.unwrap_or_default(),
        method.unwrap_or_default(),
        ingredients,
    );
    book.view_mut().enable_rendering();
    match book.create(&draft).await {
        Ok(recipe) => {
            debug!(id = %recipe.id, "Added recipe");
            ExitCode::SUCCESS
        }
        Err(e) => failure(&e),
    }
}

/// Apply the given changes on top of the stored recipe
pub async fn edit(
    book: &mut Book,
    id: &str,
    title: Option<String>,
    method: Option<String>,
    ingredients: Vec<Ingredient>,
) -> ExitCode {
    let Some(current) = book.get(id) else {
        return not_found(id);
    };
    let draft = RecipeDraft::new(
        title.unwrap_or_else(|| current.title.clone()),
        method.unwrap_or_else(|| current.method.clone()),
        if ingredients.is_empty() {
            current.ingredients.clone()
        } else {
            ingredients
        },
    );

    book.view_mut().enable_rendering();
    match book.update(id, &draft).await {
        Ok(Some(_)) => ExitCode::SUCCESS,
        Ok(None) => not_found(id),
        Err(e) => failure(&e),
    }
}

/// Delete a recipe after confirmation
pub async fn delete(book: &mut Book, id: &str, yes: bool) -> ExitCode {
    if yes {
        book.view_mut().assume_yes();
    }
    book.view_mut().enable_rendering();
    match book.request_delete(id).await {
        Ok(Some(_)) => ExitCode::SUCCESS,
        Ok(None) => not_found(id),
        Err(StoreError::ConfirmationDeclined { .. }) => {
            println!("Deletion cancelled.");
            ExitCode::SUCCESS
        }
        Err(e) => failure(&e),
    }
}

fn not_found(id: &str) -> ExitCode {
    eprintln!("No recipe with id {id}");
    ExitCode::FAILURE
}

/// Validation prompts were already shown by the view
fn failure(error: &StoreError) -> ExitCode {
    if !matches!(error, StoreError::Validation(_)) {
        eprintln!("{error}");
    }
    ExitCode::FAILURE
}
