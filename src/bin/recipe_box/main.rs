// ABOUTME: Recipe Box CLI - terminal front end for the recipe book
// ABOUTME: Starts a session against the configured backend and performs one recipe command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List recipes (online if a backend is configured, offline otherwise)
//! recipe-box list
//!
//! # Add a recipe
//! recipe-box add --title "Pancakes" --method "Whisk and fry." \
//!     --ingredient "Flour=100g" --ingredient "Milk=200ml"
//!
//! # Change the title of a recipe
//! recipe-box edit recipe_1700000000000 --title "Crepes"
//!
//! # Delete without the confirmation prompt
//! recipe-box delete recipe_1700000000000 --yes
//! ```

mod commands;
mod terminal;

use clap::{Parser, Subcommand};
use recipe_box::book::RecipeBook;
use recipe_box::config::RecipeBoxConfig;
use recipe_box::logging::LoggingConfig;
use recipe_box::models::Ingredient;
use std::process::ExitCode;
use tracing::info;

use terminal::TerminalView;

#[derive(Parser)]
#[command(
    name = "recipe-box",
    about = "Recipe Box - keep your recipes online, with an offline fallback",
    long_about = "Manage recipes stored in Supabase or Firestore. When the backend is unreachable the session switches to local storage."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List all recipes
    List,

    /// Show one recipe with its ingredients and method
    Show {
        /// Recipe id
        id: String,
    },

    /// Add a new recipe
    Add {
        /// Recipe title
        #[arg(long)]
        title: Option<String>,

        /// Preparation method
        #[arg(long)]
        method: Option<String>,

        /// Ingredient as NAME=QUANTITY (repeatable)
        #[arg(long = "ingredient", value_parser = parse_ingredient)]
        ingredients: Vec<Ingredient>,
    },

    /// Edit an existing recipe; omitted fields keep their current value
    Edit {
        /// Recipe id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New method
        #[arg(long)]
        method: Option<String>,

        /// Replacement ingredient list as NAME=QUANTITY (repeatable)
        #[arg(long = "ingredient", value_parser = parse_ingredient)]
        ingredients: Vec<Ingredient>,
    },

    /// Delete a recipe
    Delete {
        /// Recipe id
        id: String,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn parse_ingredient(raw: &str) -> Result<Ingredient, String> {
    raw.split_once('=')
        .map(|(name, quantity)| Ingredient::new(name, quantity))
        .ok_or_else(|| format!("expected NAME=QUANTITY, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let config = RecipeBoxConfig::from_env()?;
    let mut view = TerminalView::new();
    if matches!(cli.command, Command::List) {
        view.enable_rendering();
    }

    let mut book = RecipeBook::from_config(&config, view);
    let mode = book.start().await;
    info!(mode = %mode, backend = ?book.backend_name(), "Session started");

    let exit = match cli.command {
        Command::List => ExitCode::SUCCESS,
        Command::Show { id } => commands::show(&book, &id),
        Command::Add {
            title,
            method,
            ingredients,
        } => commands::add(&mut book, title, method, ingredients).await,
        Command::Edit {
            id,
            title,
            method,
            ingredients,
        } => commands::edit(&mut book, &id, title, method, ingredients).await,
        Command::Delete { id, yes } => commands::delete(&mut book, &id, yes).await,
    };

    if book.is_offline() {
        eprintln!("(offline mode: recipes are stored in {})", config.local.data_dir.display());
    }
    Ok(exit)
}
