// ABOUTME: Main library entry point for the Recipe Box recipe manager
// ABOUTME: Wires configuration, logging, remote/local recipe stores, and the session facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Box
//!
//! A recipe manager that keeps its collection in a remote backend (a
//! Supabase table or a Firestore collection) and falls back to local storage
//! when the backend is unreachable.
//!
//! ## Architecture
//!
//! - **Stores**: one [`stores::RemoteRecipeStore`] trait with a row-store and a
//!   document-store adapter, plus the [`stores::LocalRecipeStore`] fallback
//! - **Book**: [`book::RecipeBook`], the session facade owning the collection
//!   and the online/offline mode
//! - **View**: [`view::RecipeView`], the presentation capability the book
//!   renders through
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_box::book::RecipeBook;
//! use recipe_box::config::RecipeBoxConfig;
//! use recipe_box::models::Recipe;
//! use recipe_box::view::RecipeView;
//!
//! struct Printer;
//!
//! impl RecipeView for Printer {
//!     fn render(&mut self, recipes: &[Recipe]) {
//!         for recipe in recipes {
//!             println!("{}", recipe.title);
//!         }
//!     }
//!     fn show_error(&mut self, message: &str) {
//!         eprintln!("{message}");
//!     }
//!     fn confirm_delete(&mut self, _recipe: &Recipe) -> bool {
//!         false
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RecipeBoxConfig::from_env()?;
//!     let mut book = RecipeBook::from_config(&config, Printer);
//!     book.start().await;
//!     Ok(())
//! }
//! ```

/// Session facade with the online/offline state machine
pub mod book;

/// Configuration management
pub mod config;

/// Error types shared with the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Recipe models shared with the core crate
pub mod models;

/// Remote store adapters and the local fallback store
pub mod stores;

/// Presentation capability driven by the book
pub mod view;
