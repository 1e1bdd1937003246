// ABOUTME: Shared test utilities for recipe book integration tests
// ABOUTME: Provides a recording view, a scriptable in-memory remote store, and sample drafts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    missing_docs,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `recipe_box`

use async_trait::async_trait;
use chrono::Utc;
use recipe_box::errors::{RemoteOperation, StoreError};
use recipe_box::models::{Ingredient, Recipe, RecipeDraft, ValidatedRecipe};
use recipe_box::stores::{RemoteRecipeStore, StoreResult};
use recipe_box::view::RecipeView;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// View that records everything the book tells it
#[derive(Debug, Default)]
pub struct RecordingView {
    pub renders: Vec<Vec<Recipe>>,
    pub errors: Vec<String>,
    pub confirmations: Vec<String>,
    pub decline: bool,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose user answers "no" to every delete prompt
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    pub fn last_render(&self) -> Option<&[Recipe]> {
        self.renders.last().map(Vec::as_slice)
    }
}

impl RecipeView for RecordingView {
    fn render(&mut self, recipes: &[Recipe]) {
        self.renders.push(recipes.to_vec());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_owned());
    }

    fn confirm_delete(&mut self, recipe: &Recipe) -> bool {
        self.confirmations.push(recipe.id.clone());
        !self.decline
    }
}

#[derive(Default)]
struct ScriptState {
    rows: Mutex<Vec<Recipe>>,
    calls: Mutex<Vec<RemoteOperation>>,
    writes: AtomicUsize,
    next_id: AtomicUsize,
    fail_on_write: Mutex<Option<usize>>,
    probe_fails: AtomicBool,
    list_fails: AtomicBool,
    newest_first: AtomicBool,
}

/// In-memory remote store with scripted failures
///
/// Clones share state, so a test can keep a handle after boxing one copy
/// into the book.
#[derive(Clone, Default)]
pub struct ScriptedRemote {
    state: Arc<ScriptState>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote already holding `rows`
    pub fn with_rows(rows: Vec<Recipe>) -> Self {
        let remote = Self::new();
        *remote.state.rows.lock().unwrap() = rows;
        remote
    }

    /// Make the `n`th write (1-based, counting insert/update/delete) fail
    pub fn fail_on_write(self, n: usize) -> Self {
        *self.state.fail_on_write.lock().unwrap() = Some(n);
        self
    }

    /// Make the connectivity probe fail
    pub fn failing_probe(self) -> Self {
        self.state.probe_fails.store(true, Ordering::SeqCst);
        self
    }

    /// Make the initial list fail after a good probe
    pub fn failing_list(self) -> Self {
        self.state.list_fails.store(true, Ordering::SeqCst);
        self
    }

    /// Keep rows newest first, like a store ordered by creation time descending
    pub fn listing_newest_first(self) -> Self {
        self.state.newest_first.store(true, Ordering::SeqCst);
        self
    }

    /// Add a row behind the book's back, as another client would
    pub fn add_row(&self, recipe: Recipe) {
        self.state.rows.lock().unwrap().push(recipe);
    }

    pub fn boxed(&self) -> Option<Box<dyn RemoteRecipeStore>> {
        Some(Box::new(self.clone()))
    }

    pub fn calls(&self) -> Vec<RemoteOperation> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<Recipe> {
        self.state.rows.lock().unwrap().clone()
    }

    fn record(&self, operation: RemoteOperation) {
        self.state.calls.lock().unwrap().push(operation);
    }

    fn write(&self, operation: RemoteOperation) -> StoreResult<()> {
        self.record(operation);
        let n = self.state.writes.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.state.fail_on_write.lock().unwrap() == Some(n) {
            return Err(StoreError::remote("scripted", operation, "scripted outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteRecipeStore for ScriptedRemote {
    fn backend_name(&self) -> &'static str {
        "scripted"
    }

    fn lists_newest_first(&self) -> bool {
        self.state.newest_first.load(Ordering::SeqCst)
    }

    async fn probe(&self) -> StoreResult<()> {
        self.record(RemoteOperation::Probe);
        if self.state.probe_fails.load(Ordering::SeqCst) {
            return Err(StoreError::remote("scripted", RemoteOperation::Probe, "unreachable"));
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Recipe>> {
        self.record(RemoteOperation::List);
        if self.state.list_fails.load(Ordering::SeqCst) {
            return Err(StoreError::remote("scripted", RemoteOperation::List, "HTTP 500"));
        }
        Ok(self.rows())
    }

    async fn insert(&self, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        self.write(RemoteOperation::Insert)?;
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 100;
        let stored = Recipe::from_validated(id.to_string(), recipe, Utc::now());
        let mut rows = self.state.rows.lock().unwrap();
        if self.lists_newest_first() {
            rows.insert(0, stored.clone());
        } else {
            rows.push(stored.clone());
        }
        Ok(stored)
    }

    async fn update(&self, id: &str, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        self.write(RemoteOperation::Update)?;
        let mut rows = self.state.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Err(StoreError::remote("scripted", RemoteOperation::Update, "no row"));
        };
        row.apply(recipe, Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.write(RemoteOperation::Delete)?;
        self.state.rows.lock().unwrap().retain(|row| row.id != id);
        Ok(())
    }
}

/// A complete, valid draft
pub fn sample_draft(title: &str) -> RecipeDraft {
    RecipeDraft::new(
        title,
        "Mix everything and bake for 20 minutes.",
        vec![
            Ingredient::new("Flour", "200g"),
            Ingredient::new("Eggs", "2"),
        ],
    )
}

/// Recipe with a fixed offline-style id
pub fn offline_recipe(id: &str, title: &str) -> Recipe {
    let validated = sample_draft(title).validate().unwrap();
    Recipe::from_validated(id.to_owned(), &validated, Utc::now())
}
