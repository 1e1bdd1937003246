// ABOUTME: Recipe book facade deciding per operation between the remote store and local fallback
// ABOUTME: Implements the one-way degrade from remote to offline mode with local replay of writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Book
//!
//! The single owner of session state: the in-memory collection and the
//! active store mode. The View calls into it; it calls back into the View to
//! render and to show notices.
//!
//! # Modes
//!
//! - **Uninitialized**: nothing loaded yet; the first operation starts the session
//! - **Probing**: connectivity check against the remote store in progress
//! - **`RemoteActive`**: writes go to the remote store, memory follows on success
//! - **`LocalActive`**: writes go to memory and are persisted with `save_all`
//!
//! `LocalActive` is terminal. A remote failure during a write alerts the
//! user, switches to `LocalActive` and replays the same write locally, so the
//! user's action is never lost. A recovered remote is not used again for the
//! rest of the session.

use chrono::Utc;
use recipe_box_core::constants::notices;
use recipe_box_core::errors::{RemoteOperation, StoreError};
use recipe_box_core::models::{Recipe, RecipeDraft, ValidatedRecipe};
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::RecipeBoxConfig;
use crate::stores::local::next_local_id;
use crate::stores::{self, LocalRecipeStore, RemoteRecipeStore, StoreResult};
use crate::view::RecipeView;

/// Which store currently backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Session not started
    Uninitialized,
    /// Remote connectivity check in progress
    Probing,
    /// Operations go to the remote store
    RemoteActive,
    /// Operations go to the local fallback store, for the rest of the session
    LocalActive,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Probing => write!(f, "probing"),
            Self::RemoteActive => write!(f, "online"),
            Self::LocalActive => write!(f, "offline"),
        }
    }
}

/// Session facade over the remote store, the local fallback and the View
pub struct RecipeBook<V: RecipeView> {
    remote: Option<Box<dyn RemoteRecipeStore>>,
    local: LocalRecipeStore,
    view: V,
    mode: StoreMode,
    recipes: Vec<Recipe>,
}

impl<V: RecipeView> RecipeBook<V> {
    /// Create an unstarted book
    ///
    /// With `remote` set to `None` the session goes straight to offline mode.
    pub fn new(remote: Option<Box<dyn RemoteRecipeStore>>, local: LocalRecipeStore, view: V) -> Self {
        Self {
            remote,
            local,
            view,
            mode: StoreMode::Uninitialized,
            recipes: Vec::new(),
        }
    }

    /// Create an unstarted book wired from configuration
    pub fn from_config(config: &RecipeBoxConfig, view: V) -> Self {
        Self::new(
            stores::remote_from_config(config),
            LocalRecipeStore::with_data_dir(config.local.data_dir.clone()),
            view,
        )
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> StoreMode {
        self.mode
    }

    /// Whether the session has fallen back to the local store
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.mode == StoreMode::LocalActive
    }

    /// Label of the configured remote backend, if any
    #[must_use]
    pub fn backend_name(&self) -> Option<&'static str> {
        self.remote.as_ref().map(|remote| remote.backend_name())
    }

    /// The in-memory collection in the active store's order
    #[must_use]
    pub fn get_all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// One recipe by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// The attached View
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The attached View, mutably
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Probe the remote store and load the initial collection
    ///
    /// Calling it again after the session started does nothing.
    pub async fn start(&mut self) -> StoreMode {
        if self.mode != StoreMode::Uninitialized {
            return self.mode;
        }
        self.mode = StoreMode::Probing;

        let Some(remote) = self.remote.as_deref() else {
            warn!("No remote store configured, using local storage");
            self.load_local();
            return self.mode;
        };

        let backend = remote.backend_name();
        let loaded = match remote.probe().await {
            Ok(()) => Some(remote.list().await),
            Err(e) => {
                warn!(backend, error = %e, "Remote store unreachable, using local storage");
                None
            }
        };

        match loaded {
            Some(Ok(recipes)) => {
                info!(backend, count = recipes.len(), "Remote store active");
                self.recipes = recipes;
                self.mode = StoreMode::RemoteActive;
                self.view.render(&self.recipes);
            }
            Some(Err(e)) => {
                warn!(backend, error = %e, "Initial remote load failed, switching to offline mode");
                self.view.show_error(notices::LOAD_FAILED_OFFLINE);
                self.load_local();
            }
            None => self.load_local(),
        }
        self.mode
    }

    /// Validate and store a new recipe
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` (after prompting the user) when the
    /// draft is incomplete; no store is touched in that case.
    pub async fn create(&mut self, draft: &RecipeDraft) -> StoreResult<Recipe> {
        self.ensure_started().await;
        let validated = self.validate(draft)?;

        let outcome = match self.active_remote() {
            Some(remote) => Some(remote.insert(&validated).await),
            None => None,
        };

        let recipe = match outcome {
            Some(Ok(stored)) => {
                debug!(id = %stored.id, "Recipe created remotely");
                self.add_stored(stored.clone());
                stored
            }
            Some(Err(e)) => {
                self.degrade(RemoteOperation::Insert, &e);
                self.create_local(&validated)
            }
            None => self.create_local(&validated),
        };

        self.view.render(&self.recipes);
        Ok(recipe)
    }

    /// Validate and apply an edit to recipe `id`
    ///
    /// Returns `None` when offline and `id` is not in the collection; nothing
    /// changes in that case. A remote update of a recipe that was not in
    /// memory adds the stored record to the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` (after prompting the user) when the
    /// draft is incomplete; no store is touched in that case.
    pub async fn update(&mut self, id: &str, draft: &RecipeDraft) -> StoreResult<Option<Recipe>> {
        self.ensure_started().await;
        let validated = self.validate(draft)?;

        let outcome = match self.active_remote() {
            Some(remote) => Some(remote.update(id, &validated).await),
            None => None,
        };

        let updated = match outcome {
            Some(Ok(stored)) => Some(self.replace_with_stored(id, stored)),
            Some(Err(e)) => {
                self.degrade(RemoteOperation::Update, &e);
                let replayed = self.update_local(id, &validated);
                if replayed.is_none() {
                    warn!(id, "Edit dropped: recipe is not in the offline collection");
                }
                replayed
            }
            None => self.update_local(id, &validated),
        };

        if updated.is_some() {
            self.view.render(&self.recipes);
        }
        Ok(updated)
    }

    /// Ask the View to confirm, then delete recipe `id`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConfirmationDeclined` when the user declines;
    /// nothing changes in that case.
    pub async fn request_delete(&mut self, id: &str) -> StoreResult<Option<Recipe>> {
        self.ensure_started().await;
        let Some(recipe) = self.get(id).cloned() else {
            debug!(id, "Delete requested for unknown recipe");
            return Ok(None);
        };

        if !self.view.confirm_delete(&recipe) {
            info!(id, "Recipe deletion declined");
            return Err(StoreError::ConfirmationDeclined {
                recipe_id: recipe.id,
            });
        }
        Ok(self.delete(id).await)
    }

    /// Delete recipe `id` without asking
    ///
    /// Returns the removed recipe, or `None` if `id` was not in the
    /// collection, in which case no store is called.
    pub async fn delete(&mut self, id: &str) -> Option<Recipe> {
        self.ensure_started().await;
        if self.get(id).is_none() {
            debug!(id, "Delete of unknown recipe ignored");
            return None;
        }

        let outcome = match self.active_remote() {
            Some(remote) => Some(remote.delete(id).await),
            None => None,
        };

        let removed = match outcome {
            Some(Ok(())) => {
                debug!(id, "Recipe deleted remotely");
                self.remove(id)
            }
            Some(Err(e)) => {
                self.degrade(RemoteOperation::Delete, &e);
                self.delete_local(id)
            }
            None => self.delete_local(id),
        };

        self.view.render(&self.recipes);
        removed
    }

    async fn ensure_started(&mut self) {
        if self.mode == StoreMode::Uninitialized {
            self.start().await;
        }
    }

    fn active_remote(&self) -> Option<&dyn RemoteRecipeStore> {
        match self.mode {
            StoreMode::RemoteActive => self.remote.as_deref(),
            _ => None,
        }
    }

    fn validate(&mut self, draft: &RecipeDraft) -> StoreResult<ValidatedRecipe> {
        draft.validate().map_err(|e| {
            debug!(error = %e, "Recipe draft rejected");
            self.view.show_error(e.user_message());
            StoreError::Validation(e)
        })
    }

    fn load_local(&mut self) {
        self.recipes = self.local.load();
        self.mode = StoreMode::LocalActive;
        info!(count = self.recipes.len(), "Local storage active");
        self.view.render(&self.recipes);
    }

    /// One-way switch to offline mode; the current collection carries over
    fn degrade(&mut self, operation: RemoteOperation, error: &StoreError) {
        warn!(
            operation = %operation,
            error = %error,
            "Remote store failed, switching to offline mode for the rest of the session"
        );
        self.view.show_error(operation.failure_notice());
        self.mode = StoreMode::LocalActive;
    }

    fn persist(&self) {
        if let Err(e) = self.local.save_all(&self.recipes) {
            warn!(error = %e, "Failed to save recipes locally");
        }
    }

    fn create_local(&mut self, validated: &ValidatedRecipe) -> Recipe {
        let now = Utc::now();
        let recipe = Recipe::from_validated(next_local_id(&self.recipes, now), validated, now);
        debug!(id = %recipe.id, "Recipe created locally");
        self.recipes.push(recipe.clone());
        self.persist();
        recipe
    }

    fn update_local(&mut self, id: &str, validated: &ValidatedRecipe) -> Option<Recipe> {
        let Some(recipe) = self.recipes.iter_mut().find(|recipe| recipe.id == id) else {
            debug!(id, "Update of unknown recipe ignored");
            return None;
        };
        recipe.apply(validated, Utc::now());
        let updated = recipe.clone();
        self.persist();
        Some(updated)
    }

    /// Add a record the remote store accepted, in the order its `list` uses
    fn add_stored(&mut self, stored: Recipe) {
        let newest_first = self
            .remote
            .as_deref()
            .is_some_and(|remote| remote.lists_newest_first());
        if newest_first {
            self.recipes.insert(0, stored);
        } else {
            self.recipes.push(stored);
        }
    }

    /// Swap in the stored record, keeping a known creation time the store did not echo
    fn replace_with_stored(&mut self, id: &str, mut stored: Recipe) -> Recipe {
        if let Some(existing) = self.recipes.iter_mut().find(|recipe| recipe.id == id) {
            if stored.created_at.is_none() {
                stored.created_at = existing.created_at;
            }
            *existing = stored.clone();
            debug!(id, "Recipe updated remotely");
        } else {
            warn!(id, "Remote store updated a recipe missing from memory, adding it");
            self.add_stored(stored.clone());
        }
        stored
    }

    fn remove(&mut self, id: &str) -> Option<Recipe> {
        let index = self.recipes.iter().position(|recipe| recipe.id == id)?;
        Some(self.recipes.remove(index))
    }

    fn delete_local(&mut self, id: &str) -> Option<Recipe> {
        let removed = self.remove(id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }
}
