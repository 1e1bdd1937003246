// ABOUTME: Row store backend talking to a Supabase `recipes` table through PostgREST
// ABOUTME: Maps list/insert/update/delete onto REST calls and normalizes rows into Recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Supabase Row Store
//!
//! Every request carries the project's anonymous key both as `apikey` and as
//! a bearer token. Writes ask for `Prefer: return=representation` so the
//! server hands back the canonical row, including its assigned `id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recipe_box_core::constants::remote;
use recipe_box_core::errors::{AppError, AppResult, RemoteOperation, StoreError};
use recipe_box_core::models::lenient::{id_as_string, nullable_list, optional_timestamp};
use recipe_box_core::models::{Ingredient, Recipe, ValidatedRecipe};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use super::{RemoteRecipeStore, StoreResult};
use crate::config::SupabaseConfig;

const BACKEND: &str = "supabase";

/// Row as returned by PostgREST
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRow {
    /// Primary key; bigint or uuid depending on the table definition
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Title column
    pub title: String,
    /// Method column
    pub method: String,
    /// `jsonb` ingredient array; null reads as empty
    #[serde(default, deserialize_with = "nullable_list")]
    pub ingredients: Vec<Ingredient>,
    /// Creation timestamp, `timestamptz` or bare `timestamp`
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            method: row.method,
            ingredients: row.ingredients,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user_id: None,
        }
    }
}

/// Insert body; the server assigns `id`
#[derive(Debug, Serialize)]
struct NewRecipeRow<'a> {
    title: &'a str,
    method: &'a str,
    ingredients: &'a [Ingredient],
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Patch body for edits
#[derive(Debug, Serialize)]
struct RecipePatch<'a> {
    title: &'a str,
    method: &'a str,
    ingredients: &'a [Ingredient],
    updated_at: DateTime<Utc>,
}

/// Row store over the Supabase REST API
pub struct SupabaseStore {
    client: Client,
    endpoint: Url,
    anon_key: String,
}

impl SupabaseStore {
    /// Create a store for the project described by `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the project URL cannot be parsed
    pub fn new(config: &SupabaseConfig, client: Client) -> AppResult<Self> {
        Ok(Self {
            client,
            endpoint: table_endpoint(&config.url)?,
            anon_key: config.anon_key.clone(),
        })
    }

    /// URL of the `recipes` table
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn send(&self, operation: RemoteOperation, builder: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(|e| failure(operation, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(failure(operation, format!("HTTP {status}: {body}")))
    }

    async fn rows(&self, operation: RemoteOperation, builder: RequestBuilder) -> StoreResult<Vec<RecipeRow>> {
        self.send(operation, builder)
            .await?
            .json::<Vec<RecipeRow>>()
            .await
            .map_err(|e| failure(operation, format!("undecodable response: {e}")))
    }
}

#[async_trait]
impl RemoteRecipeStore for SupabaseStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn probe(&self) -> StoreResult<()> {
        let builder = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "count")])
            .header("Prefer", "count=exact");
        self.send(RemoteOperation::Probe, builder).await?;
        debug!("Supabase connected successfully");
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Recipe>> {
        let builder = self.client.get(self.endpoint.clone()).query(&[("select", "*")]);
        let rows = self.rows(RemoteOperation::List, builder).await?;
        debug!(count = rows.len(), "Fetched recipes from Supabase");
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn insert(&self, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        let now = Utc::now();
        let body = [NewRecipeRow {
            title: recipe.title(),
            method: recipe.method(),
            ingredients: recipe.ingredients(),
            created_at: now,
            updated_at: now,
        }];
        let builder = self
            .client
            .post(self.endpoint.clone())
            .header("Prefer", "return=representation")
            .json(&body);

        let rows = self.rows(RemoteOperation::Insert, builder).await?;
        rows.into_iter()
            .next()
            .map(Recipe::from)
            .ok_or_else(|| failure(RemoteOperation::Insert, "insert returned no row"))
    }

    async fn update(&self, id: &str, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        let body = RecipePatch {
            title: recipe.title(),
            method: recipe.method(),
            ingredients: recipe.ingredients(),
            updated_at: Utc::now(),
        };
        let builder = self
            .client
            .patch(self.endpoint.clone())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&body);

        let rows = self.rows(RemoteOperation::Update, builder).await?;
        rows.into_iter()
            .next()
            .map(Recipe::from)
            .ok_or_else(|| failure(RemoteOperation::Update, format!("no row matched id {id}")))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let builder = self
            .client
            .delete(self.endpoint.clone())
            .query(&[("id", format!("eq.{id}"))]);
        self.send(RemoteOperation::Delete, builder).await?;
        Ok(())
    }
}

fn failure(operation: RemoteOperation, reason: impl Into<String>) -> StoreError {
    let reason = reason.into();
    error!(backend = BACKEND, operation = %operation, reason = %reason, "Supabase request failed");
    StoreError::remote(BACKEND, operation, reason)
}

/// Build `<project>/rest/v1/recipes` from the configured project URL
///
/// # Errors
///
/// Returns a configuration error if `project_url` is not a valid base URL
pub fn table_endpoint(project_url: &str) -> AppResult<Url> {
    let mut base = Url::parse(project_url).map_err(|e| {
        AppError::config(format!("Invalid SUPABASE_URL '{project_url}': {e}")).with_source(e)
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("{}/{}", remote::REST_PATH, remote::RECIPES_TABLE))
        .map_err(|e| AppError::config(format!("Invalid SUPABASE_URL '{project_url}': {e}")))
}
