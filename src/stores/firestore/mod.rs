// ABOUTME: Document store backend talking to a Firestore `recipes` collection over REST
// ABOUTME: Scopes every read and write to the signed-in user and stamps times server-side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Firestore Document Store
//!
//! Reads use structured queries filtered on `userId` and ordered by
//! `createdAt` descending. Writes go through `:commit` so one request can
//! carry the document, its preconditions and the `REQUEST_TIME` transforms.
//! Server timestamps are not read back on write: a freshly written recipe has
//! unresolved timestamps until the next `list`.

/// Firestore typed value encoding
pub mod values;

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use recipe_box_core::constants::remote;
use recipe_box_core::errors::{RemoteOperation, StoreError};
use recipe_box_core::models::{Recipe, ValidatedRecipe};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::{RemoteRecipeStore, StoreResult};
use crate::config::FirebaseConfig;

const BACKEND: &str = "firestore";

/// Document store over the Firestore REST API
pub struct FirestoreStore {
    client: Client,
    /// `projects/{p}/databases/{db}/documents`
    documents_path: String,
    /// `{base_url}/{documents_path}`
    documents_url: String,
    id_token: String,
    user_id: String,
}

impl FirestoreStore {
    /// Create a store for the signed-in user described by `config`
    #[must_use]
    pub fn new(config: &FirebaseConfig, client: Client) -> Self {
        let documents_path = format!(
            "projects/{}/databases/{}/documents",
            config.project_id, config.database
        );
        let documents_url = format!(
            "{}/{documents_path}",
            config.base_url.trim_end_matches('/')
        );
        Self {
            client,
            documents_path,
            documents_url,
            id_token: config.id_token.clone(),
            user_id: config.user_id.clone(),
        }
    }

    /// Owner uid every query is scoped to
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn document_name(&self, id: &str) -> String {
        format!("{}/{}/{id}", self.documents_path, remote::RECIPES_COLLECTION)
    }

    fn owned_by_user(&self) -> Value {
        json!({
            "from": [{ "collectionId": remote::RECIPES_COLLECTION }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": values::USER_ID },
                    "op": "EQUAL",
                    "value": values::string_value(&self.user_id),
                }
            }
        })
    }

    async fn call(&self, operation: RemoteOperation, method: &str, body: &Value) -> StoreResult<Value> {
        let url = format!("{}:{method}", self.documents_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.id_token)
            .json(body)
            .send()
            .await
            .map_err(|e| failure(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure(operation, format!("HTTP {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| failure(operation, format!("undecodable response: {e}")))
    }

    async fn commit(&self, operation: RemoteOperation, write: Value) -> StoreResult<()> {
        self.call(operation, "commit", &json!({ "writes": [write] }))
            .await
            .map(|_| ())
    }

    fn stored(&self, id: String, recipe: &ValidatedRecipe) -> Recipe {
        Recipe {
            id,
            title: recipe.title().to_owned(),
            method: recipe.method().to_owned(),
            ingredients: recipe.ingredients().to_vec(),
            created_at: None,
            updated_at: None,
            user_id: Some(self.user_id.clone()),
        }
    }
}

#[async_trait]
impl RemoteRecipeStore for FirestoreStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn lists_newest_first(&self) -> bool {
        true
    }

    async fn probe(&self) -> StoreResult<()> {
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": self.owned_by_user(),
                "aggregations": [{ "alias": "count", "count": {} }]
            }
        });
        let response = self
            .call(RemoteOperation::Probe, "runAggregationQuery", &body)
            .await?;
        let count = response
            .pointer("/0/result/aggregateFields/count/integerValue")
            .and_then(Value::as_str)
            .unwrap_or("0");
        debug!(count, user_id = %self.user_id, "Firestore connected successfully");
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<Recipe>> {
        let mut query = self.owned_by_user();
        query["orderBy"] = json!([{
            "field": { "fieldPath": values::CREATED_AT },
            "direction": "DESCENDING"
        }]);

        let response = self
            .call(RemoteOperation::List, "runQuery", &json!({ "structuredQuery": query }))
            .await?;
        let results = response
            .as_array()
            .ok_or_else(|| failure(RemoteOperation::List, "runQuery did not return an array"))?;

        // Result entries without a document only carry a read time
        let recipes = results
            .iter()
            .filter_map(|result| result.get("document"))
            .map(values::decode_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| failure(RemoteOperation::List, reason))?;
        debug!(count = recipes.len(), "Fetched recipes from Firestore");
        Ok(recipes)
    }

    async fn insert(&self, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        let id = new_document_id();
        let write = json!({
            "update": {
                "name": self.document_name(&id),
                "fields": values::recipe_fields(recipe, Some(&self.user_id)),
            },
            "updateTransforms": [
                { "fieldPath": values::CREATED_AT, "setToServerValue": "REQUEST_TIME" },
                { "fieldPath": values::UPDATED_AT, "setToServerValue": "REQUEST_TIME" },
            ],
            "currentDocument": { "exists": false },
        });
        self.commit(RemoteOperation::Insert, write).await?;
        Ok(self.stored(id, recipe))
    }

    async fn update(&self, id: &str, recipe: &ValidatedRecipe) -> StoreResult<Recipe> {
        let write = json!({
            "update": {
                "name": self.document_name(id),
                "fields": values::recipe_fields(recipe, None),
            },
            "updateMask": {
                "fieldPaths": [values::TITLE, values::METHOD, values::INGREDIENTS]
            },
            "updateTransforms": [
                { "fieldPath": values::UPDATED_AT, "setToServerValue": "REQUEST_TIME" },
            ],
            "currentDocument": { "exists": true },
        });
        self.commit(RemoteOperation::Update, write).await?;
        Ok(self.stored(id.to_owned(), recipe))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.commit(
            RemoteOperation::Delete,
            json!({ "delete": self.document_name(id) }),
        )
        .await
    }
}

fn failure(operation: RemoteOperation, reason: impl Into<String>) -> StoreError {
    let reason = reason.into();
    error!(backend = BACKEND, operation = %operation, reason = %reason, "Firestore request failed");
    StoreError::remote(BACKEND, operation, reason)
}

/// Random 20-character alphanumeric document id, as the Firestore SDKs generate
#[must_use]
pub fn new_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(remote::DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}
