// ABOUTME: Firestore REST value encoding for recipe documents
// ABOUTME: Converts recipes to typed field maps and decodes query results back into Recipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Firestore wraps every field in a typed value object such as
//! `{"stringValue": "Soup"}` or `{"arrayValue": {"values": [...]}}`.
//! Empty arrays come back as `{"arrayValue": {}}`.

use chrono::{DateTime, Utc};
use recipe_box_core::models::{Ingredient, Recipe, ValidatedRecipe};
use serde_json::{json, Map, Value};

/// Document field holding the title
pub const TITLE: &str = "title";
/// Document field holding the method
pub const METHOD: &str = "method";
/// Document field holding the ingredient array
pub const INGREDIENTS: &str = "ingredients";
/// Document field holding the owner uid
pub const USER_ID: &str = "userId";
/// Server-stamped creation time
pub const CREATED_AT: &str = "createdAt";
/// Server-stamped modification time
pub const UPDATED_AT: &str = "updatedAt";

/// Wrap text as a `stringValue`
#[must_use]
pub fn string_value(text: &str) -> Value {
    json!({ "stringValue": text })
}

/// Encode ingredients as an array of `{name, quantity}` maps
#[must_use]
pub fn ingredients_value(ingredients: &[Ingredient]) -> Value {
    let values: Vec<Value> = ingredients
        .iter()
        .map(|ingredient| {
            json!({
                "mapValue": {
                    "fields": {
                        "name": string_value(&ingredient.name),
                        "quantity": string_value(&ingredient.quantity),
                    }
                }
            })
        })
        .collect();
    json!({ "arrayValue": { "values": values } })
}

/// Editable fields of a recipe, plus the owner when given
#[must_use]
pub fn recipe_fields(recipe: &ValidatedRecipe, user_id: Option<&str>) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(TITLE.to_owned(), string_value(recipe.title()));
    fields.insert(METHOD.to_owned(), string_value(recipe.method()));
    fields.insert(INGREDIENTS.to_owned(), ingredients_value(recipe.ingredients()));
    if let Some(uid) = user_id {
        fields.insert(USER_ID.to_owned(), string_value(uid));
    }
    fields
}

/// Decode a Firestore document resource into a Recipe
///
/// The id is the last segment of the document `name`. Missing timestamps
/// stay unresolved.
///
/// # Errors
///
/// Returns a description of the first structural problem found
pub fn decode_document(document: &Value) -> Result<Recipe, String> {
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .ok_or("document has no name")?;
    let id = name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| format!("malformed document name {name}"))?;

    let empty = Map::new();
    let fields = document
        .get("fields")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    Ok(Recipe {
        id: id.to_owned(),
        title: required_string(fields, TITLE)?,
        method: required_string(fields, METHOD)?,
        ingredients: fields
            .get(INGREDIENTS)
            .map(decode_ingredients)
            .transpose()?
            .unwrap_or_default(),
        created_at: fields.get(CREATED_AT).and_then(timestamp),
        updated_at: fields.get(UPDATED_AT).and_then(timestamp),
        user_id: fields.get(USER_ID).and_then(string).map(ToOwned::to_owned),
    })
}

fn required_string(fields: &Map<String, Value>, key: &str) -> Result<String, String> {
    fields
        .get(key)
        .and_then(string)
        .map(ToOwned::to_owned)
        .ok_or_else(|| format!("field {key} missing or not a string"))
}

fn decode_ingredients(value: &Value) -> Result<Vec<Ingredient>, String> {
    let Some(values) = value
        .get("arrayValue")
        .ok_or("ingredients is not an array")?
        .get("values")
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    values
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let fields = entry
                .get("mapValue")
                .and_then(|map| map.get("fields"))
                .and_then(Value::as_object)
                .ok_or_else(|| format!("ingredient {index} is not a map"))?;
            let name = fields.get("name").and_then(string).unwrap_or_default();
            let quantity = fields.get("quantity").and_then(string).unwrap_or_default();
            Ok(Ingredient::new(name, quantity))
        })
        .collect()
}

fn string(value: &Value) -> Option<&str> {
    value.get("stringValue").and_then(Value::as_str)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.get("timestampValue").and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}
