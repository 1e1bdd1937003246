// ABOUTME: Integration tests for the recipe book facade and its online/offline state machine
// ABOUTME: Covers validation, local CRUD, seeding, delete confirmation, and the one-way degrade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, offline_recipe, sample_draft, RecordingView, ScriptedRemote};
use recipe_box::book::{RecipeBook, StoreMode};
use recipe_box::errors::{RemoteOperation, StoreError, ValidationError};
use recipe_box::models::{Ingredient, RecipeDraft};
use recipe_box::stores::{KeyValueStorage, LocalRecipeStore, MemoryStorage};
use std::sync::Arc;

fn local_book() -> (RecipeBook<RecordingView>, LocalRecipeStore) {
    init_test_logging();
    let local = LocalRecipeStore::in_memory();
    (RecipeBook::new(None, local.clone(), RecordingView::new()), local)
}

fn remote_book(remote: &ScriptedRemote) -> (RecipeBook<RecordingView>, LocalRecipeStore) {
    init_test_logging();
    let local = LocalRecipeStore::in_memory();
    (
        RecipeBook::new(remote.boxed(), local.clone(), RecordingView::new()),
        local,
    )
}

// ============================================================================
// Start-up
// ============================================================================

#[tokio::test]
async fn test_first_run_seeds_example_recipe() {
    let (mut book, local) = local_book();

    assert_eq!(book.mode(), StoreMode::Uninitialized);
    assert_eq!(book.start().await, StoreMode::LocalActive);

    let recipes = book.get_all();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Spaghetti Bolognese");
    assert_eq!(recipes[0].ingredient_count(), 8);
    assert_eq!(recipes[0].id, "1");

    // The seed is persisted immediately
    assert_eq!(local.load(), recipes.to_vec());
    assert_eq!(book.view().renders.len(), 1);
}

#[tokio::test]
async fn test_probe_success_loads_remote_collection() {
    let remote = ScriptedRemote::with_rows(vec![offline_recipe("7", "Remote Soup")]);
    let (mut book, _) = remote_book(&remote);

    assert_eq!(book.start().await, StoreMode::RemoteActive);
    assert!(!book.is_offline());
    assert_eq!(book.get_all().len(), 1);
    assert_eq!(book.get("7").unwrap().title, "Remote Soup");
    assert_eq!(remote.calls(), vec![RemoteOperation::Probe, RemoteOperation::List]);
    assert!(book.view().errors.is_empty());
}

#[tokio::test]
async fn test_probe_failure_falls_back_silently() {
    let remote = ScriptedRemote::new().failing_probe();
    let (mut book, _) = remote_book(&remote);

    assert_eq!(book.start().await, StoreMode::LocalActive);
    assert_eq!(book.get_all()[0].title, "Spaghetti Bolognese");
    assert_eq!(remote.calls(), vec![RemoteOperation::Probe]);
    assert!(book.view().errors.is_empty());
}

#[tokio::test]
async fn test_initial_list_failure_alerts_and_falls_back() {
    let remote = ScriptedRemote::new().failing_list();
    let (mut book, _) = remote_book(&remote);

    assert_eq!(book.start().await, StoreMode::LocalActive);
    assert_eq!(
        book.view().errors,
        vec!["Failed to load recipes from the database. Switching to offline mode.".to_owned()]
    );
    assert_eq!(book.get_all().len(), 1);
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let remote = ScriptedRemote::new();
    let (mut book, _) = remote_book(&remote);

    book.start().await;
    book.start().await;
    assert_eq!(remote.calls().len(), 2);
}

#[tokio::test]
async fn test_operations_start_the_session() {
    let (mut book, _) = local_book();

    book.create(&sample_draft("Bread")).await.unwrap();
    assert_eq!(book.mode(), StoreMode::LocalActive);
    assert_eq!(book.get_all().len(), 2);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_drafts_touch_no_store() {
    let remote = ScriptedRemote::new();
    let (mut book, _) = remote_book(&remote);
    book.start().await;
    let before = book.get_all().to_vec();

    let cases = [
        (
            RecipeDraft::new("  ", "Stir.", vec![Ingredient::new("Salt", "1g")]),
            ValidationError::MissingTitle,
            "Please fill in all required fields.",
        ),
        (
            RecipeDraft::new("Soup", "", vec![Ingredient::new("Salt", "1g")]),
            ValidationError::MissingMethod,
            "Please fill in all required fields.",
        ),
        (
            RecipeDraft::new("Soup", "Stir.", Vec::new()),
            ValidationError::NoIngredients,
            "Please add at least one ingredient.",
        ),
        (
            RecipeDraft::new(
                "Soup",
                "Stir.",
                vec![Ingredient::new("Salt", "1g"), Ingredient::new("Pepper", " ")],
            ),
            ValidationError::IncompleteIngredient { index: 1 },
            "Every ingredient needs a name and a quantity.",
        ),
    ];

    for (draft, expected, message) in cases {
        match book.create(&draft).await {
            Err(StoreError::Validation(error)) => assert_eq!(error, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
        match book.update("1", &draft).await {
            Err(StoreError::Validation(error)) => assert_eq!(error, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(book.view().errors.last().unwrap(), message);
    }

    assert_eq!(book.get_all(), before.as_slice());
    assert_eq!(remote.calls(), vec![RemoteOperation::Probe, RemoteOperation::List]);
    assert_eq!(book.mode(), StoreMode::RemoteActive);
}

// ============================================================================
// Local mode
// ============================================================================

#[tokio::test]
async fn test_local_create_assigns_fresh_ids_and_persists() {
    let (mut book, local) = local_book();
    book.start().await;

    let first = book.create(&sample_draft("Bread")).await.unwrap();
    let second = book.create(&sample_draft("Buns")).await.unwrap();

    assert!(first.id.starts_with("recipe_"));
    assert_ne!(first.id, second.id);
    assert_eq!(book.get_all().len(), 3);
    assert_eq!(local.load(), book.get_all().to_vec());
}

#[tokio::test]
async fn test_create_round_trip_trims_input() {
    let (mut book, _) = local_book();
    book.start().await;

    let draft = RecipeDraft::new(
        "  Pancakes ",
        "Whisk and fry.\n",
        vec![Ingredient::new(" Flour", "100g ")],
    );
    let created = book.create(&draft).await.unwrap();

    let fetched = book.get(&created.id).unwrap();
    assert_eq!(fetched.title, "Pancakes");
    assert_eq!(fetched.method, "Whisk and fry.");
    assert_eq!(fetched.ingredients, vec![Ingredient::new("Flour", "100g")]);
    assert!(fetched.created_at.is_some());
}

#[tokio::test]
async fn test_get_all_is_stable_without_mutation() {
    let (mut book, _) = local_book();
    book.start().await;
    book.create(&sample_draft("Bread")).await.unwrap();

    let first = book.get_all().to_vec();
    let second = book.get_all().to_vec();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_local_update_keeps_id_and_created_at() {
    let (mut book, local) = local_book();
    book.start().await;
    let seed = book.get("1").unwrap().clone();

    let updated = book
        .update("1", &sample_draft("Spaghetti Carbonara"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, "1");
    assert_eq!(updated.created_at, seed.created_at);
    assert!(updated.updated_at.is_some());
    assert_eq!(local.load()[0].title, "Spaghetti Carbonara");
}

#[tokio::test]
async fn test_local_update_of_unknown_id_is_noop() {
    let (mut book, local) = local_book();
    book.start().await;
    let renders = book.view().renders.len();

    let outcome = book.update("missing", &sample_draft("Ghost")).await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(book.get_all().len(), 1);
    assert_eq!(local.load().len(), 1);
    assert_eq!(book.view().renders.len(), renders);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_entry_from_memory_and_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let local = LocalRecipeStore::new(storage.clone());
    local
        .save_all(&[
            offline_recipe("1", "Bolognese"),
            offline_recipe("recipe_1700000000000", "Toast"),
            offline_recipe("recipe_1700000000001", "Jam"),
        ])
        .unwrap();
    let mut book = RecipeBook::new(None, local.clone(), RecordingView::new());
    book.start().await;

    let removed = book.delete("recipe_1700000000000").await.unwrap();

    assert_eq!(removed.title, "Toast");
    let ids: Vec<_> = book.get_all().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["1", "recipe_1700000000001"]);
    assert_eq!(local.load().len(), 2);
    assert!(!storage
        .get_item("myRecipes")
        .unwrap()
        .unwrap()
        .contains("recipe_1700000000000"));
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let remote = ScriptedRemote::new();
    let (mut book, _) = remote_book(&remote);
    book.start().await;

    assert!(book.delete("nope").await.is_none());
    assert!(book.request_delete("nope").await.unwrap().is_none());
    assert_eq!(remote.calls().len(), 2);
    assert!(book.view().confirmations.is_empty());
}

#[tokio::test]
async fn test_declined_confirmation_changes_nothing() {
    let local = LocalRecipeStore::in_memory();
    let mut book = RecipeBook::new(None, local.clone(), RecordingView::declining());
    book.start().await;

    match book.request_delete("1").await {
        Err(StoreError::ConfirmationDeclined { recipe_id }) => assert_eq!(recipe_id, "1"),
        other => panic!("expected declined confirmation, got {other:?}"),
    }
    assert_eq!(book.get_all().len(), 1);
    assert_eq!(local.load().len(), 1);
    assert_eq!(book.view().confirmations, vec!["1".to_owned()]);
}

#[tokio::test]
async fn test_confirmed_delete() {
    let (mut book, local) = local_book();
    book.start().await;

    let removed = book.request_delete("1").await.unwrap().unwrap();
    assert_eq!(removed.id, "1");
    assert!(book.get_all().is_empty());
    // An emptied collection stays empty; the seed only appears on first run
    assert!(local.load().is_empty());
}

// ============================================================================
// Remote mode and degrade
// ============================================================================

#[tokio::test]
async fn test_remote_writes_follow_server_records() {
    let remote = ScriptedRemote::new();
    let (mut book, local) = remote_book(&remote);
    book.start().await;

    let created = book.create(&sample_draft("Bread")).await.unwrap();
    assert_eq!(created.id, "100");
    assert_eq!(book.get_all(), remote.rows().as_slice());

    book.update("100", &sample_draft("Rye Bread")).await.unwrap();
    assert_eq!(book.get("100").unwrap().title, "Rye Bread");

    book.delete("100").await.unwrap();
    assert!(book.get_all().is_empty());
    assert!(remote.rows().is_empty());

    // Nothing was written locally while online
    let storage_untouched = local.load();
    assert_eq!(storage_untouched.len(), 1);
    assert_eq!(storage_untouched[0].title, "Spaghetti Bolognese");
}

#[tokio::test]
async fn test_remote_create_keeps_newest_first_order() {
    let remote = ScriptedRemote::with_rows(vec![offline_recipe("9", "Stew")]).listing_newest_first();
    let (mut book, _) = remote_book(&remote);
    book.start().await;

    book.create(&sample_draft("Bread")).await.unwrap();
    book.create(&sample_draft("Buns")).await.unwrap();

    let titles: Vec<_> = book.get_all().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Buns", "Bread", "Stew"]);
    assert_eq!(book.get_all(), remote.rows().as_slice());
}

#[tokio::test]
async fn test_remote_create_appends_for_server_ordered_store() {
    let remote = ScriptedRemote::with_rows(vec![offline_recipe("9", "Stew")]);
    let (mut book, _) = remote_book(&remote);
    book.start().await;

    book.create(&sample_draft("Bread")).await.unwrap();

    let titles: Vec<_> = book.get_all().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Stew", "Bread"]);
}

#[tokio::test]
async fn test_remote_update_of_recipe_added_elsewhere_joins_collection() {
    let remote = ScriptedRemote::new();
    let (mut book, _) = remote_book(&remote);
    book.start().await;
    remote.add_row(offline_recipe("77", "Curry"));

    let updated = book
        .update("77", &sample_draft("Green Curry"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Green Curry");
    assert_eq!(book.get("77").unwrap().title, "Green Curry");
    assert_eq!(book.get_all(), remote.rows().as_slice());
    assert_eq!(book.view().last_render().unwrap().len(), 1);
}

#[tokio::test]
async fn test_degraded_update_of_unknown_recipe_changes_nothing() {
    let remote = ScriptedRemote::with_rows(vec![offline_recipe("9", "Stew")]).fail_on_write(1);
    let (mut book, local) = remote_book(&remote);
    book.start().await;
    let renders_before = book.view().renders.len();

    let outcome = book.update("ghost", &sample_draft("Ghost")).await.unwrap();

    assert!(outcome.is_none());
    assert!(book.is_offline());
    assert_eq!(book.view().errors.len(), 1);
    assert_eq!(book.view().renders.len(), renders_before);
    let titles: Vec<_> = book.get_all().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Stew"]);
    // No snapshot was written, so the local store still seeds on first load
    assert_eq!(local.load()[0].title, "Spaghetti Bolognese");
}

#[tokio::test]
async fn test_third_write_failure_degrades_for_the_rest_of_the_session() {
    let remote = ScriptedRemote::new().fail_on_write(3);
    let (mut book, local) = remote_book(&remote);
    book.start().await;

    book.create(&sample_draft("One")).await.unwrap();
    book.create(&sample_draft("Two")).await.unwrap();
    assert_eq!(book.mode(), StoreMode::RemoteActive);

    // Third write fails remotely and is replayed locally
    let third = book.create(&sample_draft("Three")).await.unwrap();
    assert!(book.is_offline());
    assert!(third.id.starts_with("recipe_"));
    assert_eq!(
        book.view().errors,
        vec!["Failed to save recipe to database. Switching to offline mode.".to_owned()]
    );
    let titles: Vec<_> = local.load().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);

    // The remote would succeed now, but is never called again
    let calls_before = remote.calls().len();
    book.create(&sample_draft("Four")).await.unwrap();
    book.update(&third.id, &sample_draft("Three bis")).await.unwrap();
    book.delete("100").await.unwrap();
    assert_eq!(remote.calls().len(), calls_before);
    assert_eq!(book.mode(), StoreMode::LocalActive);

    let titles: Vec<_> = local.load().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Two", "Three bis", "Four"]);
}

#[tokio::test]
async fn test_failed_remote_update_is_replayed_locally() {
    let remote = ScriptedRemote::with_rows(vec![offline_recipe("9", "Stew")]).fail_on_write(1);
    let (mut book, local) = remote_book(&remote);
    book.start().await;

    let updated = book
        .update("9", &sample_draft("Beef Stew"))
        .await
        .unwrap()
        .unwrap();

    assert!(book.is_offline());
    assert_eq!(updated.id, "9");
    assert_eq!(local.load()[0].title, "Beef Stew");
    assert_eq!(remote.rows()[0].title, "Stew");
}

#[tokio::test]
async fn test_failed_remote_delete_is_replayed_locally() {
    let remote = ScriptedRemote::with_rows(vec![
        offline_recipe("9", "Stew"),
        offline_recipe("10", "Salad"),
    ])
    .fail_on_write(1);
    let (mut book, local) = remote_book(&remote);
    book.start().await;

    let removed = book.delete("9").await.unwrap();

    assert_eq!(removed.title, "Stew");
    assert!(book.is_offline());
    assert_eq!(
        book.view().errors,
        vec!["Failed to delete recipe from database. Switching to offline mode.".to_owned()]
    );
    let ids: Vec<_> = local.load().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["10"]);
    assert_eq!(remote.rows().len(), 2);
}

#[tokio::test]
async fn test_render_follows_every_successful_change() {
    let (mut book, _) = local_book();
    book.start().await;
    book.create(&sample_draft("Bread")).await.unwrap();
    book.delete("1").await.unwrap();

    let view = book.view();
    assert_eq!(view.renders.len(), 3);
    assert_eq!(view.last_render().unwrap().len(), 1);
    assert_eq!(view.last_render().unwrap()[0].title, "Bread");
}
