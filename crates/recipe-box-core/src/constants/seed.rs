// ABOUTME: Example recipe written to local storage on first run
// ABOUTME: Gives new users a populated list before they add anything
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Identifier of the seeded recipe
pub const SEED_ID: &str = "1";

/// Title of the seeded recipe
pub const SEED_TITLE: &str = "Spaghetti Bolognese";

/// Method of the seeded recipe
pub const SEED_METHOD: &str = "Cook the spaghetti according to the package instructions. \
In a pan, heat some oil over medium heat. Add the onions and garlic, sauté until translucent. \
Add minced meat, cook until browned. Stir in tomato sauce, let simmer for 10 minutes. \
Season with salt and pepper. Serve sauce over pasta, garnish with basil leaves.";

/// Ingredients of the seeded recipe as (name, quantity)
pub const SEED_INGREDIENTS: [(&str, &str); 8] = [
    ("Spaghetti", "200g"),
    ("Minced Meat", "150g"),
    ("Tomato Sauce", "100ml"),
    ("Onion", "1"),
    ("Garlic Clove", "2"),
    ("Salt", "to taste"),
    ("Pepper", "to taste"),
    ("Basil Leaves", "for garnish"),
];
