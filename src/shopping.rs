//! Shopping list aggregation across the selected menu.

use std::collections::HashMap;

use serde::Serialize;

use crate::recipe::Recipe;
use crate::scaling::{self, ScalingError};

/// Serving count assumed when a selection does not specify one.
pub const DEFAULT_SERVINGS: u32 = 4;

/// One recipe in the menu, with an optional per-recipe serving override.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub recipe: &'a Recipe,
    pub servings: Option<u32>,
}

impl<'a> Selection<'a> {
    pub fn new(recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            servings: None,
        }
    }

    pub fn with_servings(recipe: &'a Recipe, servings: u32) -> Self {
        Self {
            recipe,
            servings: Some(servings),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Merges the scaled ingredient requirements of every selection into one
/// list. Entries are keyed by (lowercased trimmed name, unit); same name in
/// different units stays as separate lines. Result order is unspecified.
pub fn aggregate(selections: &[Selection<'_>]) -> Result<Vec<ShoppingItem>, ScalingError> {
    let mut totals: HashMap<(String, String), f64> = HashMap::new();

    for selection in selections {
        let recipe = selection.recipe;
        let servings = selection.servings.unwrap_or(DEFAULT_SERVINGS);
        for ingredient in &recipe.ingredients {
            let scaled = scaling::scale(ingredient, recipe.servings_base, servings)?;
            let key = (ingredient.normalized_name(), scaled.unit);
            *totals.entry(key).or_insert(0.0) += scaled.amount;
        }
    }

    Ok(totals
        .into_iter()
        .map(|((name, unit), amount)| ShoppingItem { name, amount, unit })
        .collect())
}

/// Display-only unit up-conversion, applied once after aggregation so
/// merging always happens on the original units.
pub fn upconvert_units(items: &mut [ShoppingItem]) {
    for item in items.iter_mut() {
        if item.amount >= 1000.0 {
            match item.unit.as_str() {
                "g" => {
                    item.amount /= 1000.0;
                    item.unit = "kg".to_string();
                }
                "ml" => {
                    item.amount /= 1000.0;
                    item.unit = "L".to_string();
                }
                _ => {}
            }
        }
    }
}
