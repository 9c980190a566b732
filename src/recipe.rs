//! Recipe data model and the built-in catalog.
//!
//! The catalog is immutable reference data: it is parsed once from the
//! embedded JSON and never mutated by the core.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown recipe id: {0}")]
    UnknownRecipe(String),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "No se han podido cargar las recetas.",
            Self::UnknownRecipe(_) => "No encuentro esa receta.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Aperitivos")]
    Aperitivo,
    #[serde(rename = "Primeros")]
    Primero,
    #[serde(rename = "Segundos")]
    Segundo,
    #[serde(rename = "Postres")]
    Postre,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Aperitivo => "Aperitivos",
            Self::Primero => "Primeros",
            Self::Segundo => "Segundos",
            Self::Postre => "Postres",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Fácil")]
    Facil,
    #[serde(rename = "Media")]
    Media,
    #[serde(rename = "Difícil")]
    Dificil,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Facil => "Fácil",
            Self::Media => "Media",
            Self::Dificil => "Difícil",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Ingredient {
    /// Identity used for aggregation: lowercased, trimmed name.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub order: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image_url: String,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub difficulty: Difficulty,
    pub servings_base: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last_step_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/recipes.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(raw)?;
        Ok(Self { recipes })
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The embedded sample catalog. Parsed on first use; a malformed embed
    /// logs an error and yields an empty catalog instead of panicking.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| match Catalog::from_json(BUILTIN_CATALOG_JSON) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to parse built-in catalog: {e}");
                Catalog::default()
            }
        })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&Recipe, CatalogError> {
        self.find(id)
            .ok_or_else(|| CatalogError::UnknownRecipe(id.to_string()))
    }

    /// Case-insensitive search over titles and tags, with an optional exact
    /// tag filter on top.
    pub fn search(&self, term: &str, tag_filter: Option<&str>) -> Vec<&Recipe> {
        let needle = term.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| {
                let matches_term = needle.is_empty()
                    || r.title.to_lowercase().contains(&needle)
                    || r.tags.iter().any(|t| t.contains(&needle));
                let matches_tag = tag_filter.is_none_or(|tag| r.tags.iter().any(|t| t == tag));
                matches_term && matches_tag
            })
            .collect()
    }
}
