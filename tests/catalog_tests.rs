use navidad_mesa_lib::recipe::{Catalog, CatalogError, Category};

#[test]
fn builtin_catalog_parses_and_is_not_empty() {
    let catalog = Catalog::builtin();
    assert!(!catalog.recipes().is_empty());
    for recipe in catalog.recipes() {
        assert!(recipe.servings_base > 0, "recipe {}", recipe.id);
        assert!(!recipe.steps.is_empty(), "recipe {}", recipe.id);
        assert!(!recipe.ingredients.is_empty(), "recipe {}", recipe.id);
    }
}

#[test]
fn finds_recipes_by_id() {
    let catalog = Catalog::builtin();
    let recipe = catalog.get("tarta-de-turron").unwrap();
    assert_eq!(recipe.category, Category::Postre);
    assert!(matches!(
        catalog.get("inexistente"),
        Err(CatalogError::UnknownRecipe(_))
    ));
}

#[test]
fn search_matches_titles_case_insensitively() {
    let catalog = Catalog::builtin();
    let hits = catalog.search("TURRÓN", None);
    assert!(hits.iter().any(|r| r.id == "tarta-de-turron"));
}

#[test]
fn search_matches_tags() {
    let catalog = Catalog::builtin();
    let hits = catalog.search("marisco", None);
    assert!(hits.len() >= 2);
}

#[test]
fn tag_filter_narrows_results() {
    let catalog = Catalog::builtin();
    let all = catalog.search("", None);
    let baked = catalog.search("", Some("horno"));
    assert!(baked.len() < all.len());
    assert!(baked.iter().all(|r| r.tags.iter().any(|t| t == "horno")));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(
        Catalog::from_json("{ not json"),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn steps_round_trip_through_json() {
    let catalog = Catalog::builtin();
    let recipe = catalog.get("crema-de-marisco").unwrap();
    let raw = serde_json::to_string(recipe).unwrap();
    let restored: navidad_mesa_lib::recipe::Recipe = serde_json::from_str(&raw).unwrap();
    assert_eq!(&restored, recipe);
}
