//! Recipe text assembly
//!
//! Builds the single text blob a recipe is embedded from. The embedder is a
//! bag-of-tokens hash, so field importance is expressed as repetition: a
//! field repeated three times holds three times the term-frequency mass of
//! a field appended once.

use mealmap_core::Recipe;

/// Repetitions for the recipe title
const TITLE_WEIGHT: usize = 3;
/// Repetitions for the cuisine
const CUISINE_WEIGHT: usize = 2;

/// Assemble the weighted embedding text for a recipe
///
/// Order is fixed: title ×3, cuisine ×2, dietary tags, summary. Fields that
/// are absent or blank contribute nothing.
pub fn build_embedding_text(recipe: &Recipe) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(title) = non_blank(recipe.title.as_deref()) {
        for _ in 0..TITLE_WEIGHT {
            parts.push(title);
        }
    }

    if let Some(cuisine) = non_blank(recipe.cuisine.as_deref()) {
        for _ in 0..CUISINE_WEIGHT {
            parts.push(cuisine);
        }
    }

    for tag in &recipe.dietary_tags {
        if let Some(tag) = non_blank(Some(tag)) {
            parts.push(tag);
        }
    }

    if let Some(summary) = non_blank(recipe.summary.as_deref()) {
        parts.push(summary);
    }

    parts.join(" ")
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_recipe_text() {
        let recipe = Recipe::new("Pad Thai")
            .with_cuisine("thai")
            .with_tag("gluten-free")
            .with_tag("nut-free")
            .with_summary("Stir-fried rice noodles");

        assert_eq!(
            build_embedding_text(&recipe),
            "Pad Thai Pad Thai Pad Thai thai thai gluten-free nut-free Stir-fried rice noodles"
        );
    }

    #[test]
    fn test_blank_fields_contribute_nothing() {
        let mut recipe = Recipe::new("Toast");
        recipe.cuisine = Some("   ".to_string());
        recipe.summary = Some(String::new());
        recipe.dietary_tags = vec![" ".to_string()];

        assert_eq!(build_embedding_text(&recipe), "Toast Toast Toast");
    }

    #[test]
    fn test_empty_recipe_yields_empty_text() {
        let mut recipe = Recipe::new("x");
        recipe.title = None;

        assert_eq!(build_embedding_text(&recipe), "");
    }

    #[test]
    fn test_title_outweighs_summary() {
        use crate::HashingEmbedder;
        use mealmap_core::Embedder;

        let recipe = Recipe::new("basil").with_summary("chicken");
        let embedder = HashingEmbedder::new(128);
        let vector = embedder.embed(&build_embedding_text(&recipe));

        let basil = vector[embedder.slot("basil")];
        let chicken = vector[embedder.slot("chicken")];
        if embedder.slot("basil") != embedder.slot("chicken") {
            assert!(basil > chicken);
        }
    }
}
