//! Recipe catalog access
//!
//! The catalog is the engine's only external collaborator: it lists recipe
//! records and persists computed embeddings back onto them. The production
//! implementation lives with the application's database layer; the in-memory
//! implementation here backs tests and embedded use.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{MealmapError, Recipe, Result};

/// Trait for recipe catalog backends
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// List all recipes in the catalog
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;

    /// Fetch a single recipe by id
    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Persist an embedding onto a recipe record
    async fn save_embedding(&self, id: Uuid, vector: &[f32]) -> Result<()>;
}

/// In-memory recipe catalog
///
/// Backed by a coarse `RwLock`; suitable for tests and for running the
/// engine without a database wired in.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with recipes
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let map = recipes.into_iter().map(|r| (r.id, r)).collect();
        Self {
            recipes: RwLock::new(map),
        }
    }

    /// Insert or replace a recipe
    pub fn insert(&self, recipe: Recipe) {
        let mut recipes = self.recipes.write().expect("catalog lock poisoned");
        recipes.insert(recipe.id, recipe);
    }

    /// Number of recipes in the catalog
    pub fn len(&self) -> usize {
        self.recipes.read().expect("catalog lock poisoned").len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecipeCatalog for InMemoryCatalog {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes = self.recipes.read().expect("catalog lock poisoned");
        Ok(recipes.values().cloned().collect())
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>> {
        let recipes = self.recipes.read().expect("catalog lock poisoned");
        Ok(recipes.get(&id).cloned())
    }

    async fn save_embedding(&self, id: Uuid, vector: &[f32]) -> Result<()> {
        let mut recipes = self.recipes.write().expect("catalog lock poisoned");
        let recipe = recipes
            .get_mut(&id)
            .ok_or_else(|| MealmapError::CatalogError(format!("recipe not found: {id}")))?;

        recipe.embedding = Some(vector.to_vec());
        recipe.updated_at = chrono::Utc::now();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
