//! Mealmap Pipeline - Recipe indexing and retrieval orchestration
//!
//! Wires the embedding and index capabilities together:
//! - [`RecipeIndexingPipeline`] walks the catalog, embeds recipes that have
//!   no persisted vector yet, and loads the index.
//! - [`RecipeRetriever`] answers similarity queries for suggestion and
//!   substitution features, with a query embedding cache in front.

use std::sync::Arc;

use mealmap_core::{Embedder, RecipeCatalog, Result, SimilarityIndex};
use mealmap_embed::build_embedding_text;

pub mod cache;
pub mod retriever;

pub use cache::{CacheStats, CacheStatsReport, EmbeddingCache};
pub use retriever::RecipeRetriever;

// ============================================================================
// Indexing Pipeline
// ============================================================================

/// Batch pipeline that embeds and indexes recipes lacking a vector
///
/// Capabilities are injected; the pipeline owns no state beyond the handles,
/// so it is cheap to construct per run. Work is sequential with one recipe
/// per step: dropping the returned future between recipes leaves the catalog
/// and index consistent, with partial progress picked up by the next run.
pub struct RecipeIndexingPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
}

impl RecipeIndexingPipeline {
    /// Create a pipeline over the given embedder and index
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn SimilarityIndex>) -> Self {
        Self { embedder, index }
    }

    /// Embed and index every recipe lacking a persisted vector
    ///
    /// Returns the number of recipes newly embedded. Recipes that already
    /// carry a non-empty vector are skipped, so repeated runs converge
    /// without re-embedding; a recipe whose text changed after its first
    /// embedding is NOT re-embedded here (re-embedding on edit is the
    /// caller's concern). A persistence failure for one recipe logs a
    /// warning and skips it; the run continues and a later run retries it.
    pub async fn index_missing(&self, catalog: &dyn RecipeCatalog) -> Result<usize> {
        let recipes = catalog.list_recipes().await?;
        let total = recipes.len();
        let mut indexed = 0;
        let mut failed = 0;

        for recipe in recipes {
            if recipe.has_embedding() {
                continue;
            }

            let text = build_embedding_text(&recipe);
            let vector = self.embedder.embed(&text);

            // Persist first; the index only sees vectors the catalog kept.
            if let Err(e) = catalog.save_embedding(recipe.id, &vector).await {
                tracing::warn!(recipe_id = %recipe.id, error = %e, "skipping recipe, embedding not persisted");
                failed += 1;
                continue;
            }
            self.index.store(recipe.id, vector)?;
            indexed += 1;
        }

        tracing::info!(total, indexed, failed, "recipe indexing run complete");
        Ok(indexed)
    }

    /// Load already-persisted embeddings into the index without re-embedding
    ///
    /// Run once at startup so a fresh process serves queries over the full
    /// catalog. Returns the number of vectors loaded.
    pub async fn warm_index(&self, catalog: &dyn RecipeCatalog) -> Result<usize> {
        let recipes = catalog.list_recipes().await?;
        let mut loaded = 0;

        for recipe in recipes {
            if let Some(vector) = recipe.embedding.filter(|v| !v.is_empty()) {
                self.index.store(recipe.id, vector)?;
                loaded += 1;
            }
        }

        tracing::info!(loaded, "warmed vector index from catalog");
        Ok(loaded)
    }

    /// The embedder this pipeline runs
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// The index this pipeline fills
    pub fn index(&self) -> &Arc<dyn SimilarityIndex> {
        &self.index
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mealmap_core::{InMemoryCatalog, MealmapError, Recipe};
    use mealmap_embed::HashingEmbedder;
    use mealmap_index::InMemoryVectorIndex;
    use uuid::Uuid;

    fn pipeline(dimension: usize) -> RecipeIndexingPipeline {
        RecipeIndexingPipeline::new(
            Arc::new(HashingEmbedder::new(dimension)),
            Arc::new(InMemoryVectorIndex::new()),
        )
    }

    #[tokio::test]
    async fn test_index_missing_embeds_all_new_recipes() {
        let catalog = InMemoryCatalog::with_recipes([
            Recipe::new("Vegetarian Pasta").with_cuisine("italian"),
            Recipe::new("Grilled Steak"),
        ]);
        let pipeline = pipeline(64);

        let indexed = pipeline.index_missing(&catalog).await.unwrap();
        assert_eq!(indexed, 2);
        assert_eq!(pipeline.index().len(), 2);

        // Every recipe now carries a unit-length persisted vector
        for recipe in catalog.list_recipes().await.unwrap() {
            let vector = recipe.embedding.unwrap();
            let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[tokio::test]
    async fn test_index_missing_is_idempotent() {
        let catalog = InMemoryCatalog::with_recipes([Recipe::new("Ramen"), Recipe::new("Pho")]);
        let pipeline = pipeline(64);

        assert_eq!(pipeline.index_missing(&catalog).await.unwrap(), 2);
        assert_eq!(pipeline.index_missing(&catalog).await.unwrap(), 0);
        assert_eq!(pipeline.index().len(), 2);
    }

    #[tokio::test]
    async fn test_index_missing_skips_preembedded_recipes() {
        let mut seeded = Recipe::new("Old Favorite");
        seeded.embedding = Some(vec![1.0; 64]);
        let fresh = Recipe::new("New Arrival");
        let fresh_id = fresh.id;
        let catalog = InMemoryCatalog::with_recipes([seeded, fresh]);
        let pipeline = pipeline(64);

        assert_eq!(pipeline.index_missing(&catalog).await.unwrap(), 1);

        let fresh = catalog.get_recipe(fresh_id).await.unwrap().unwrap();
        assert!(fresh.has_embedding());
    }

    #[tokio::test]
    async fn test_warm_index_loads_persisted_vectors_only() {
        let mut seeded = Recipe::new("Seeded");
        seeded.embedding = Some(vec![0.6, 0.8]);
        let catalog = InMemoryCatalog::with_recipes([seeded, Recipe::new("Unindexed")]);
        let pipeline = pipeline(2);

        let loaded = pipeline.warm_index(&catalog).await.unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(pipeline.index().len(), 1);
    }

    /// Catalog whose persistence always fails, for skip-path coverage
    struct BrokenCatalog {
        inner: InMemoryCatalog,
    }

    #[async_trait]
    impl mealmap_core::RecipeCatalog for BrokenCatalog {
        async fn list_recipes(&self) -> mealmap_core::Result<Vec<Recipe>> {
            self.inner.list_recipes().await
        }

        async fn get_recipe(&self, id: Uuid) -> mealmap_core::Result<Option<Recipe>> {
            self.inner.get_recipe(id).await
        }

        async fn save_embedding(&self, _id: Uuid, _vector: &[f32]) -> mealmap_core::Result<()> {
            Err(MealmapError::CatalogError("write refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_recipe_but_run_continues() {
        let catalog = BrokenCatalog {
            inner: InMemoryCatalog::with_recipes([Recipe::new("Soup"), Recipe::new("Stew")]),
        };
        let pipeline = pipeline(64);

        let indexed = pipeline.index_missing(&catalog).await.unwrap();
        assert_eq!(indexed, 0);
        // Failed persists never reach the index
        assert!(pipeline.index().is_empty());
    }

    #[tokio::test]
    async fn test_indexed_recipe_is_its_own_nearest_neighbor() {
        let recipe = Recipe::new("Spicy Thai Basil Chicken").with_cuisine("thai");
        let id = recipe.id;
        let catalog = InMemoryCatalog::with_recipes([recipe]);
        let pipeline = pipeline(128);

        pipeline.index_missing(&catalog).await.unwrap();

        let stored = catalog.get_recipe(id).await.unwrap().unwrap();
        let results = pipeline
            .index()
            .search(stored.embedding.as_ref().unwrap(), 1)
            .unwrap();
        assert_eq!(results[0].recipe_id, id);
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }
}
