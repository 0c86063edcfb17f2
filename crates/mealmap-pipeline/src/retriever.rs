//! Similarity retrieval for suggestion features
//!
//! Query side of the engine: free text or an existing recipe goes in,
//! ranked recipe ids come out. The surrounding application resolves ids to
//! full recipe details.

use std::sync::Arc;

use mealmap_core::{Embedder, Recipe, Result, RetrievalConfig, ScoredRecipe, SimilarityIndex};
use mealmap_embed::build_embedding_text;

use crate::cache::EmbeddingCache;

/// Retrieval front-end over the embedder and index
pub struct RecipeRetriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn SimilarityIndex>,
    cache: EmbeddingCache,
    config: RetrievalConfig,
}

impl RecipeRetriever {
    /// Create a retriever with default retrieval configuration
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn SimilarityIndex>) -> Self {
        Self::with_config(embedder, index, RetrievalConfig::default())
    }

    /// Create a retriever with explicit retrieval configuration
    pub fn with_config(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn SimilarityIndex>,
        config: RetrievalConfig,
    ) -> Self {
        let cache = EmbeddingCache::with_config(&config);
        Self {
            embedder,
            index,
            cache,
            config,
        }
    }

    /// Recipes most similar to a free-text query
    ///
    /// The query embedding is cached, so repeated queries skip the embed
    /// step. Results below the configured `min_score` are dropped.
    pub fn similar_to_text(&self, text: &str, top_n: usize) -> Result<Vec<ScoredRecipe>> {
        let query = match self.cache.get(text) {
            Some(cached) => cached,
            None => self.cache.put(text, self.embedder.embed(text)),
        };

        let mut results = self.index.search(&query, top_n)?;
        results.retain(|r| r.score >= self.config.min_score);
        tracing::debug!(top_n, returned = results.len(), "text similarity query");
        Ok(results)
    }

    /// Recipes most similar to an existing recipe, excluding itself
    ///
    /// Uses the recipe's persisted embedding when present; otherwise the
    /// embedding text is rebuilt and embedded on the fly.
    pub fn similar_to_recipe(&self, recipe: &Recipe, top_n: usize) -> Result<Vec<ScoredRecipe>> {
        let query = match recipe.embedding.as_ref().filter(|v| !v.is_empty()) {
            Some(vector) => vector.clone(),
            None => self.embedder.embed(&build_embedding_text(recipe)),
        };

        // Over-fetch by one so dropping the seed still fills top_n.
        let mut results = self.index.search(&query, top_n.saturating_add(1))?;
        results.retain(|r| r.recipe_id != recipe.id && r.score >= self.config.min_score);
        results.truncate(top_n);
        Ok(results)
    }

    /// Cache statistics for the query embedding cache
    pub fn cache_stats(&self) -> crate::cache::CacheStatsReport {
        self.cache.stats().report()
    }
}

// ============================================================================
// Tests
// ============================================================================
