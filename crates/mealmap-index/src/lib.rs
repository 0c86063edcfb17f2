//! Mealmap Index - In-memory cosine similarity index
//!
//! Stores `id -> vector` pairs behind a coarse read-write lock and answers
//! top-N similarity queries by scanning every entry. Vectors are assumed
//! unit-length on the way in (the embedder guarantees it), so the score is
//! a plain dot product and the index never re-normalizes at query time.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use mealmap_core::{MealmapError, Result, ScoredRecipe, SimilarityIndex};

/// Dot product of two equal-length vectors
///
/// Equals cosine similarity when both vectors are unit-length.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// In-memory vector index
///
/// A coarse `RwLock` around the entry map: searches take a read lock for
/// the whole scan-and-rank, so each search observes a consistent snapshot;
/// stores take the write lock for a single insert. Construct one per
/// process and hand callers an `Arc<dyn SimilarityIndex>` — there is no
/// hidden global.
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    entries: RwLock<HashMap<Uuid, Vec<f32>>>,
}

impl InMemoryVectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimilarityIndex for InMemoryVectorIndex {
    fn store(&self, id: Uuid, vector: Vec<f32>) -> Result<()> {
        if vector.is_empty() {
            return Err(MealmapError::InvalidArgument(
                "vector must not be empty".to_string(),
            ));
        }

        let mut entries = self.entries.write().expect("index lock poisoned");
        entries.insert(id, vector);
        Ok(())
    }

    fn search(&self, query: &[f32], top_n: usize) -> Result<Vec<ScoredRecipe>> {
        if query.is_empty() {
            return Err(MealmapError::InvalidArgument(
                "query vector must not be empty".to_string(),
            ));
        }
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().expect("index lock poisoned");

        let mut scored = Vec::with_capacity(entries.len());
        for (id, vector) in entries.iter() {
            if vector.len() != query.len() {
                return Err(MealmapError::DimensionMismatch {
                    expected: vector.len(),
                    actual: query.len(),
                });
            }
            scored.push(ScoredRecipe::new(*id, dot(query, vector)));
        }

        // Descending score; ascending id breaks ties so equal-score results
        // come back in the same order every run.
        scored.sort_unstable_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.recipe_id.cmp(&b.recipe_id))
        });
        scored.truncate(top_n);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.entries.read().expect("index lock poisoned").len()
    }

    fn clear(&self) {
        let mut entries = self.entries.write().expect("index lock poisoned");
        let removed = entries.len();
        entries.clear();
        if removed > 0 {
            tracing::debug!(removed, "cleared vector index");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
