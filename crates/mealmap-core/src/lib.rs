//! Mealmap Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used by the recipe suggestion
//! engine:
//! - Recipe domain model and scored search results
//! - Capability traits (`Embedder`, `SimilarityIndex`, `RecipeCatalog`)
//! - Common error types
//! - Configuration management

pub mod catalog;
pub mod config;

pub use catalog::{InMemoryCatalog, RecipeCatalog};
pub use config::{AppConfig, ConfigError, EmbeddingConfig, LoggingConfig, RetrievalConfig};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for mealmap operations
#[derive(Error, Debug)]
pub enum MealmapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MealmapError>;

// ============================================================================
// Recipe Domain Model
// ============================================================================

/// A recipe record as seen by the embedding engine
///
/// Only the fields that feed the embedding text plus the persisted vector
/// slot live here. Nutritional data, steps, and ingredient quantities stay
/// with the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,

    /// Recipe title
    pub title: Option<String>,

    /// Cuisine (e.g., "thai", "italian")
    pub cuisine: Option<String>,

    /// Dietary tags (e.g., "vegetarian", "gluten-free")
    pub dietary_tags: Vec<String>,

    /// Short free-text summary
    pub summary: Option<String>,

    /// Persisted embedding vector, absent until the recipe is indexed
    pub embedding: Option<Vec<f32>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            cuisine: None,
            dietary_tags: Vec::new(),
            summary: None,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the cuisine
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Add a dietary tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.dietary_tags.push(tag.into());
        self
    }

    /// Set the summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Whether this recipe already carries a non-empty persisted embedding
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|v| !v.is_empty())
    }
}

// ============================================================================
// Search Results
// ============================================================================

/// A recipe id paired with its similarity score against a query vector
///
/// Scores are cosine similarities; vectors in the index are unit-length, so
/// the score range is [-1, 1] and, for term-frequency embeddings, [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    /// Recipe identifier
    pub recipe_id: Uuid,

    /// Cosine similarity score (higher is better)
    pub score: f32,
}

impl ScoredRecipe {
    /// Create a new scored result
    pub fn new(recipe_id: Uuid, score: f32) -> Self {
        Self { recipe_id, score }
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Trait for text embedding providers
///
/// Embedding is total over all string inputs: blank or empty text embeds to
/// the all-zero vector, never an error. Implementations must be
/// deterministic across runs and processes.
pub trait Embedder: Send + Sync {
    /// Embed text into a fixed-dimension vector
    ///
    /// Non-empty output is L2-normalized to unit length so that dot product
    /// equals cosine similarity downstream.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Get the embedding dimension
    fn dimension(&self) -> usize;
}

/// Trait for vector similarity indexes
///
/// Implementations must be safe for concurrent `store`/`search` from
/// multiple callers; a search observes a consistent snapshot of the entries.
/// Vectors handed to `store` and `search` are assumed unit-length already;
/// the index never re-normalizes.
pub trait SimilarityIndex: Send + Sync {
    /// Insert or overwrite the vector for an id
    fn store(&self, id: Uuid, vector: Vec<f32>) -> Result<()>;

    /// Return up to `top_n` entries ranked by descending cosine similarity
    ///
    /// Ties on score break by ascending id so results are reproducible.
    /// `top_n == 0` yields an empty result set.
    fn search(&self, query: &[f32], top_n: usize) -> Result<Vec<ScoredRecipe>>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether the index holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries
    fn clear(&self);
}

// ============================================================================
// Tests
// ============================================================================
