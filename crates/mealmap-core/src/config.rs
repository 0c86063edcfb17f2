//! Mealmap configuration management
//!
//! Handles configuration from environment variables and config files with
//! sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Embedding configuration
    pub embedding: EmbeddingConfig,

    /// Retrieval configuration
    pub retrieval: RetrievalConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dim) = std::env::var("EMBEDDING_DIMENSION") {
            config.embedding.dimension =
                dim.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "EMBEDDING_DIMENSION".to_string(),
                    value: dim,
                })?;
        }
        if let Ok(len) = std::env::var("MIN_TOKEN_LENGTH") {
            config.embedding.min_token_length =
                len.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "MIN_TOKEN_LENGTH".to_string(),
                    value: len,
                })?;
        }

        if let Ok(top_k) = std::env::var("RETRIEVAL_TOP_K") {
            config.retrieval.top_k = top_k.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RETRIEVAL_TOP_K".to_string(),
                value: top_k,
            })?;
        }
        if let Ok(min_score) = std::env::var("RETRIEVAL_MIN_SCORE") {
            config.retrieval.min_score =
                min_score.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "RETRIEVAL_MIN_SCORE".to_string(),
                    value: min_score,
                })?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding.dimension == 0 {
            return Err(ConfigError::InvalidValue {
                key: "embedding.dimension".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Vector dimension for the hashing embedder
    ///
    /// Small values increase hash collisions between tokens; tests use a
    /// small dimension deliberately to exercise collision folding.
    pub dimension: usize,

    /// Tokens shorter than this are dropped during normalization
    pub min_token_length: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: 128,
            min_token_length: 2,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default number of results for similarity queries
    pub top_k: usize,

    /// Minimum similarity score for a result to be returned
    pub min_score: f32,

    /// Maximum number of entries in the query embedding cache
    pub cache_max_capacity: u64,

    /// Time-to-live for cached query embeddings (in seconds)
    pub cache_ttl_seconds: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            min_score: 0.0,
            // Query texts are short and repeat often; 10k entries is plenty
            cache_max_capacity: 10_000,
            cache_ttl_seconds: 3600,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Install the global tracing subscriber for an embedding host
///
/// `RUST_LOG` overrides the configured level. Returns an error if a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ConfigError::InvalidValue {
        key: "logging".to_string(),
        value: e.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.embedding.dimension, 128);
        assert_eq!(config.embedding.min_token_length, 2);
        assert_eq!(config.retrieval.top_k, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut config = AppConfig::default();
        config.embedding.dimension = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [embedding]
            dimension = 64
            min_token_length = 2

            [retrieval]
            top_k = 5
            min_score = 0.25
            cache_max_capacity = 100
            cache_ttl_seconds = 60

            [logging]
            level = "debug"
            json_format = false
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.embedding.dimension, 64);
        assert_eq!(config.retrieval.top_k, 5);
        assert!((config.retrieval.min_score - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_errors() {
        let result = AppConfig::from_file("/nonexistent/mealmap.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError { .. })));
    }
}
