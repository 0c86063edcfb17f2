//! Mealmap Embed - Deterministic text embedding
//!
//! Turns recipe text into fixed-dimension unit vectors using the hashing
//! trick: tokens are hashed into a small fixed number of slots, counted, and
//! the resulting term-frequency vector is L2-normalized. No model weights,
//! no network calls, and the same text always embeds to the same vector
//! across runs and processes.

pub mod hashing;
pub mod recipe_text;
pub mod text;

pub use hashing::HashingEmbedder;
pub use recipe_text::build_embedding_text;
pub use text::normalize;
