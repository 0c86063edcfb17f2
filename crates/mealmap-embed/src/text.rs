//! Token normalization for recipe text
//!
//! Lower-cases input, strips everything outside `[a-z0-9]`, splits on
//! whitespace, and drops short noise tokens. Pure functions, no state.

/// Minimum token length kept by [`normalize`]
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Normalize free text into a token sequence
///
/// Every character outside `[a-z0-9]` (after lower-casing) becomes a space,
/// the result is split on whitespace runs, and tokens shorter than
/// `min_token_length` are dropped. Blank input yields an empty sequence,
/// never an error.
pub fn normalize_with(text: &str, min_token_length: usize) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.len() >= min_token_length)
        .map(str::to_string)
        .collect()
}

/// Normalize with the default minimum token length
pub fn normalize(text: &str) -> Vec<String> {
    normalize_with(text, MIN_TOKEN_LENGTH)
}
