//! Name classifiers.
//!
//! The refiner treats the classifier as an opaque function from a
//! normalized name to a [`Distribution`] over a fixed, ordered label set.
//! Implementations are loaded once at start-up and shared read-only.
//!
//! - [`NgramModel`]: character n-gram naive Bayes model persisted as JSON.
//! - [`AmbiguousNames`]: static set of names used across categories.

mod ambiguous;
mod ngram;

pub use ambiguous::AmbiguousNames;
pub use ngram::{NgramConfig, NgramModel};

use crate::types::Distribution;
use crate::{NamecastError, Result};

/// A classifier from names to category distributions.
///
/// `predict` must return a distribution whose labels match [`labels()`](Self::labels)
/// one-to-one and in the same order.
pub trait NameClassifier: Send + Sync {
    /// Classifier name for logging/debugging.
    fn name(&self) -> &str;

    /// The fixed, ordered label set.
    fn labels(&self) -> &[String];

    /// Predict a distribution for an already-normalized name.
    fn predict(&self, name: &str) -> Result<Distribution>;
}

/// CSV reader over in-memory text with a header row. Fields are trimmed;
/// `flexible` allows rows with fewer fields than the header.
pub(crate) fn csv_reader(content: &str, flexible: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(flexible)
        .from_reader(content.as_bytes())
}

/// Index of the header named `name` (ASCII case-insensitive).
pub(crate) fn header_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            NamecastError::InvalidInput(format!(
                "header has no '{name}' column: {:?}",
                headers.iter().collect::<Vec<_>>()
            ))
        })
}

/// Normalize a raw name: trim surrounding whitespace and lowercase.
///
/// Whitespace-only input is rejected.
pub fn normalize_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NamecastError::EmptyName);
    }
    Ok(trimmed.to_lowercase())
}
