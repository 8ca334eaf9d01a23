//! Name classification results.

use serde::{Deserialize, Serialize};

use super::Distribution;

/// The classifier's verdict on one name.
///
/// Produced once per name submission and immutable afterwards. This is the
/// state carried from classification to refinement, so it keeps the full
/// distribution rather than only the winning label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Normalized name that was classified.
    pub name: String,
    /// Highest-probability label.
    pub label: String,
    /// Probability of `label`.
    pub confidence: f64,
    /// Full distribution in classifier label order.
    pub distribution: Distribution,
}

impl ClassificationResult {
    /// Create a result from a distribution. The label is its top entry.
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        let top = distribution.top();
        Self {
            name: name.into(),
            label: top.label.clone(),
            confidence: top.probability,
            distribution,
        }
    }
}
