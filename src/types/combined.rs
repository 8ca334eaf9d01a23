//! Blending weights, target category and combined results.

use serde::{Deserialize, Serialize};

use super::Distribution;
use crate::{NamecastError, Result};

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Linear blending weights for the name model and the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    name: f64,
    questionnaire: f64,
}

impl Weights {
    /// Create weights. Both must be finite, non-negative and sum to 1.
    pub fn new(name: f64, questionnaire: f64) -> Result<Self> {
        if !name.is_finite() || !questionnaire.is_finite() || name < 0.0 || questionnaire < 0.0 {
            return Err(NamecastError::Configuration(format!(
                "weights must be finite and non-negative, got name={name} questionnaire={questionnaire}"
            )));
        }
        if (name + questionnaire - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(NamecastError::Configuration(format!(
                "weights must sum to 1, got {}",
                name + questionnaire
            )));
        }
        Ok(Self {
            name,
            questionnaire,
        })
    }

    /// Weight on the classifier's probability.
    pub fn name(&self) -> f64 {
        self.name
    }

    /// Weight on the questionnaire score.
    pub fn questionnaire(&self) -> f64 {
        self.questionnaire
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            name: 0.6,
            questionnaire: 0.4,
        }
    }
}

/// The category tracked through the blending formula, and its complement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCategory {
    /// Label whose probability is blended (e.g. "male").
    pub label: String,
    /// Label reported when the target loses (e.g. "female").
    pub complement: String,
    /// Positional index used when `label` is missing from a distribution.
    pub fallback_index: usize,
}

impl TargetCategory {
    pub fn new(label: impl Into<String>, complement: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            complement: complement.into(),
            fallback_index: 1,
        }
    }

    /// Set the positional fallback index.
    pub fn fallback_index(mut self, index: usize) -> Self {
        self.fallback_index = index;
        self
    }
}

impl Default for TargetCategory {
    fn default() -> Self {
        Self::new("male", "female")
    }
}

/// Outcome of blending a classification with a questionnaire score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Label predicted from the name alone.
    pub initial_label: String,
    /// Probability of `initial_label` under the classifier.
    pub initial_confidence: f64,
    /// Label after blending.
    pub final_label: String,
    /// Probability of `final_label` after blending; always at least 0.5.
    pub final_confidence: f64,
    /// Two-entry distribution: complement first, then target.
    pub combined_distribution: Distribution,
    /// Questionnaire score that was blended in.
    pub questionnaire_score: f64,
    /// The target label was missing and the positional fallback was used.
    pub label_fallback: bool,
}

impl CombinedResult {
    /// Blended probability of `label`, if it is the target or complement.
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.combined_distribution.probability(label)
    }
}
