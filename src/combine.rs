//! Blending the classifier's output with the questionnaire score.
//!
//! ```text
//! p_target     = name_weight * p_name + questionnaire_score * questionnaire_weight
//! p_complement = 1 - p_target
//! final_label  = target if p_target >= 0.5 else complement
//! ```

use tracing::warn;

use crate::telemetry;
use crate::types::{CombinedResult, Distribution, TargetCategory, Weights};
use crate::{NamecastError, Result};

/// Decision threshold; a blended target probability equal to it resolves
/// to the target.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Where the target probability was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLookup {
    /// The target label was present at this index.
    Found(usize),
    /// The target label was missing; the fallback index was used.
    Fallback(usize),
}

impl TargetLookup {
    /// Index of the entry the target probability is read from.
    pub fn index(self) -> usize {
        match self {
            TargetLookup::Found(i) | TargetLookup::Fallback(i) => i,
        }
    }

    /// Whether the positional fallback was used.
    pub fn is_fallback(self) -> bool {
        matches!(self, TargetLookup::Fallback(_))
    }
}

/// Locate the target category in a distribution.
///
/// Falls back to `target.fallback_index` when the label is absent, which
/// tolerates a reordered or renamed label set but can read the wrong
/// class, so every fallback is logged and counted.
pub fn locate_target(
    distribution: &Distribution,
    target: &TargetCategory,
) -> Result<TargetLookup> {
    if let Some(i) = distribution.position(&target.label) {
        return Ok(TargetLookup::Found(i));
    }

    let Some(entry) = distribution.get(target.fallback_index) else {
        return Err(NamecastError::LabelLookup(format!(
            "'{}' not in label set {:?} and fallback index {} is out of range",
            target.label,
            distribution.labels().collect::<Vec<_>>(),
            target.fallback_index
        )));
    };

    warn!(
        target_label = %target.label,
        fallback_index = target.fallback_index,
        fallback_label = %entry.label,
        "target label missing from classifier labels, using positional fallback"
    );
    metrics::counter!(telemetry::LABEL_FALLBACKS_TOTAL).increment(1);
    Ok(TargetLookup::Fallback(target.fallback_index))
}

/// Blend a classifier distribution with a questionnaire score.
///
/// `questionnaire_score` must be finite and within `[0, 1]`.
pub fn combine(
    distribution: &Distribution,
    target: &TargetCategory,
    questionnaire_score: f64,
    weights: Weights,
) -> Result<CombinedResult> {
    if !questionnaire_score.is_finite() || !(0.0..=1.0).contains(&questionnaire_score) {
        return Err(NamecastError::InvalidInput(format!(
            "questionnaire score must be within [0, 1], got {questionnaire_score}"
        )));
    }

    let lookup = locate_target(distribution, target)?;
    let p_name = distribution
        .get(lookup.index())
        .map(|e| e.probability)
        .ok_or_else(|| NamecastError::LabelLookup(format!("no entry at {}", lookup.index())))?;

    let p_target = (weights.name() * p_name + questionnaire_score * weights.questionnaire())
        .clamp(0.0, 1.0);
    let p_complement = 1.0 - p_target;

    let final_label = if p_target >= DECISION_THRESHOLD {
        target.label.clone()
    } else {
        target.complement.clone()
    };

    let initial = distribution.top();
    Ok(CombinedResult {
        initial_label: initial.label.clone(),
        initial_confidence: initial.probability,
        final_label,
        final_confidence: p_target.max(p_complement),
        combined_distribution: Distribution::new([
            (target.complement.clone(), p_complement),
            (target.label.clone(), p_target),
        ])?,
        questionnaire_score,
        label_fallback: lookup.is_fallback(),
    })
}
