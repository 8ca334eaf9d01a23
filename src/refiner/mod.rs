//! The refinement engine.
//!
//! A [`Refiner`] owns everything that is fixed at start-up (classifier,
//! question catalog, target category, weights, ambiguous names) and is
//! shared read-only between interactions.

mod builder;

pub use builder::{Namecast, RefinerBuilder};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::classifier::{AmbiguousNames, NameClassifier, normalize_name};
use crate::combine::combine;
use crate::form::parse_form_answers;
use crate::scoring::score_questionnaire;
use crate::telemetry;
use crate::types::{ClassificationResult, CombinedResult, QuestionCatalog, TargetCategory, Weights};
use crate::{NamecastError, Result};

/// A classification plus whether the name is on the ambiguous list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classified {
    pub classification: ClassificationResult,
    pub ambiguous: bool,
}

/// Classifies names and refines classifications with questionnaire answers.
pub struct Refiner {
    classifier: Arc<dyn NameClassifier>,
    catalog: QuestionCatalog,
    target: TargetCategory,
    weights: Weights,
    ambiguous: AmbiguousNames,
}

impl Refiner {
    pub(crate) fn new(
        classifier: Arc<dyn NameClassifier>,
        catalog: QuestionCatalog,
        target: TargetCategory,
        weights: Weights,
        ambiguous: AmbiguousNames,
    ) -> Self {
        Self {
            classifier,
            catalog,
            target,
            weights,
            ambiguous,
        }
    }

    /// Normalize and classify a raw name.
    pub fn classify(&self, raw_name: &str) -> Result<Classified> {
        let result = self.classify_inner(raw_name);
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::CLASSIFICATIONS_TOTAL, "status" => status).increment(1);
        if matches!(result, Err(NamecastError::EmptyName)) {
            metrics::counter!(telemetry::INPUT_REJECTIONS_TOTAL, "stage" => "classify")
                .increment(1);
        }
        result
    }

    fn classify_inner(&self, raw_name: &str) -> Result<Classified> {
        let name = normalize_name(raw_name)?;
        let distribution = self.classifier.predict(&name)?;

        let expected = self.classifier.labels();
        if !distribution
            .labels()
            .eq(expected.iter().map(String::as_str))
        {
            return Err(NamecastError::Model(format!(
                "classifier '{}' returned labels {:?}, expected {:?}",
                self.classifier.name(),
                distribution.labels().collect::<Vec<_>>(),
                expected
            )));
        }

        let classification = ClassificationResult::new(name, distribution);
        let ambiguous = self.ambiguous.contains(&classification.name);
        debug!(
            name = %classification.name,
            label = %classification.label,
            confidence = classification.confidence,
            ambiguous,
            "classified name"
        );
        Ok(Classified {
            classification,
            ambiguous,
        })
    }

    /// Blend a stored classification with ordered questionnaire answers.
    pub fn refine(
        &self,
        classification: &ClassificationResult,
        responses: &[u8],
    ) -> Result<CombinedResult> {
        let score = score_questionnaire(responses, &self.catalog).inspect_err(|_| {
            metrics::counter!(telemetry::INPUT_REJECTIONS_TOTAL, "stage" => "refine")
                .increment(1);
        })?;
        let combined = combine(
            &classification.distribution,
            &self.target,
            score,
            self.weights,
        )?;

        metrics::counter!(
            telemetry::REFINEMENTS_TOTAL,
            "final_label" => combined.final_label.clone()
        )
        .increment(1);
        debug!(
            name = %classification.name,
            questionnaire_score = score,
            initial = %combined.initial_label,
            final_label = %combined.final_label,
            final_confidence = combined.final_confidence,
            "refined classification"
        );
        Ok(combined)
    }

    /// Validate raw form fields (`q1`..`q5`) and refine.
    pub fn refine_form(
        &self,
        classification: &ClassificationResult,
        fields: &HashMap<String, String>,
    ) -> Result<CombinedResult> {
        let responses = parse_form_answers(fields, &self.catalog).inspect_err(|_| {
            metrics::counter!(telemetry::INPUT_REJECTIONS_TOTAL, "stage" => "refine")
                .increment(1);
        })?;
        self.refine(classification, &responses)
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn target(&self) -> &TargetCategory {
        &self.target
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Name of the underlying classifier.
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}
