//! Builder for configuring refiner instances

use std::sync::Arc;

use tracing::warn;

use super::Refiner;
use crate::classifier::{AmbiguousNames, NameClassifier};
use crate::types::{QuestionCatalog, TargetCategory, Weights};
use crate::{NamecastError, Result};

/// Main entry point for creating refiner instances.
pub struct Namecast;

impl Namecast {
    /// Create a new builder for configuring the refiner.
    pub fn builder() -> RefinerBuilder {
        RefinerBuilder::new()
    }
}

/// Builder for configuring refiner instances.
pub struct RefinerBuilder {
    classifier: Option<Arc<dyn NameClassifier>>,
    catalog: QuestionCatalog,
    target: TargetCategory,
    weights: Weights,
    ambiguous: AmbiguousNames,
}

impl RefinerBuilder {
    pub fn new() -> Self {
        Self {
            classifier: None,
            catalog: QuestionCatalog::standard(),
            target: TargetCategory::default(),
            weights: Weights::default(),
            ambiguous: AmbiguousNames::new(),
        }
    }

    /// Set the name classifier (required).
    pub fn classifier(mut self, classifier: Arc<dyn NameClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Replace the standard question catalog.
    pub fn catalog(mut self, catalog: QuestionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the target category and its complement (default: "male" / "female").
    pub fn target(mut self, target: TargetCategory) -> Self {
        self.target = target;
        self
    }

    /// Set the blending weights (default: 0.6 name, 0.4 questionnaire).
    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the ambiguous-name list.
    pub fn ambiguous_names(mut self, names: AmbiguousNames) -> Self {
        self.ambiguous = names;
        self
    }

    /// Build the refiner.
    pub fn build(self) -> Result<Refiner> {
        let classifier = self.classifier.ok_or(NamecastError::NoClassifier)?;

        if self.target.label == self.target.complement {
            return Err(NamecastError::Configuration(format!(
                "target and complement must differ, both are '{}'",
                self.target.label
            )));
        }

        let labels = classifier.labels();
        if !labels.contains(&self.target.label) {
            match labels.get(self.target.fallback_index) {
                Some(fallback) => warn!(
                    target_label = %self.target.label,
                    fallback_label = %fallback,
                    classifier = classifier.name(),
                    "target label not in classifier labels, refinements will use the positional fallback"
                ),
                None => {
                    return Err(NamecastError::Configuration(format!(
                        "target '{}' not in classifier labels {labels:?} and fallback index {} is out of range",
                        self.target.label, self.target.fallback_index
                    )));
                }
            }
        }

        Ok(Refiner::new(
            classifier,
            self.catalog,
            self.target,
            self.weights,
            self.ambiguous,
        ))
    }
}

impl Default for RefinerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
