//! Ordered probability distributions over category labels.

use serde::{Deserialize, Serialize};

use crate::{NamecastError, Result};

/// Tolerance for the sum-to-one check.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// One `(label, probability)` entry of a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    pub label: String,
    pub probability: f64,
}

/// An ordered probability distribution over category labels.
///
/// Entries keep the classifier's label order, which matters because
/// probabilities are positionally aligned to labels. Construction checks
/// that labels are unique and that probabilities are finite, non-negative
/// and sum to 1 within [`SUM_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LabelProbability>", into = "Vec<LabelProbability>")]
pub struct Distribution {
    entries: Vec<LabelProbability>,
}

impl Distribution {
    /// Build a distribution from `(label, probability)` pairs.
    pub fn new<I, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(label, probability)| LabelProbability {
                label: label.into(),
                probability,
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Build a distribution by zipping labels with positionally aligned
    /// probabilities.
    pub fn from_aligned(labels: &[String], probabilities: &[f64]) -> Result<Self> {
        if labels.len() != probabilities.len() {
            return Err(NamecastError::InvalidInput(format!(
                "{} labels but {} probabilities",
                labels.len(),
                probabilities.len()
            )));
        }
        Self::new(labels.iter().cloned().zip(probabilities.iter().copied()))
    }

    fn from_entries(entries: Vec<LabelProbability>) -> Result<Self> {
        if entries.is_empty() {
            return Err(NamecastError::InvalidInput(
                "distribution must have at least one entry".into(),
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            if !entry.probability.is_finite() || entry.probability < 0.0 {
                return Err(NamecastError::InvalidInput(format!(
                    "probability for '{}' must be finite and non-negative, got {}",
                    entry.label, entry.probability
                )));
            }
            if entries[..i].iter().any(|e| e.label == entry.label) {
                return Err(NamecastError::InvalidInput(format!(
                    "duplicate label '{}' in distribution",
                    entry.label
                )));
            }
        }

        let sum: f64 = entries.iter().map(|e| e.probability).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(NamecastError::InvalidInput(format!(
                "probabilities must sum to 1, got {sum}"
            )));
        }

        Ok(Self { entries })
    }

    /// Probability mass on `label`, or `None` if the label is absent.
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.position(label).map(|i| self.entries[i].probability)
    }

    /// Index of `label` in the distribution's order.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }

    /// Entry at a positional index.
    pub fn get(&self, index: usize) -> Option<&LabelProbability> {
        self.entries.get(index)
    }

    /// The highest-probability entry. On ties the earliest entry wins.
    pub fn top(&self) -> &LabelProbability {
        // `entries` is never empty after construction.
        let mut best = &self.entries[0];
        for entry in &self.entries[1..] {
            if entry.probability > best.probability {
                best = entry;
            }
        }
        best
    }

    /// Labels in distribution order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabelProbability> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a distribution has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<LabelProbability>> for Distribution {
    type Error = NamecastError;

    fn try_from(entries: Vec<LabelProbability>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<Distribution> for Vec<LabelProbability> {
    fn from(distribution: Distribution) -> Self {
        distribution.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_label_and_position() {
        let d = Distribution::new([("female", 0.3), ("male", 0.7)]).unwrap();
        assert_eq!(d.probability("male"), Some(0.7));
        assert_eq!(d.position("female"), Some(0));
        assert_eq!(d.probability("other"), None);
        assert_eq!(d.get(1).unwrap().label, "male");
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn top_prefers_first_on_tie() {
        let d = Distribution::new([("female", 0.5), ("male", 0.5)]).unwrap();
        assert_eq!(d.top().label, "female");
    }

    #[test]
    fn rejects_bad_sum() {
        let err = Distribution::new([("a", 0.4), ("b", 0.4)]).unwrap_err();
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(Distribution::new([("a", -0.1), ("b", 1.1)]).is_err());
        assert!(Distribution::new([("a", f64::NAN), ("b", 1.0)]).is_err());
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(Distribution::new([("a", 0.5), ("a", 0.5)]).is_err());
        assert!(Distribution::new(Vec::<(String, f64)>::new()).is_err());
    }

    #[test]
    fn tolerates_rounding() {
        assert!(Distribution::new([("a", 0.1), ("b", 0.2), ("c", 0.7000000001)]).is_ok());
    }

    #[test]
    fn from_aligned_checks_lengths() {
        let labels = vec!["female".to_string(), "male".to_string()];
        assert!(Distribution::from_aligned(&labels, &[1.0]).is_err());
        let d = Distribution::from_aligned(&labels, &[0.25, 0.75]).unwrap();
        assert_eq!(d.labels().collect::<Vec<_>>(), vec!["female", "male"]);
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let json = r#"[{"label":"a","probability":0.9},{"label":"b","probability":0.9}]"#;
        assert!(serde_json::from_str::<Distribution>(json).is_err());

        let d = Distribution::new([("a", 0.25), ("b", 0.75)]).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<Distribution>(&json).unwrap(), d);
    }
}
