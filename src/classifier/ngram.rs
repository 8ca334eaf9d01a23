//! Character n-gram naive Bayes name classifier.
//!
//! Names are padded with a space on each side and split into character
//! n-grams (`min_n..=max_n`). A multinomial naive Bayes model with additive
//! smoothing scores each label:
//!
//! ```text
//! log P(c | name) ∝ log P(c) + Σ count(g) · log((N_gc + α) / (N_c + α·|V|))
//! ```
//!
//! N-grams never seen during fitting carry no evidence and are skipped.
//! The fitted counts are persisted as JSON; log-probabilities are derived
//! when the model is loaded.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{NameClassifier, csv_reader, header_index, normalize_name};
use crate::types::Distribution;
use crate::{NamecastError, Result};

/// Feature extraction and smoothing parameters.
///
/// ```rust
/// # use namecast::NgramConfig;
/// let config = NgramConfig::new().ngram_range(2, 4).alpha(0.5);
/// assert_eq!(config.max_n, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NgramConfig {
    /// Shortest n-gram length. Default: 1.
    pub min_n: usize,
    /// Longest n-gram length. Default: 3.
    pub max_n: usize,
    /// Additive smoothing constant. Default: 1.0.
    pub alpha: f64,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            min_n: 1,
            max_n: 3,
            alpha: 1.0,
        }
    }
}

impl NgramConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive n-gram length range.
    pub fn ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.min_n = min_n;
        self.max_n = max_n;
        self
    }

    /// Set the smoothing constant.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.min_n == 0 || self.min_n > self.max_n {
            return Err(NamecastError::Model(format!(
                "invalid n-gram range {}..={}",
                self.min_n, self.max_n
            )));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(NamecastError::Model(format!(
                "smoothing alpha must be positive, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Persisted form of a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    labels: Vec<String>,
    config: NgramConfig,
    class_counts: Vec<u64>,
    feature_counts: BTreeMap<String, Vec<u64>>,
}

/// A fitted character n-gram naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct NgramModel {
    file: ModelFile,
    log_prior: Vec<f64>,
    log_likelihood: HashMap<String, Vec<f64>>,
}

impl NgramModel {
    /// Fit a model from `(name, label)` samples.
    ///
    /// Names are normalized before feature extraction. Labels are sorted so
    /// the label order does not depend on sample order.
    pub fn fit<I, N, L>(samples: I, config: NgramConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (N, L)>,
        N: AsRef<str>,
        L: AsRef<str>,
    {
        config.validate()?;

        let mut rows = Vec::new();
        for (name, label) in samples {
            let label = label.as_ref().trim();
            if label.is_empty() {
                return Err(NamecastError::InvalidInput(format!(
                    "sample '{}' has an empty label",
                    name.as_ref()
                )));
            }
            rows.push((normalize_name(name.as_ref())?, label.to_string()));
        }
        if rows.is_empty() {
            return Err(NamecastError::InvalidInput(
                "cannot fit a model without samples".into(),
            ));
        }

        let labels: Vec<String> = rows
            .iter()
            .map(|(_, label)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Err(NamecastError::InvalidInput(format!(
                "need at least two labels to fit, got {labels:?}"
            )));
        }

        let mut class_counts = vec![0u64; labels.len()];
        let mut feature_counts: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        for (name, label) in &rows {
            // `labels` was built from these rows, so the search always succeeds.
            let Ok(class) = labels.binary_search(label) else {
                continue;
            };
            class_counts[class] += 1;
            for (gram, count) in extract_ngrams(name, &config) {
                feature_counts
                    .entry(gram)
                    .or_insert_with(|| vec![0; labels.len()])[class] += u64::from(count);
            }
        }

        debug!(
            samples = rows.len(),
            labels = labels.len(),
            vocabulary = feature_counts.len(),
            "fitted n-gram model"
        );

        Self::compile(ModelFile {
            labels,
            config,
            class_counts,
            feature_counts,
        })
    }

    /// Read `(name, label)` training samples from CSV text with a header
    /// row containing a `name` column and `label_column`.
    ///
    /// Fields may be quoted. Every row must have as many fields as the header.
    pub fn samples_from_csv(content: &str, label_column: &str) -> Result<Vec<(String, String)>> {
        let mut reader = csv_reader(content, false);
        let headers = reader.headers()?;
        let name = header_index(headers, "name")?;
        let label = header_index(headers, label_column)?;

        reader
            .records()
            .map(|record| {
                let record = record?;
                match (record.get(name), record.get(label)) {
                    (Some(n), Some(l)) => Ok((n.to_string(), l.to_string())),
                    _ => Err(NamecastError::InvalidInput(format!(
                        "row {} has {} fields",
                        record.position().map_or(0, |p| p.line()),
                        record.len()
                    ))),
                }
            })
            .collect()
    }

    /// Parse a model from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(json)?;
        Self::compile(file)
    }

    /// Serialize the model to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.file)?)
    }

    /// Load a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NamecastError::Model(format!("Failed to read model file {path:?}: {e}"))
        })?;
        Self::from_json(&content)
            .map_err(|e| NamecastError::Model(format!("Failed to parse model file {path:?}: {e}")))
    }

    /// Write the model to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| {
            NamecastError::Model(format!("Failed to write model file {path:?}: {e}"))
        })
    }

    /// Feature extraction and smoothing parameters.
    pub fn config(&self) -> NgramConfig {
        self.file.config
    }

    /// Number of distinct n-grams seen during fitting.
    pub fn vocabulary_size(&self) -> usize {
        self.file.feature_counts.len()
    }

    fn compile(file: ModelFile) -> Result<Self> {
        file.config.validate()?;

        let width = file.labels.len();
        if width < 2 {
            return Err(NamecastError::Model(format!(
                "model needs at least two labels, got {}",
                width
            )));
        }
        if file.labels.iter().collect::<BTreeSet<_>>().len() != width {
            return Err(NamecastError::Model("model labels are not unique".into()));
        }
        if file.class_counts.len() != width {
            return Err(NamecastError::Model(format!(
                "{} class counts for {width} labels",
                file.class_counts.len()
            )));
        }
        if file.class_counts.contains(&0) {
            return Err(NamecastError::Model(
                "every label needs at least one training sample".into(),
            ));
        }
        if let Some((gram, counts)) = file.feature_counts.iter().find(|(_, c)| c.len() != width) {
            return Err(NamecastError::Model(format!(
                "n-gram {gram:?} has {} counts for {width} labels",
                counts.len()
            )));
        }

        let documents: u64 = file.class_counts.iter().sum();
        let log_prior = file
            .class_counts
            .iter()
            .map(|&n| (n as f64 / documents as f64).ln())
            .collect();

        let alpha = file.config.alpha;
        let vocabulary = file.feature_counts.len() as f64;
        let mut totals = vec![0.0; width];
        for counts in file.feature_counts.values() {
            for (total, &n) in totals.iter_mut().zip(counts) {
                *total += n as f64;
            }
        }
        let log_denominators: Vec<f64> = totals
            .iter()
            .map(|total| (total + alpha * vocabulary).ln())
            .collect();

        let log_likelihood = file
            .feature_counts
            .iter()
            .map(|(gram, counts)| {
                let row = counts
                    .iter()
                    .zip(&log_denominators)
                    .map(|(&n, denominator)| (n as f64 + alpha).ln() - denominator)
                    .collect();
                (gram.clone(), row)
            })
            .collect();

        Ok(Self {
            file,
            log_prior,
            log_likelihood,
        })
    }
}

impl NameClassifier for NgramModel {
    fn name(&self) -> &str {
        "ngram-naive-bayes"
    }

    fn labels(&self) -> &[String] {
        &self.file.labels
    }

    fn predict(&self, name: &str) -> Result<Distribution> {
        let mut scores = self.log_prior.clone();
        for (gram, count) in extract_ngrams(name, &self.file.config) {
            if let Some(row) = self.log_likelihood.get(&gram) {
                for (score, ll) in scores.iter_mut().zip(row) {
                    *score += f64::from(count) * ll;
                }
            }
        }
        Distribution::from_aligned(&self.file.labels, &softmax(&scores))
    }
}

/// Count the character n-grams of a space-padded name.
fn extract_ngrams(name: &str, config: &NgramConfig) -> HashMap<String, u32> {
    let chars: Vec<char> = format!(" {name} ").chars().collect();
    let mut counts = HashMap::new();
    for n in config.min_n..=config.max_n {
        for window in chars.windows(n) {
            *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
        }
    }
    counts
}

/// Max-subtracted softmax over log-scores.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}
