//! Namecast - name-based category prediction refined by self-report
//!
//! A name classifier produces a probability distribution over a fixed
//! label set. The user may then answer a five-item directional Likert
//! questionnaire; its score is blended with the classifier's probability
//! for a target category to give a final label and confidence.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use namecast::{Namecast, NgramConfig, NgramModel};
//!
//! # fn main() -> namecast::Result<()> {
//! let model = NgramModel::fit(
//!     [("anna", "female"), ("maria", "female"), ("john", "male"), ("peter", "male")],
//!     NgramConfig::default(),
//! )?;
//! let refiner = Namecast::builder().classifier(Arc::new(model)).build()?;
//!
//! let classified = refiner.classify("  Julia ")?;
//! assert_eq!(classified.classification.name, "julia");
//!
//! let refined = refiner.refine(&classified.classification, &[3, 3, 3, 3, 3])?;
//! assert_eq!(refined.questionnaire_score, 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! The scorer and combiner are also usable directly:
//!
//! ```rust
//! use namecast::{Distribution, QuestionCatalog, TargetCategory, Weights};
//! use namecast::{combine, score_questionnaire};
//!
//! # fn main() -> namecast::Result<()> {
//! let score = score_questionnaire(&[5, 5, 5, 5, 5], &QuestionCatalog::standard())?;
//! let distribution = Distribution::new([("female", 0.9), ("male", 0.1)])?;
//! let result = combine(&distribution, &TargetCategory::default(), score, Weights::default())?;
//! assert_eq!(result.final_label, "female");
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod combine;
pub mod config;
pub mod error;
pub mod form;
pub mod refiner;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use classifier::{AmbiguousNames, NameClassifier, NgramConfig, NgramModel, normalize_name};
pub use combine::combine;
pub use error::{EntryPoint, ErrorKind, NamecastError, Result};
pub use refiner::{Classified, Namecast, Refiner, RefinerBuilder};
pub use scoring::score_questionnaire;
pub use session::{SessionConfig, SessionId, SessionStore};
pub use version::{PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    ClassificationResult, CombinedResult, Direction, Distribution, LabelProbability, Question,
    QuestionCatalog, TargetCategory, Weights,
};
