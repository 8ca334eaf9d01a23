//! Public types for the Namecast API.

mod classification;
mod combined;
mod distribution;
mod question;

pub use classification::ClassificationResult;
pub use combined::{CombinedResult, TargetCategory, Weights};
pub use distribution::{Distribution, LabelProbability, SUM_TOLERANCE};
pub use question::{Direction, LIKERT_MAX, LIKERT_MIN, QUESTION_COUNT, Question, QuestionCatalog};
