//! Namecast error types

use serde::Serialize;

/// Namecast error types
#[derive(Debug, thiserror::Error)]
pub enum NamecastError {
    // Input validation errors
    #[error("name must not be empty")]
    EmptyName,

    #[error("answer {answer} to question {question_id} is outside the 1-5 scale")]
    AnswerOutOfRange { question_id: u32, answer: i64 },

    #[error("expected {expected} answers, got {actual}")]
    ResponseLength { expected: usize, actual: usize },

    #[error("missing answer for field '{0}'")]
    MissingAnswer(String),

    #[error("malformed answer for field '{field}': {value:?}")]
    MalformedAnswer { field: String, value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // State errors
    /// Refinement was requested but no classification is linked to the
    /// interaction (never classified, unknown id, or expired).
    #[error("no classification is linked to this interaction")]
    NoClassification,

    /// The target label is absent and the fallback index does not address
    /// an entry of the distribution either.
    #[error("label lookup failed: {0}")]
    LabelLookup(String),

    // Classifier errors
    #[error("model error: {0}")]
    Model(String),

    #[error("no classifier configured")]
    NoClassifier,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Broad category of a [`NamecastError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range user input.
    InputValidation,
    /// Refinement without a linked classification.
    InvalidState,
    /// Target label could not be resolved in the distribution.
    LabelLookup,
    /// Configuration, model, or I/O failure.
    Internal,
}

/// Where an interaction should resume after a recoverable error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// Start over by submitting a name.
    Classification,
    /// Answer the questionnaire again for the current classification.
    Questionnaire,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InputValidation => "input_validation",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::LabelLookup => "label_lookup",
            ErrorKind::Internal => "internal",
        }
    }
}

impl NamecastError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NamecastError::EmptyName
            | NamecastError::AnswerOutOfRange { .. }
            | NamecastError::ResponseLength { .. }
            | NamecastError::MissingAnswer(_)
            | NamecastError::MalformedAnswer { .. }
            | NamecastError::InvalidInput(_) => ErrorKind::InputValidation,
            NamecastError::NoClassification => ErrorKind::InvalidState,
            NamecastError::LabelLookup(_) => ErrorKind::LabelLookup,
            NamecastError::Model(_)
            | NamecastError::NoClassifier
            | NamecastError::Configuration(_)
            | NamecastError::Json(_)
            | NamecastError::Io(_)
            | NamecastError::Csv(_) => ErrorKind::Internal,
        }
    }

    /// The entry point to redirect to, or `None` if the error is not
    /// recoverable by the user.
    pub fn recovery(&self) -> Option<EntryPoint> {
        match self {
            NamecastError::EmptyName | NamecastError::NoClassification => {
                Some(EntryPoint::Classification)
            }
            NamecastError::AnswerOutOfRange { .. }
            | NamecastError::ResponseLength { .. }
            | NamecastError::MissingAnswer(_)
            | NamecastError::MalformedAnswer { .. } => Some(EntryPoint::Questionnaire),
            _ => None,
        }
    }
}

/// Result type alias for Namecast operations
pub type Result<T> = std::result::Result<T, NamecastError>;
