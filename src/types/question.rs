//! Questionnaire items and the fixed question catalog.

use serde::{Deserialize, Serialize};

use crate::{NamecastError, Result};

/// Number of questions in the catalog.
pub const QUESTION_COUNT: usize = 5;

/// Lowest point on the Likert scale ("strongly disagree").
pub const LIKERT_MIN: u8 = 1;

/// Highest point on the Likert scale ("strongly agree").
pub const LIKERT_MAX: u8 = 5;

/// How agreement with a question relates to the target category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Higher agreement points towards the target category.
    Forward,
    /// Higher agreement points towards the complement category.
    Reverse,
}

/// A single directional Likert item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub direction: Direction,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, direction: Direction) -> Self {
        Self {
            id,
            text: text.into(),
            direction,
        }
    }

    /// Form field carrying the answer to this question (`q{id}`).
    pub fn field_name(&self) -> String {
        format!("q{}", self.id)
    }
}

/// The ordered, immutable question catalog.
///
/// Always holds exactly [`QUESTION_COUNT`] questions with unique ids.
/// Responses are matched to questions by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, checking its shape.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.len() != QUESTION_COUNT {
            return Err(NamecastError::Configuration(format!(
                "question catalog must have exactly {QUESTION_COUNT} questions, got {}",
                questions.len()
            )));
        }
        for (i, q) in questions.iter().enumerate() {
            if questions[..i].iter().any(|other| other.id == q.id) {
                return Err(NamecastError::Configuration(format!(
                    "duplicate question id {}",
                    q.id
                )));
            }
            if q.text.trim().is_empty() {
                return Err(NamecastError::Configuration(format!(
                    "question {} has no text",
                    q.id
                )));
            }
        }
        Ok(Self { questions })
    }

    /// The standard five-item catalog, directions relative to "male".
    pub fn standard() -> Self {
        use Direction::{Forward, Reverse};
        Self {
            questions: vec![
                Question::new(
                    1,
                    "I enjoy working on cars or fixing mechanical things.",
                    Forward,
                ),
                Question::new(
                    2,
                    "I often use words like \"adorable\", \"lovely\", or \"cute\" to describe things.",
                    Reverse,
                ),
                Question::new(3, "I prefer logical puzzles over emotional stories.", Forward),
                Question::new(
                    4,
                    "I am usually the one who plans social gatherings.",
                    Reverse,
                ),
                Question::new(
                    5,
                    "I tend to be more assertive than accommodating.",
                    Forward,
                ),
            ],
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
