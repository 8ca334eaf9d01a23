//! Boundary validation of submitted questionnaire answers.
//!
//! Answers arrive as loosely typed strings (form fields `q1`..`q5`, or a
//! comma-separated list on the command line). They are converted to Likert
//! values exactly once, here, so the scorer and combiner only ever see
//! well-formed input.

use std::collections::HashMap;

use crate::types::{LIKERT_MAX, LIKERT_MIN, Question, QuestionCatalog};
use crate::{NamecastError, Result};

/// Extract the ordered responses from form fields keyed `q{id}`.
///
/// Fields that don't name a question are ignored.
pub fn parse_form_answers(
    fields: &HashMap<String, String>,
    catalog: &QuestionCatalog,
) -> Result<Vec<u8>> {
    catalog
        .iter()
        .map(|question| {
            let field = question.field_name();
            let value = fields
                .get(&field)
                .ok_or_else(|| NamecastError::MissingAnswer(field.clone()))?;
            parse_answer(question, &field, value)
        })
        .collect()
}

/// Parse a comma-separated answer list such as `"4,2,5,1,3"`.
pub fn parse_answer_list(list: &str, catalog: &QuestionCatalog) -> Result<Vec<u8>> {
    let values: Vec<&str> = list.split(',').map(str::trim).collect();
    if values.len() != catalog.len() {
        return Err(NamecastError::ResponseLength {
            expected: catalog.len(),
            actual: values.len(),
        });
    }
    catalog
        .iter()
        .zip(values)
        .map(|(question, value)| parse_answer(question, &question.field_name(), value))
        .collect()
}

fn parse_answer(question: &Question, field: &str, value: &str) -> Result<u8> {
    let answer: i64 = value
        .trim()
        .parse()
        .map_err(|_| NamecastError::MalformedAnswer {
            field: field.to_string(),
            value: value.to_string(),
        })?;
    if !(i64::from(LIKERT_MIN)..=i64::from(LIKERT_MAX)).contains(&answer) {
        return Err(NamecastError::AnswerOutOfRange {
            question_id: question.id,
            answer,
        });
    }
    // Range checked above.
    Ok(answer as u8)
}
