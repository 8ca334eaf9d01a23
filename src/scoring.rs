//! Questionnaire scoring.
//!
//! Each Likert answer is rescaled linearly to `[0, 1]` with
//! `(answer - 1) / 4`, flipped for reverse-direction questions, and the
//! adjusted scores are averaged. A score of 1 points fully towards the
//! target category, 0 fully towards its complement.

use crate::types::{Direction, LIKERT_MAX, LIKERT_MIN, QuestionCatalog};
use crate::{NamecastError, Result};

/// Rescale a Likert answer to `[0, 1]`: 1 → 0.0, 3 → 0.5, 5 → 1.0.
///
/// Answers outside the scale are clamped to its ends.
pub fn unit_score(answer: u8) -> f64 {
    let answer = answer.clamp(LIKERT_MIN, LIKERT_MAX);
    f64::from(answer - LIKERT_MIN) / f64::from(LIKERT_MAX - LIKERT_MIN)
}

/// Score an ordered questionnaire response against the catalog.
///
/// `responses[i]` answers `catalog.questions()[i]`. The whole response is
/// validated before anything is computed.
pub fn score_questionnaire(responses: &[u8], catalog: &QuestionCatalog) -> Result<f64> {
    if responses.len() != catalog.len() {
        return Err(NamecastError::ResponseLength {
            expected: catalog.len(),
            actual: responses.len(),
        });
    }

    for (question, &answer) in catalog.iter().zip(responses) {
        if !(LIKERT_MIN..=LIKERT_MAX).contains(&answer) {
            return Err(NamecastError::AnswerOutOfRange {
                question_id: question.id,
                answer: i64::from(answer),
            });
        }
    }

    let total: f64 = catalog
        .iter()
        .zip(responses)
        .map(|(question, &answer)| {
            let unit = unit_score(answer);
            match question.direction {
                Direction::Forward => unit,
                Direction::Reverse => 1.0 - unit,
            }
        })
        .sum();

    Ok(total / responses.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_score_endpoints() {
        assert_eq!(unit_score(1), 0.0);
        assert_eq!(unit_score(2), 0.25);
        assert_eq!(unit_score(3), 0.5);
        assert_eq!(unit_score(5), 1.0);
    }

    #[test]
    fn unit_score_clamps_off_scale_answers() {
        assert_eq!(unit_score(0), 0.0);
        assert_eq!(unit_score(6), 1.0);
        assert_eq!(unit_score(u8::MAX), 1.0);
    }

    #[test]
    fn neutral_answers_score_half() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(score_questionnaire(&[3; 5], &catalog).unwrap(), 0.5);
    }

    #[test]
    fn all_agree_with_mixed_directions() {
        let catalog = QuestionCatalog::standard();
        let score = score_questionnaire(&[5; 5], &catalog).unwrap();
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn fully_towards_target() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(score_questionnaire(&[5, 1, 5, 1, 5], &catalog).unwrap(), 1.0);
        assert_eq!(score_questionnaire(&[1, 5, 1, 5, 1], &catalog).unwrap(), 0.0);
    }

    #[test]
    fn rejects_out_of_range_answers() {
        let catalog = QuestionCatalog::standard();
        let err = score_questionnaire(&[3, 3, 0, 3, 3], &catalog).unwrap_err();
        assert!(matches!(
            err,
            NamecastError::AnswerOutOfRange {
                question_id: 3,
                answer: 0
            }
        ));
        assert!(score_questionnaire(&[3, 3, 3, 3, 6], &catalog).is_err());
    }

    #[test]
    fn rejects_length_mismatch() {
        let catalog = QuestionCatalog::standard();
        let err = score_questionnaire(&[3, 3, 3], &catalog).unwrap_err();
        assert!(matches!(
            err,
            NamecastError::ResponseLength {
                expected: 5,
                actual: 3
            }
        ));
    }
}
