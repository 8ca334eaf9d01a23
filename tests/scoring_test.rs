//! Tests for questionnaire scoring.

use namecast::{Direction, NamecastError, Question, QuestionCatalog, score_questionnaire};

fn catalog_with(directions: [Direction; 5]) -> QuestionCatalog {
    let questions = directions
        .iter()
        .enumerate()
        .map(|(i, &d)| Question::new(i as u32 + 1, format!("question {}", i + 1), d))
        .collect();
    QuestionCatalog::new(questions).unwrap()
}

/// Every response in {1..5}^5.
fn all_responses() -> impl Iterator<Item = [u8; 5]> {
    (0..5u32.pow(5)).map(|mut n| {
        let mut r = [0u8; 5];
        for slot in r.iter_mut() {
            *slot = (n % 5) as u8 + 1;
            n /= 5;
        }
        r
    })
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn neutral_midpoint_regardless_of_directions() {
    use Direction::{Forward, Reverse};
    for directions in [
        [Forward; 5],
        [Reverse; 5],
        [Forward, Reverse, Forward, Reverse, Forward],
        [Reverse, Reverse, Forward, Forward, Reverse],
    ] {
        let score = score_questionnaire(&[3; 5], &catalog_with(directions)).unwrap();
        assert_eq!(score, 0.5, "directions {directions:?}");
    }
}

#[test]
fn agreeing_forward_and_disagreeing_reverse_scores_one() {
    let catalog = QuestionCatalog::standard();
    let responses: Vec<u8> = catalog
        .iter()
        .map(|q| match q.direction {
            Direction::Forward => 5,
            Direction::Reverse => 1,
        })
        .collect();
    assert_eq!(score_questionnaire(&responses, &catalog).unwrap(), 1.0);
}

#[test]
fn score_stays_in_unit_interval() {
    let catalog = QuestionCatalog::standard();
    for responses in all_responses() {
        let score = score_questionnaire(&responses, &catalog).unwrap();
        assert!(
            (0.0..=1.0).contains(&score),
            "{responses:?} scored {score}"
        );
    }
}

#[test]
fn raising_a_forward_answer_never_lowers_the_score() {
    let catalog = QuestionCatalog::standard();
    let low = score_questionnaire(&[2, 3, 3, 3, 3], &catalog).unwrap();
    let high = score_questionnaire(&[4, 3, 3, 3, 3], &catalog).unwrap();
    assert!(high > low);

    // Question 2 is reverse-direction.
    let low = score_questionnaire(&[3, 2, 3, 3, 3], &catalog).unwrap();
    let high = score_questionnaire(&[3, 4, 3, 3, 3], &catalog).unwrap();
    assert!(high < low);
}

#[test]
fn scoring_is_deterministic() {
    let catalog = QuestionCatalog::standard();
    let a = score_questionnaire(&[4, 2, 5, 1, 3], &catalog).unwrap();
    let b = score_questionnaire(&[4, 2, 5, 1, 3], &catalog).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// Worked example
// =============================================================================

#[test]
fn all_strongly_agree_on_standard_catalog() {
    // unit scores [1,1,1,1,1] → adjusted [1,0,1,0,1] → mean 0.6
    let score = score_questionnaire(&[5; 5], &QuestionCatalog::standard()).unwrap();
    assert!((score - 0.6).abs() < 1e-12);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn rejects_zero_and_six() {
    let catalog = QuestionCatalog::standard();
    for bad in [0u8, 6, 255] {
        let err = score_questionnaire(&[3, 3, 3, 3, bad], &catalog).unwrap_err();
        assert!(
            matches!(err, NamecastError::AnswerOutOfRange { question_id: 5, .. }),
            "expected AnswerOutOfRange for {bad}, got {err:?}"
        );
    }
}

#[test]
fn rejects_wrong_length() {
    let catalog = QuestionCatalog::standard();
    assert!(matches!(
        score_questionnaire(&[], &catalog),
        Err(NamecastError::ResponseLength {
            expected: 5,
            actual: 0
        })
    ));
    assert!(matches!(
        score_questionnaire(&[3; 6], &catalog),
        Err(NamecastError::ResponseLength {
            expected: 5,
            actual: 6
        })
    ));
}
