//! Tests for blending classifier output with questionnaire scores.

use namecast::{
    Distribution, NamecastError, QuestionCatalog, TargetCategory, Weights, combine,
    score_questionnaire,
};

fn dist(female: f64, male: f64) -> Distribution {
    Distribution::new([("female", female), ("male", male)]).unwrap()
}

#[test]
fn closed_tie_break_at_one_half() {
    // 0.6 * 0.7 + 0.4 * 0.2 = 0.42 + 0.08 = 0.5
    let result = combine(
        &dist(0.3, 0.7),
        &TargetCategory::default(),
        0.2,
        Weights::default(),
    )
    .unwrap();
    assert_eq!(result.probability("male"), Some(0.5));
    assert_eq!(result.final_label, "male");
    assert_eq!(result.final_confidence, 0.5);
    assert_eq!(result.initial_label, "male");
    assert_eq!(result.initial_confidence, 0.7);
}

#[test]
fn questionnaire_overturns_confident_name() {
    let score = score_questionnaire(&[5; 5], &QuestionCatalog::standard()).unwrap();
    let result = combine(
        &dist(0.9, 0.1),
        &TargetCategory::default(),
        score,
        Weights::default(),
    )
    .unwrap();
    // 0.6 * 0.1 + 0.4 * 0.6 = 0.30
    assert!((result.probability("male").unwrap() - 0.30).abs() < 1e-12);
    assert!((result.probability("female").unwrap() - 0.70).abs() < 1e-12);
    assert_eq!(result.final_label, "female");
    assert!((result.final_confidence - 0.70).abs() < 1e-12);
}

#[test]
fn monotonic_in_questionnaire_score() {
    let target = TargetCategory::default();
    for p_male in [0.0, 0.1, 0.35, 0.5, 0.8, 1.0] {
        let d = dist(1.0 - p_male, p_male);
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=20 {
            let score = f64::from(step) / 20.0;
            let p = combine(&d, &target, score, Weights::default())
                .unwrap()
                .probability("male")
                .unwrap();
            assert!(p >= previous, "p_male={p_male} score={score}: {p} < {previous}");
            previous = p;
        }
    }
}

#[test]
fn confidence_is_at_least_one_half() {
    let target = TargetCategory::default();
    for p_male in [0.0, 0.2, 0.5, 0.9, 1.0] {
        for score in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let result =
                combine(&dist(1.0 - p_male, p_male), &target, score, Weights::default()).unwrap();
            assert!(result.final_confidence >= 0.5);
            assert!(result.final_confidence <= 1.0);
            let sum: f64 = result.combined_distribution.iter().map(|e| e.probability).sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn custom_weights_and_target() {
    let target = TargetCategory::new("female", "male");
    let weights = Weights::new(0.5, 0.5).unwrap();
    let result = combine(&dist(0.4, 0.6), &target, 0.8, weights).unwrap();
    // 0.5 * 0.4 + 0.8 * 0.5 = 0.6
    assert!((result.probability("female").unwrap() - 0.6).abs() < 1e-12);
    assert_eq!(result.final_label, "female");
}

#[test]
fn label_order_does_not_matter_when_target_present() {
    let reordered = Distribution::new([("male", 0.7), ("female", 0.3)]).unwrap();
    let a = combine(&reordered, &TargetCategory::default(), 0.2, Weights::default()).unwrap();
    let b = combine(
        &dist(0.3, 0.7),
        &TargetCategory::default(),
        0.2,
        Weights::default(),
    )
    .unwrap();
    assert_eq!(a.final_label, b.final_label);
    assert_eq!(a.probability("male"), b.probability("male"));
    assert!(!a.label_fallback);
}

#[test]
fn renamed_labels_fall_back_and_are_flagged() {
    let renamed = Distribution::new([("F", 0.9), ("M", 0.1)]).unwrap();
    let result = combine(&renamed, &TargetCategory::default(), 0.6, Weights::default()).unwrap();
    assert!(result.label_fallback);
    assert!((result.probability("male").unwrap() - 0.30).abs() < 1e-12);
}

#[test]
fn custom_fallback_index() {
    let renamed = Distribution::new([("M", 0.8), ("F", 0.2)]).unwrap();
    let target = TargetCategory::default().fallback_index(0);
    let result = combine(&renamed, &target, 0.5, Weights::default()).unwrap();
    // 0.6 * 0.8 + 0.5 * 0.4 = 0.68
    assert!((result.probability("male").unwrap() - 0.68).abs() < 1e-12);
}

#[test]
fn out_of_range_fallback_is_a_lookup_error() {
    let single = Distribution::new([("unknown", 1.0)]).unwrap();
    let err = combine(&single, &TargetCategory::default(), 0.5, Weights::default()).unwrap_err();
    assert!(matches!(err, NamecastError::LabelLookup(_)));
}

#[test]
fn combine_is_deterministic() {
    let d = dist(0.45, 0.55);
    let a = combine(&d, &TargetCategory::default(), 0.35, Weights::default()).unwrap();
    let b = combine(&d, &TargetCategory::default(), 0.35, Weights::default()).unwrap();
    assert_eq!(a, b);
}
