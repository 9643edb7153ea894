//! Testing helpers.

use assert_float_eq::*;

use crate::prop::{Prop, StatType};

/// A home points prop for LAL against GSW with no price, rest or split data.
pub fn points_prop(samples: &[f64], line: f64) -> Prop {
    Prop {
        player_name: "LeBron James".into(),
        team: "LAL".into(),
        opponent: "GSW".into(),
        stat_type: StatType::Points,
        line,
        feature_samples: samples.to_vec(),
        opponent_rank: 0,
        is_home: true,
        american_odds: None,
        rest_days: None,
        location_split: None,
    }
}

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "expected {} values, got {}: {actual:?}",
        expected.len(),
        actual.len()
    );
    for (&expected, &actual) in expected.iter().zip(actual) {
        if expected != actual {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that every score lies in the closed interval 0–100.
pub fn assert_scores_bounded(scores: impl IntoIterator<Item = f64>) {
    for score in scores {
        assert!(
            (0.0..=100.0).contains(&score),
            "score {score} outside 0–100"
        );
    }
}
