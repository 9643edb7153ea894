use serde::{Deserialize, Serialize};

use crate::prop::Side;

/// Shortest run of same-side results that is reported as a streak.
pub const MIN_STREAK: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
    pub length: usize,
    pub side: Option<Side>,
}
impl Streak {
    pub fn is_active(&self) -> bool {
        self.side.is_some()
    }
}

/// Counts the run of consecutive samples, ending at the most recent one, that fell on the same
/// side of the line. Runs shorter than [MIN_STREAK] are suppressed.
pub fn detect_streak(samples: &[f64], line: f64) -> Streak {
    let mut results = samples.iter().rev().map(|&sample| Side::classify(sample, line));
    let Some(side) = results.next() else {
        return Streak::default();
    };
    let length = 1 + results.take_while(|&next| next == side).count();
    if length < MIN_STREAK {
        Streak::default()
    } else {
        Streak {
            length,
            side: Some(side),
        }
    }
}
