//! Independent component scores. Each maps its inputs onto 0–100 with 50 as the neutral value,
//! falling back to neutral whenever the inputs are insufficient.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::stats::{round1, SliceExt};

pub const NEUTRAL: f64 = 50.0;

pub const LEAGUE_TEAMS: i32 = 30;

/// Minimum number of samples for a consistency rating.
pub const MIN_CONSISTENCY_SAMPLES: usize = 5;

pub fn hit_rate(samples: &[f64], line: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    round1(samples.count_over(line) as f64 / samples.len() as f64 * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentHitRate {
    pub rate: f64,
    pub hits: usize,
    pub total: usize,
}

/// Hit rate over the last `window` samples, or over all of them if there are fewer.
pub fn recent_hit_rate(samples: &[f64], line: f64, window: usize) -> RecentHitRate {
    let recent = samples.trailing(window);
    let hits = recent.count_over(line);
    let total = recent.len();
    let rate = if total == 0 {
        0.0
    } else {
        round1(hits as f64 / total as f64 * 100.0)
    };
    RecentHitRate { rate, hits, total }
}

/// Relative margin of the recent mean over the line, mapped linearly so that −20% scores 0 and
/// +20% scores 100.
pub fn recent_form(samples: &[f64], line: f64, window: usize) -> f64 {
    if window == 0 || samples.len() < window || line == 0.0 {
        return NEUTRAL;
    }
    let mean = samples.trailing(window).mean();
    let pct = (mean - line) / line * 100.0;
    let score = if pct >= 20.0 {
        100.0
    } else if pct <= -20.0 {
        0.0
    } else {
        50.0 + pct / 20.0 * 50.0
    };
    round1(score.clamp(0.0, 100.0))
}

/// Linear inverse of the opponent's defensive rank over the league: rank 1 scores 100, rank 30
/// scores 0. Ranks outside the league are neutral.
pub fn opponent_difficulty(opponent_rank: i32) -> f64 {
    if opponent_rank <= 0 || opponent_rank > LEAGUE_TEAMS {
        return NEUTRAL;
    }
    round1((LEAGUE_TEAMS - opponent_rank) as f64 / (LEAGUE_TEAMS - 1) as f64 * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum RestFlag {
    #[strum(serialize = "back-to-back")]
    BackToBack,
    #[strum(serialize = "below optimal rest")]
    BelowOptimal,
    #[strum(serialize = "possible rust")]
    PossibleRust,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestAssessment {
    pub days: Option<u32>,
    pub score: f64,
    pub flag: Option<RestFlag>,
}

pub fn rest_factor(days: Option<u32>) -> RestAssessment {
    let (score, flag) = match days {
        None => (NEUTRAL, None),
        Some(0) => (30.0, Some(RestFlag::BackToBack)),
        Some(1) => (60.0, Some(RestFlag::BelowOptimal)),
        Some(2..=3) => (100.0, None),
        Some(4..=5) => (90.0, None),
        Some(_) => (70.0, Some(RestFlag::PossibleRust)),
    };
    RestAssessment { days, score, flag }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Flat,
    /// Not enough history to compare windows.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageTrend {
    pub recent_avg: f64,
    pub baseline_avg: f64,
    pub pct_change: f64,
    pub trend: Trend,
    pub significant: bool,
    pub score: f64,
}
impl UsageTrend {
    fn unknown() -> Self {
        Self {
            recent_avg: 0.0,
            baseline_avg: 0.0,
            pct_change: 0.0,
            trend: Trend::Unknown,
            significant: false,
            score: NEUTRAL,
        }
    }
}

pub const SIGNIFICANT_USAGE_CHANGE: f64 = 15.0;

/// Compares the last `recent` samples against the `baseline` samples immediately preceding them.
pub fn usage_trend(samples: &[f64], recent: usize, baseline: usize) -> UsageTrend {
    if recent == 0 || baseline == 0 || samples.len() < recent + baseline {
        return UsageTrend::unknown();
    }
    let split = samples.len() - recent;
    let recent_avg = samples[split..].mean();
    let baseline_avg = samples[split - baseline..split].mean();
    let pct_change = if baseline_avg == 0.0 {
        0.0
    } else {
        (recent_avg - baseline_avg) / baseline_avg * 100.0
    };
    let significant = pct_change.abs() >= SIGNIFICANT_USAGE_CHANGE;
    let magnitude = f64::min(25.0, pct_change.abs() / 2.0);
    let (trend, score) = if significant && pct_change > 0.0 {
        (Trend::Up, 75.0 + magnitude)
    } else if significant {
        (Trend::Down, f64::max(0.0, 25.0 - magnitude))
    } else {
        (Trend::Flat, 50.0 + pct_change / 2.0)
    };
    UsageTrend {
        recent_avg: round1(recent_avg),
        baseline_avg: round1(baseline_avg),
        pct_change: round1(pct_change),
        trend,
        significant,
        score: round1(score.clamp(0.0, 100.0)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ConsistencyGrade {
    #[strum(serialize = "Very Consistent")]
    VeryConsistent,
    Consistent,
    Average,
    Volatile,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyRating {
    /// Coefficient of variation, as a percentage.
    pub cv: f64,
    pub score: f64,
    pub grade: ConsistencyGrade,
}

pub fn consistency(samples: &[f64]) -> ConsistencyRating {
    if samples.len() < MIN_CONSISTENCY_SAMPLES {
        return ConsistencyRating {
            cv: 0.0,
            score: NEUTRAL,
            grade: ConsistencyGrade::Unknown,
        };
    }
    let mean = samples.mean();
    let cv = if mean > 0.0 {
        samples.stdev() / mean * 100.0
    } else {
        100.0
    };
    let (score, grade) = if cv <= 20.0 {
        (100.0 - cv / 20.0 * 10.0, ConsistencyGrade::VeryConsistent)
    } else if cv <= 40.0 {
        (90.0 - (cv - 20.0) / 20.0 * 20.0, ConsistencyGrade::Consistent)
    } else if cv <= 60.0 {
        (70.0 - (cv - 40.0) / 20.0 * 20.0, ConsistencyGrade::Average)
    } else {
        (f64::max(0.0, 50.0 - (cv - 60.0) / 2.0), ConsistencyGrade::Volatile)
    };
    ConsistencyRating {
        cv: round1(cv),
        score: round1(score),
        grade,
    }
}
