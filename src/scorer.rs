//! Trust scoring of a single prop. Seven independent factors are computed from the prop's feature
//! vector and collaborator lookups, then combined through a fixed weight table into a 0–100
//! trust score.

use std::ops::Index;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;
use tracing::trace;

use crate::prop::{Prop, StatType};
use crate::stats::{round1, trailing_average, SliceExt};

pub mod factors;
pub mod split;
pub mod streak;
pub mod teammates;


use factors::{ConsistencyRating, RecentHitRate, RestAssessment, UsageTrend};
use split::LocationSplit;
use streak::Streak;
use teammates::{InjuryReport, StatHistory, TeammateBoost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Factor {
    HitRate,
    RecentForm,
    Opponent,
    Teammates,
    Rest,
    Usage,
    Consistency,
}

/// The canonical weighting of factors. Weights sum to 1.
pub const WEIGHTS: [(Factor, f64); Factor::COUNT] = [
    (Factor::HitRate, 0.30),
    (Factor::RecentForm, 0.20),
    (Factor::Opponent, 0.10),
    (Factor::Teammates, 0.10),
    (Factor::Rest, 0.15),
    (Factor::Usage, 0.10),
    (Factor::Consistency, 0.05),
];

/// Flat bonus for playing at home, applied after weighting.
pub const HOME_BONUS: f64 = 5.0;

pub const HOT_THRESHOLD: f64 = 75.0;
pub const COLD_THRESHOLD: f64 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores([f64; Factor::COUNT]);
impl FactorScores {
    pub fn neutral() -> Self {
        Self([factors::NEUTRAL; Factor::COUNT])
    }

    pub fn with(mut self, factor: Factor, score: f64) -> Self {
        self.0[factor.ordinal()] = score;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::iter().map(|factor| (factor, self[factor]))
    }
}

impl Index<Factor> for FactorScores {
    type Output = f64;

    fn index(&self, factor: Factor) -> &Self::Output {
        &self.0[factor.ordinal()]
    }
}

/// Weighted sum of the factor scores plus the home bonus, clamped to 0–100.
pub fn trust_score(scores: &FactorScores, is_home: bool) -> f64 {
    let weighted: f64 = WEIGHTS
        .iter()
        .map(|&(factor, weight)| scores[factor] * weight)
        .sum();
    let score = if is_home {
        weighted + HOME_BONUS
    } else {
        weighted
    };
    round1(score.clamp(0.0, 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    #[strum(serialize = "hot")]
    Hot,
    #[strum(serialize = "cold")]
    Cold,
    #[strum(serialize = "neutral")]
    Neutral,
}
impl Form {
    pub fn from_trust(trust_score: f64) -> Self {
        if trust_score >= HOT_THRESHOLD {
            Form::Hot
        } else if trust_score <= COLD_THRESHOLD {
            Form::Cold
        } else {
            Form::Neutral
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub recent_hit_window: usize,
    pub form_window: usize,
    pub usage_recent_window: usize,
    pub usage_baseline_window: usize,
    pub split_threshold: f64,
}
impl ScorerConfig {
    pub fn validate(&self) -> Result<(), InvalidScorerConfig> {
        if self.recent_hit_window == 0 {
            return Err(InvalidScorerConfig("recent hit window must be positive"));
        }
        if self.form_window == 0 {
            return Err(InvalidScorerConfig("form window must be positive"));
        }
        if self.usage_recent_window == 0 || self.usage_baseline_window == 0 {
            return Err(InvalidScorerConfig("usage windows must be positive"));
        }
        if !self.split_threshold.is_finite() || self.split_threshold < 0.0 {
            return Err(InvalidScorerConfig("split threshold must be non-negative"));
        }
        Ok(())
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            recent_hit_window: 10,
            form_window: 3,
            usage_recent_window: 5,
            usage_baseline_window: 15,
            split_threshold: split::DEFAULT_SPLIT_THRESHOLD,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid scorer config: {0}")]
pub struct InvalidScorerConfig(&'static str);

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("line {line} for {player} is not a finite number")]
    NonFiniteLine { player: String, line: f64 },

    #[error("sample {index} for {player} is not a finite number")]
    NonFiniteSample { player: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProp {
    pub player_name: String,
    pub team: String,
    pub opponent: String,
    pub stat_type: StatType,
    pub line: f64,
    pub opponent_rank: i32,
    pub is_home: bool,
    pub american_odds: i32,
    pub hit_rate: f64,
    pub season_hits: usize,
    pub total_games: usize,
    pub recent: RecentHitRate,
    pub factors: FactorScores,
    pub trust_score: f64,
    pub form: Form,
    pub streak: Streak,
    pub avg_last_5: Option<f64>,
    pub avg_last_10: Option<f64>,
    pub avg_last_15: Option<f64>,
    pub last_5_games: Vec<f64>,
    pub last_games: Vec<f64>,
    pub last_15_games: Vec<f64>,
    pub rest: RestAssessment,
    pub usage: UsageTrend,
    pub consistency: ConsistencyRating,
    pub teammates: TeammateBoost,
    pub location: Option<LocationSplit>,
}

/// Scores props against optional injury and stat history collaborators. Without collaborators,
/// the teammate factor stays neutral.
#[derive(Default)]
pub struct Scorer<'a> {
    config: ScorerConfig,
    injuries: Option<&'a dyn InjuryReport>,
    history: Option<&'a dyn StatHistory>,
}
impl<'a> Scorer<'a> {
    pub fn new(config: ScorerConfig) -> Result<Self, InvalidScorerConfig> {
        config.validate()?;
        Ok(Self {
            config,
            injuries: None,
            history: None,
        })
    }

    pub fn with_injuries(mut self, injuries: &'a dyn InjuryReport) -> Self {
        self.injuries = Some(injuries);
        self
    }

    pub fn with_history(mut self, history: &'a dyn StatHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn teammate_boost(&self, prop: &Prop) -> TeammateBoost {
        match (self.injuries, self.history) {
            (Some(injuries), Some(history)) => teammates::teammate_boost(
                &prop.player_name,
                &prop.team,
                prop.stat_type,
                injuries,
                history,
            ),
            _ => TeammateBoost::neutral(),
        }
    }

    pub fn score(&self, prop: &Prop) -> Result<ScoredProp, ScoreError> {
        validate_numbers(prop)?;
        let config = &self.config;
        let samples = &prop.feature_samples[..];
        let line = prop.line;

        let hit_rate = factors::hit_rate(samples, line);
        let recent = factors::recent_hit_rate(samples, line, config.recent_hit_window);
        let rest = factors::rest_factor(prop.rest_days);
        let usage = factors::usage_trend(
            samples,
            config.usage_recent_window,
            config.usage_baseline_window,
        );
        let consistency = factors::consistency(samples);
        let teammates = self.teammate_boost(prop);

        let scores = FactorScores::neutral()
            .with(Factor::HitRate, hit_rate)
            .with(Factor::RecentForm, factors::recent_form(samples, line, config.form_window))
            .with(Factor::Opponent, factors::opponent_difficulty(prop.opponent_rank))
            .with(Factor::Teammates, teammates.score)
            .with(Factor::Rest, rest.score)
            .with(Factor::Usage, usage.score)
            .with(Factor::Consistency, consistency.score);
        let trust_score = trust_score(&scores, prop.is_home);
        trace!(
            "{} {} {}: factors {scores:?}, trust {trust_score}",
            prop.player_name,
            prop.stat_type,
            line
        );

        let total_games = samples.len();
        let season_hits = (hit_rate / 100.0 * total_games as f64).round() as usize;

        Ok(ScoredProp {
            player_name: prop.player_name.clone(),
            team: prop.team.clone(),
            opponent: prop.opponent.clone(),
            stat_type: prop.stat_type,
            line,
            opponent_rank: prop.opponent_rank,
            is_home: prop.is_home,
            american_odds: prop.price(),
            hit_rate,
            season_hits,
            total_games,
            recent,
            factors: scores,
            trust_score,
            form: Form::from_trust(trust_score),
            streak: streak::detect_streak(samples, line),
            avg_last_5: trailing_average(samples, 5),
            avg_last_10: trailing_average(samples, 10),
            avg_last_15: trailing_average(samples, 15),
            last_5_games: samples.trailing(5).to_vec(),
            last_games: samples.trailing(10).to_vec(),
            last_15_games: samples.trailing(15).to_vec(),
            rest,
            usage,
            consistency,
            teammates,
            location: prop.location_split.as_ref().map(|location_split| {
                split::assess_location(location_split, prop.is_home, config.split_threshold)
            }),
        })
    }

    pub fn score_all(&self, props: &[Prop]) -> Result<Vec<ScoredProp>, ScoreError> {
        props.iter().map(|prop| self.score(prop)).collect()
    }
}

fn validate_numbers(prop: &Prop) -> Result<(), ScoreError> {
    if !prop.line.is_finite() {
        return Err(ScoreError::NonFiniteLine {
            player: prop.player_name.clone(),
            line: prop.line,
        });
    }
    if let Some(index) = prop.feature_samples.iter().position(|sample| !sample.is_finite()) {
        return Err(ScoreError::NonFiniteSample {
            player: prop.player_name.clone(),
            index,
        });
    }
    Ok(())
}
