//! A slate of props for one day of games, together with the injury and stat history data the
//! scorer consults. Slates are read from JSON:
//!
//! ```json
//! {
//!   "props": [{"player_name": "LeBron James", "team": "LAL", "opponent": "GSW",
//!              "stat_type": "Points", "line": 24.5, "feature_samples": [28, 26, 22],
//!              "opponent_rank": 12, "is_home": true}],
//!   "injuries": {"LAL": [{"player_name": "Anthony Davis", "status": "OUT"}]},
//!   "histories": {"Anthony Davis": {"Points": [26, 31, 24]}}
//! }
//! ```
//!
//! A prop without a `line` is assigned the fair line of its samples.

use std::fs::File;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::from_reader;
use thiserror::Error;
use tracing::debug;

use crate::prop::{HomeAwaySplit, Prop, StatType};
use crate::scorer::teammates::{Injury, InjuryReport, StatHistory};
use crate::scorer::{InvalidScorerConfig, ScoreError, ScoredProp, Scorer, ScorerConfig};
use crate::stats::{fair_line, SliceExt};

/// Fewest samples from which a missing line may be derived.
pub const MIN_LINE_SAMPLES: usize = 5;

#[derive(Debug, Error)]
pub enum SlateError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("no line for {player} {stat} and only {samples} samples to derive one from")]
    MissingLine {
        player: String,
        stat: StatType,
        samples: usize,
    },

    #[error("{0}")]
    InvalidConfig(#[from] InvalidScorerConfig),

    #[error("{0}")]
    Score(#[from] ScoreError),
}

#[derive(Debug, Deserialize)]
struct PropEntry {
    player_name: String,
    team: String,
    opponent: String,
    stat_type: StatType,
    #[serde(default)]
    line: Option<f64>,
    feature_samples: Vec<f64>,
    opponent_rank: i32,
    is_home: bool,
    #[serde(default)]
    american_odds: Option<i32>,
    #[serde(default)]
    rest_days: Option<u32>,
    #[serde(default)]
    location_split: Option<HomeAwaySplit>,
}
impl TryFrom<PropEntry> for Prop {
    type Error = SlateError;

    fn try_from(entry: PropEntry) -> Result<Self, Self::Error> {
        let line = match entry.line {
            Some(line) => line,
            None if entry.feature_samples.len() >= MIN_LINE_SAMPLES => {
                fair_line(&entry.feature_samples)
            }
            None => {
                return Err(SlateError::MissingLine {
                    player: entry.player_name,
                    stat: entry.stat_type,
                    samples: entry.feature_samples.len(),
                })
            }
        };
        Ok(Prop {
            player_name: entry.player_name,
            team: entry.team,
            opponent: entry.opponent,
            stat_type: entry.stat_type,
            line,
            feature_samples: entry.feature_samples,
            opponent_rank: entry.opponent_rank,
            is_home: entry.is_home,
            american_odds: entry.american_odds,
            rest_days: entry.rest_days,
            location_split: entry.location_split,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SlateFile {
    props: Vec<PropEntry>,
    #[serde(default)]
    injuries: FxHashMap<String, Vec<Injury>>,
    #[serde(default)]
    histories: FxHashMap<String, FxHashMap<StatType, Vec<f64>>>,
}

#[derive(Debug, Default)]
pub struct Slate {
    props: Vec<Prop>,
    injuries: FxHashMap<String, Vec<Injury>>,
    histories: FxHashMap<String, FxHashMap<StatType, Vec<f64>>>,
}
impl Slate {
    pub fn new(props: Vec<Prop>) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }

    pub fn with_injury(mut self, team: impl Into<String>, injury: Injury) -> Self {
        self.injuries.entry(team.into()).or_default().push(injury);
        self
    }

    pub fn with_history(mut self, player: impl Into<String>, stat: StatType, samples: Vec<f64>) -> Self {
        self.histories
            .entry(player.into())
            .or_default()
            .insert(stat, samples);
        self
    }

    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, SlateError> {
        let file = File::open(path)?;
        let slate_file: SlateFile = from_reader(file)?;
        Self::try_from(slate_file)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SlateError> {
        let slate_file: SlateFile = serde_json::from_str(json)?;
        Self::try_from(slate_file)
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Scores every prop on the slate, consulting the slate's own injuries and histories.
    pub fn score(&self, config: ScorerConfig) -> Result<Vec<ScoredProp>, SlateError> {
        let scorer = Scorer::new(config)?.with_injuries(self).with_history(self);
        Ok(scorer.score_all(&self.props)?)
    }
}

impl TryFrom<SlateFile> for Slate {
    type Error = SlateError;

    fn try_from(slate_file: SlateFile) -> Result<Self, Self::Error> {
        let props = slate_file
            .props
            .into_iter()
            .map(Prop::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "loaded slate with {} props, {} teams reporting injuries, {} player histories",
            props.len(),
            slate_file.injuries.len(),
            slate_file.histories.len()
        );
        Ok(Self {
            props,
            injuries: slate_file.injuries,
            histories: slate_file.histories,
        })
    }
}

impl InjuryReport for Slate {
    fn injuries(&self, team: &str) -> Vec<Injury> {
        self.injuries.get(team).cloned().unwrap_or_default()
    }
}

impl StatHistory for Slate {
    /// Explicit histories take precedence. Failing that, the samples of a prop on the slate for the
    /// same player and stat are used.
    fn recent_stat_history(&self, player: &str, stat: StatType, n: usize) -> Vec<f64> {
        let history = self
            .histories
            .get(player)
            .and_then(|stats| stats.get(&stat))
            .or_else(|| {
                self.props
                    .iter()
                    .find(|prop| prop.player_name == player && prop.stat_type == stat)
                    .map(|prop| &prop.feature_samples)
            });
        history
            .map(|samples| samples.trailing(n).to_vec())
            .unwrap_or_default()
    }
}
