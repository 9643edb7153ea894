//! Domain types describing a player prop and its feature vector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::odds::STANDARD_PRICE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize, Deserialize)]
pub enum StatType {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    #[strum(serialize = "3PM")]
    #[serde(rename = "3PM")]
    ThreesMade,
    #[strum(serialize = "PRA")]
    #[serde(rename = "PRA")]
    PointsReboundsAssists,
    #[strum(serialize = "PA")]
    #[serde(rename = "PA")]
    PointsAssists,
    #[strum(serialize = "PR")]
    #[serde(rename = "PR")]
    PointsRebounds,
    #[strum(serialize = "RA")]
    #[serde(rename = "RA")]
    ReboundsAssists,
}
impl StatType {
    /// Trailing average above which a player counts as a star at this stat. Stat types without a
    /// threshold never produce stars.
    pub fn star_threshold(&self) -> Option<f64> {
        match self {
            StatType::Points => Some(20.0),
            StatType::Assists => Some(7.0),
            StatType::Rebounds => Some(10.0),
            StatType::PointsReboundsAssists => Some(35.0),
            StatType::PointsAssists => Some(27.0),
            StatType::PointsRebounds => Some(30.0),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported stat type '{0}'")]
pub struct StatTypeParseError(String);

impl FromStr for StatType {
    type Err = StatTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "points" | "pts" => Ok(StatType::Points),
            "rebounds" | "reb" => Ok(StatType::Rebounds),
            "assists" | "ast" => Ok(StatType::Assists),
            "steals" | "stl" => Ok(StatType::Steals),
            "blocks" | "blk" => Ok(StatType::Blocks),
            "3pm" | "three_pm" => Ok(StatType::ThreesMade),
            "pra" => Ok(StatType::PointsReboundsAssists),
            "pa" => Ok(StatType::PointsAssists),
            "pr" => Ok(StatType::PointsRebounds),
            "ra" => Ok(StatType::ReboundsAssists),
            _ => Err(StatTypeParseError(s.into())),
        }
    }
}

/// The side of the line a sample fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[strum(serialize = "over")]
    Over,
    #[strum(serialize = "under")]
    Under,
}
impl Side {
    #[inline]
    pub fn classify(sample: f64, line: f64) -> Self {
        if sample > line {
            Side::Over
        } else {
            Side::Under
        }
    }
}

/// Identifies a game from the perspective of one team, in the form `{team}_vs_{opponent}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);
impl GameId {
    pub fn new(team: &str, opponent: &str) -> Self {
        Self(format!("{team}_vs_{opponent}"))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeAwaySplit {
    pub home_avg: f64,
    pub away_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub player_name: String,
    pub team: String,
    pub opponent: String,
    pub stat_type: StatType,
    pub line: f64,
    pub feature_samples: Vec<f64>,
    pub opponent_rank: i32,
    pub is_home: bool,
    #[serde(default)]
    pub american_odds: Option<i32>,
    #[serde(default)]
    pub rest_days: Option<u32>,
    #[serde(default)]
    pub location_split: Option<HomeAwaySplit>,
}
impl Prop {
    pub fn game_id(&self) -> GameId {
        GameId::new(&self.team, &self.opponent)
    }

    pub fn price(&self) -> i32 {
        self.american_odds.unwrap_or(STANDARD_PRICE)
    }
}
