//! Boost from injured star teammates. A star sitting out frees up usage for the remaining roster,
//! so each verified star reported out (or doubtful) lifts the score above neutral.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::prop::StatType;
use crate::scorer::factors::NEUTRAL;
use crate::stats::SliceExt;

/// Number of trailing games inspected when verifying a star.
pub const STAR_WINDOW: usize = 10;

/// Fewest trailing games from which a star can be verified.
pub const MIN_STAR_SAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjuryStatus {
    #[strum(serialize = "OUT")]
    Out,
    #[strum(serialize = "DOUBTFUL")]
    Doubtful,
    #[strum(serialize = "QUESTIONABLE")]
    Questionable,
    #[strum(serialize = "PROBABLE")]
    Probable,
    #[strum(serialize = "ACTIVE")]
    Active,
}
impl InjuryStatus {
    /// Points added to the boost when a star teammate carries this status.
    pub fn boost(&self) -> f64 {
        match self {
            InjuryStatus::Out => 25.0,
            InjuryStatus::Doubtful => 12.5,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injury {
    pub player_name: String,
    pub status: InjuryStatus,
}

/// Read-only access to injury reports.
pub trait InjuryReport {
    /// Injuries reported for the given team; empty if there is nothing on file.
    fn injuries(&self, team: &str) -> Vec<Injury>;
}

/// Read-only access to players' stat histories.
pub trait StatHistory {
    /// Up to `n` most recent values of `stat` for `player`, oldest first; empty if unknown.
    fn recent_stat_history(&self, player: &str, stat: StatType, n: usize) -> Vec<f64>;
}

/// Whether the trailing average of `history` exceeds the star threshold for `stat`.
pub fn is_star(history: &[f64], stat: StatType) -> bool {
    let Some(threshold) = stat.star_threshold() else {
        return false;
    };
    let trailing = history.trailing(STAR_WINDOW);
    trailing.len() >= MIN_STAR_SAMPLES && trailing.mean() > threshold
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeammateBoost {
    pub score: f64,
    /// Injured stars that contributed to the boost.
    pub absent_stars: Vec<Injury>,
}
impl TeammateBoost {
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL,
            absent_stars: vec![],
        }
    }
}

pub fn teammate_boost(
    player: &str,
    team: &str,
    stat: StatType,
    injuries: &dyn InjuryReport,
    history: &dyn StatHistory,
) -> TeammateBoost {
    let mut boost = TeammateBoost::neutral();
    for injury in injuries.injuries(team) {
        if injury.player_name == player || injury.status.boost() == 0.0 {
            continue;
        }
        let teammate_history = history.recent_stat_history(&injury.player_name, stat, STAR_WINDOW);
        if is_star(&teammate_history, stat) {
            boost.score = f64::min(100.0, boost.score + injury.status.boost());
            boost.absent_stars.push(injury);
        }
    }
    boost
}
