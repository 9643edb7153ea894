//! Home/away split analysis: whether the venue of the upcoming game suits the player.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::prop::HomeAwaySplit;

pub const DEFAULT_SPLIT_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Venue {
    #[strum(serialize = "home")]
    Home,
    #[strum(serialize = "away")]
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitVerdict {
    Favourable,
    Unfavourable,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSplit {
    pub verdict: SplitVerdict,
    /// Home average minus away average.
    pub difference: f64,
    pub message: Option<String>,
}

pub fn assess_location(split: &HomeAwaySplit, is_home: bool, threshold: f64) -> LocationSplit {
    let difference = split.home_avg - split.away_avg;
    if difference.abs() < threshold {
        return LocationSplit {
            verdict: SplitVerdict::Neutral,
            difference,
            message: None,
        };
    }
    let (venue, better, worse) = if is_home {
        (Venue::Home, split.home_avg, split.away_avg)
    } else {
        (Venue::Away, split.away_avg, split.home_avg)
    };
    let margin = better - worse;
    let (verdict, message) = if margin > 0.0 {
        (
            SplitVerdict::Favourable,
            format!("averages {margin:.1} more when playing {venue} ({better:.1} vs {worse:.1})"),
        )
    } else {
        (
            SplitVerdict::Unfavourable,
            format!(
                "averages {:.1} less when playing {venue} ({better:.1} vs {worse:.1})",
                -margin
            ),
        )
    };
    LocationSplit {
        verdict,
        difference,
        message: Some(message),
    }
}
