//! Construction of multi-leg parlays whose combined price lands near a target.
//!
//! Props are screened by a trust floor and a game filter, combinations of the survivors are
//! searched for a combined price within tolerance of the target, and a randomised selection is
//! drawn from the most trusted of them. Requests that cannot be satisfied yield a [Proposal]
//! carrying guidance rather than an error; errors are reserved for malformed requests.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyrand::Rand;
use tracing::debug;

use crate::comb::sample_indexes;
use crate::odds::{american_to_decimal, combined_odds, display_american};
use crate::prop::GameId;
use crate::scorer::ScoredProp;
use crate::stats::{round1, round2};

pub mod filter;
pub mod search;

#[cfg(test)]
mod tests;

use search::{Candidate, SearchConfig};

/// Anything that can be a leg of a parlay.
pub trait Leg {
    fn trust_score(&self) -> f64;

    fn american_odds(&self) -> i32;

    fn game_id(&self) -> GameId;
}

impl Leg for ScoredProp {
    fn trust_score(&self) -> f64 {
        self.trust_score
    }

    fn american_odds(&self) -> i32 {
        self.american_odds
    }

    fn game_id(&self) -> GameId {
        GameId::new(&self.team, &self.opponent)
    }
}

impl<L: Leg> Leg for &L {
    fn trust_score(&self) -> f64 {
        (*self).trust_score()
    }

    fn american_odds(&self) -> i32 {
        (*self).american_odds()
    }

    fn game_id(&self) -> GameId {
        (*self).game_id()
    }
}

#[derive(Debug, Error)]
pub enum InvalidRequest {
    #[error("unknown safety level '{0}'")]
    UnknownSafetyLevel(String),

    #[error("unknown game filter '{0}'")]
    UnknownGameFilter(String),

    #[error("min legs ({min}) cannot exceed max legs ({max})")]
    LegBounds { min: usize, max: usize },

    #[error("a parlay needs at least one leg")]
    ZeroLegs,

    #[error("at least one suggestion must be requested")]
    ZeroSuggestions,

    #[error("invalid search config: {0}")]
    SearchConfig(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Conservative,
    Moderate,
    Aggressive,
}
impl SafetyLevel {
    /// The trust score every leg must reach.
    pub fn min_trust(&self) -> f64 {
        match self {
            SafetyLevel::Conservative => 70.0,
            SafetyLevel::Moderate => 60.0,
            SafetyLevel::Aggressive => 50.0,
        }
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SafetyLevel::Conservative => "conservative",
            SafetyLevel::Moderate => "moderate",
            SafetyLevel::Aggressive => "aggressive",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SafetyLevel {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(SafetyLevel::Conservative),
            "moderate" => Ok(SafetyLevel::Moderate),
            "aggressive" => Ok(SafetyLevel::Aggressive),
            _ => Err(InvalidRequest::UnknownSafetyLevel(s.into())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFilterMode {
    Any,
    Single,
    Specific,
}

impl FromStr for GameFilterMode {
    type Err = InvalidRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(GameFilterMode::Any),
            "single" => Ok(GameFilterMode::Single),
            "specific" => Ok(GameFilterMode::Specific),
            _ => Err(InvalidRequest::UnknownGameFilter(s.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameFilter {
    /// At most one prop per game, keeping legs uncorrelated. Games are keyed by
    /// `{team}_vs_{opponent}` as seen from each prop, so props of opposing teams in the same
    /// game (`LAL_vs_GSW` and `GSW_vs_LAL`) are treated as separate games and may both survive.
    Any,
    /// Only props from the game offering the most eligible props.
    Single,
    /// Only props from the listed games. An empty list does not filter.
    Specific(Vec<GameId>),
}
impl GameFilter {
    pub fn new(mode: GameFilterMode, games: Vec<GameId>) -> Self {
        match mode {
            GameFilterMode::Any => GameFilter::Any,
            GameFilterMode::Single => GameFilter::Single,
            GameFilterMode::Specific => GameFilter::Specific(games),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustMethod {
    /// Arithmetic mean of the legs' trust scores.
    Average,
    /// Product of the legs' trust scores read as independent win probabilities. A heuristic: trust
    /// scores are not calibrated probabilities.
    Probability,
}

pub fn parlay_trust<L: Leg>(legs: &[L], method: TrustMethod) -> f64 {
    if legs.is_empty() {
        return 0.0;
    }
    match method {
        TrustMethod::Average => {
            round1(legs.iter().map(Leg::trust_score).sum::<f64>() / legs.len() as f64)
        }
        TrustMethod::Probability => round1(
            legs.iter()
                .map(|leg| leg.trust_score() / 100.0)
                .product::<f64>()
                * 100.0,
        ),
    }
}

pub fn parlay_odds<L: Leg>(legs: &[L]) -> i32 {
    combined_odds(legs.iter().map(Leg::american_odds))
}

#[derive(Debug, Clone)]
pub struct ParlayRequest {
    pub target_odds: i32,
    pub safety_level: SafetyLevel,
    pub game_filter: GameFilter,
    pub num_suggestions: usize,
    pub min_legs: usize,
    pub max_legs: usize,
    pub search: SearchConfig,
}
impl ParlayRequest {
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.min_legs == 0 {
            return Err(InvalidRequest::ZeroLegs);
        }
        if self.min_legs > self.max_legs {
            return Err(InvalidRequest::LegBounds {
                min: self.min_legs,
                max: self.max_legs,
            });
        }
        if self.num_suggestions == 0 {
            return Err(InvalidRequest::ZeroSuggestions);
        }
        self.search.validate()
    }
}

impl Default for ParlayRequest {
    fn default() -> Self {
        Self {
            target_odds: 400,
            safety_level: SafetyLevel::Moderate,
            game_filter: GameFilter::Any,
            num_suggestions: 1,
            min_legs: 2,
            max_legs: 6,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParlaySuggestion<'a, L> {
    pub legs: Vec<&'a L>,
    pub num_legs: usize,
    pub parlay_odds: i32,
    pub parlay_odds_display: String,
    pub avg_trust: f64,
    pub true_win_rate: f64,
    pub safety_level: SafetyLevel,
    pub payout_per_dollar: f64,
    /// False when the combination is one of the closest found rather than within tolerance.
    pub within_tolerance: bool,
}
impl<'a, L: Leg> ParlaySuggestion<'a, L> {
    fn new(candidate: Candidate<'a, L>, safety_level: SafetyLevel) -> Self {
        let Candidate {
            legs,
            odds,
            avg_trust,
            within_tolerance,
        } = candidate;
        Self {
            num_legs: legs.len(),
            parlay_odds: odds,
            parlay_odds_display: display_american(odds),
            avg_trust,
            true_win_rate: parlay_trust(&legs, TrustMethod::Probability),
            safety_level,
            payout_per_dollar: round2(american_to_decimal(odds)),
            within_tolerance,
            legs,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposal<'a, L> {
    Suggestions(Vec<ParlaySuggestion<'a, L>>),
    /// No prop reached the trust floor of the requested safety level.
    NoTrustedProps { min_trust: f64 },
    /// The game filter removed every trusted prop.
    NoGameMatches,
    /// No combination of the eligible props could be formed.
    NoCombination {
        target_odds: i32,
        safety_level: SafetyLevel,
        min_trust: f64,
        available_props: usize,
        /// Mean trust of the five most trusted eligible props.
        avg_trust: f64,
    },
}
impl<'a, L> Proposal<'a, L> {
    pub fn suggestions(&self) -> Option<&[ParlaySuggestion<'a, L>]> {
        match self {
            Proposal::Suggestions(suggestions) => Some(suggestions),
            _ => None,
        }
    }

    /// What went wrong, for proposals without suggestions.
    pub fn error(&self) -> Option<String> {
        match self {
            Proposal::Suggestions(_) => None,
            Proposal::NoTrustedProps { min_trust } => {
                Some(format!("No props found with trust score >= {min_trust:.1}%"))
            }
            Proposal::NoGameMatches => Some("No props found matching game filter".into()),
            Proposal::NoCombination { target_odds, .. } => Some(format!(
                "Could not find parlay matching {} odds",
                display_american(*target_odds)
            )),
        }
    }

    /// How the caller might relax the request.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Proposal::Suggestions(_) => None,
            Proposal::NoTrustedProps { .. } => {
                Some("Try lowering safety level or adjusting filters".into())
            }
            Proposal::NoGameMatches => Some("Try different game selection".into()),
            Proposal::NoCombination {
                safety_level,
                min_trust,
                ..
            } => Some(format!(
                "With {safety_level} safety ({min_trust:.1}%+ trust), try lowering target odds or increasing max legs"
            )),
        }
    }
}

/// Mean trust of the top five props, which are assumed sorted by descending trust.
const GUIDANCE_SAMPLE: usize = 5;

pub fn build_parlays<'a, L: Leg>(
    props: &'a [L],
    request: &ParlayRequest,
    rand: &mut impl Rand,
) -> Result<Proposal<'a, L>, InvalidRequest> {
    request.validate()?;
    let start = Instant::now();
    let min_trust = request.safety_level.min_trust();

    let trusted = filter::by_trust(props, min_trust);
    if trusted.is_empty() {
        debug!("no props at or above {min_trust} trust out of {}", props.len());
        return Ok(Proposal::NoTrustedProps { min_trust });
    }

    let mut eligible = filter::by_game(trusted, &request.game_filter);
    if eligible.is_empty() {
        debug!("game filter {:?} removed all trusted props", request.game_filter);
        return Ok(Proposal::NoGameMatches);
    }
    eligible.sort_by(|a, b| b.trust_score().total_cmp(&a.trust_score()));

    let mut candidates = search::find_combinations(
        &eligible,
        request.target_odds,
        request.min_legs..=request.max_legs,
        &request.search,
        rand,
    );
    if candidates.is_empty() {
        let top = &eligible[..usize::min(GUIDANCE_SAMPLE, eligible.len())];
        let avg_trust = top.iter().map(|leg| leg.trust_score()).sum::<f64>() / top.len() as f64;
        return Ok(Proposal::NoCombination {
            target_odds: request.target_odds,
            safety_level: request.safety_level,
            min_trust,
            available_props: eligible.len(),
            avg_trust: round1(avg_trust),
        });
    }

    candidates.sort_by(|a, b| b.avg_trust.total_cmp(&a.avg_trust));
    let num_suggestions = request.num_suggestions;
    let pool_size = usize::max(
        num_suggestions.saturating_mul(request.search.pool_multiplier),
        usize::min(request.search.pool_floor, candidates.len()),
    );
    candidates.truncate(pool_size);

    let selected = if candidates.len() > num_suggestions {
        let picks = sample_indexes(candidates.len(), num_suggestions, rand);
        let mut pool: Vec<_> = candidates.into_iter().map(Some).collect();
        picks
            .into_iter()
            .filter_map(|index| pool[index].take())
            .collect()
    } else {
        candidates
    };

    let suggestions: Vec<_> = selected
        .into_iter()
        .map(|candidate| ParlaySuggestion::new(candidate, request.safety_level))
        .collect();
    debug!(
        "built {} suggestions from {} eligible props in {:?}",
        suggestions.len(),
        eligible.len(),
        start.elapsed()
    );
    Ok(Proposal::Suggestions(suggestions))
}
