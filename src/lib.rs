//! Trust scoring of player props and construction of parlays priced near a target.
//!
//! A prop's historical samples and context (opponent, venue, rest, injured teammates) are reduced
//! to seven factor scores and weighted into a single 0–100 trust score. Scored props are then
//! combined into multi-leg parlays whose combined American odds land within tolerance of a target,
//! subject to a trust floor and game-correlation rules.

pub mod comb;
pub mod display;
pub mod odds;
pub mod parlay;
pub mod print;
pub mod prop;
pub mod scorer;
pub mod slate;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
