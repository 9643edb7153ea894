//! Search over combinations of eligible props for parlays priced near a target.
//!
//! Leg counts are tried starting from an estimate derived from the average price of the most
//! trusted props, working outward. Small combination spaces are enumerated exhaustively; larger
//! ones are sampled uniformly by rank. Once a subset count saturates at `u64::MAX` (thousands of
//! props at six legs) only a lexicographic prefix of the space is reachable. Combinations within
//! tolerance of the target are accepted; the closest of the rest are kept as a fallback for when
//! nothing is accepted.

use std::ops::RangeInclusive;

use tinyrand::Rand;
use tracing::trace;

use crate::comb::{count_combinations, sample_ranks, unrank, Combinations};
use crate::odds::combined_odds;
use crate::parlay::{parlay_trust, InvalidRequest, Leg, TrustMethod};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Combinations evaluated per leg count, before scaling down for larger parlays.
    pub max_combinations: u64,
    /// Stop trying further leg counts once this many combinations have been accepted.
    pub accept_cap: usize,
    pub closest_cap: usize,
    pub fallback_count: usize,
    pub narrow_tolerance: i64,
    pub wide_tolerance: i64,
    /// Targets at or above this use the wide tolerance.
    pub wide_threshold: i32,
    /// Number of leading props whose prices inform the leg count estimate.
    pub heuristic_sample: usize,
    pub pool_multiplier: usize,
    pub pool_floor: usize,
}
impl SearchConfig {
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.max_combinations == 0 {
            return Err(InvalidRequest::SearchConfig("max combinations must be positive"));
        }
        if self.accept_cap == 0 {
            return Err(InvalidRequest::SearchConfig("accept cap must be positive"));
        }
        if self.fallback_count == 0 || self.fallback_count > self.closest_cap {
            return Err(InvalidRequest::SearchConfig(
                "fallback count must be positive and no greater than the closest cap",
            ));
        }
        if self.narrow_tolerance < 0 || self.wide_tolerance < 0 {
            return Err(InvalidRequest::SearchConfig("tolerances cannot be negative"));
        }
        if self.heuristic_sample == 0 {
            return Err(InvalidRequest::SearchConfig("heuristic sample must be positive"));
        }
        if self.pool_multiplier == 0 {
            return Err(InvalidRequest::SearchConfig("pool multiplier must be positive"));
        }
        Ok(())
    }

    pub fn tolerance(&self, target_odds: i32) -> i64 {
        if target_odds < self.wide_threshold {
            self.narrow_tolerance
        } else {
            self.wide_tolerance
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_combinations: 1_000,
            accept_cap: 20,
            closest_cap: 10,
            fallback_count: 5,
            narrow_tolerance: 100,
            wide_tolerance: 200,
            wide_threshold: 500,
            heuristic_sample: 10,
            pool_multiplier: 3,
            pool_floor: 20,
        }
    }
}

#[derive(Debug)]
pub struct Candidate<'a, L> {
    pub legs: Vec<&'a L>,
    pub odds: i32,
    pub avg_trust: f64,
    pub within_tolerance: bool,
}
impl<'a, L: Leg> Candidate<'a, L> {
    fn new(legs: Vec<&'a L>, odds: i32, within_tolerance: bool) -> Self {
        let avg_trust = parlay_trust(&legs, TrustMethod::Average);
        Self {
            legs,
            odds,
            avg_trust,
            within_tolerance,
        }
    }
}

/// Estimated number of legs needed to reach `target_odds`, judging by the average price of the
/// leading `sample` props. Clamped to `legs`.
pub fn estimate_legs<L: Leg>(
    props: &[L],
    target_odds: i32,
    legs: &RangeInclusive<usize>,
    sample: usize,
) -> usize {
    let leading = &props[..usize::min(sample, props.len())];
    if leading.is_empty() {
        return *legs.start();
    }
    let avg_odds = leading
        .iter()
        .map(|prop| prop.american_odds() as f64)
        .sum::<f64>()
        / leading.len() as f64;
    let per_leg = f64::max(avg_odds.abs() - 100.0, 50.0);
    let estimate = (target_odds as f64 / per_leg) as i64;
    estimate.clamp(*legs.start() as i64, *legs.end() as i64) as usize
}

/// Leg counts in the order they are tried: the estimate, then alternately one fewer and one more,
/// widening until the range is covered.
pub fn leg_order(estimate: usize, legs: &RangeInclusive<usize>) -> Vec<usize> {
    let (min, max) = (*legs.start(), *legs.end());
    let mut order = vec![estimate];
    let reach = usize::max(estimate.saturating_sub(min), max.saturating_sub(estimate));
    for offset in 1..=reach {
        if estimate >= min + offset {
            order.push(estimate - offset);
        }
        if estimate + offset <= max {
            order.push(estimate + offset);
        }
    }
    order
}

struct Closest<'a, L> {
    cap: usize,
    entries: Vec<(Vec<&'a L>, i32, i64)>,
}
impl<'a, L> Closest<'a, L> {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            entries: Vec::with_capacity(cap),
        }
    }

    fn offer(&mut self, legs: Vec<&'a L>, odds: i32, distance: i64) {
        if self.entries.len() < self.cap {
            self.entries.push((legs, odds, distance));
        } else if self
            .entries
            .last()
            .map_or(false, |&(_, _, furthest)| distance < furthest)
        {
            let last = self.entries.len() - 1;
            self.entries[last] = (legs, odds, distance);
        } else {
            return;
        }
        self.entries.sort_by_key(|&(_, _, distance)| distance);
    }
}

struct Tally<'a, L> {
    target_odds: i32,
    tolerance: i64,
    accepted: Vec<Candidate<'a, L>>,
    closest: Closest<'a, L>,
}
impl<'a, L: Leg> Tally<'a, L> {
    fn evaluate(&mut self, props: &[&'a L], ordinals: &[usize]) {
        let combination: Vec<&'a L> = ordinals.iter().map(|&ordinal| props[ordinal]).collect();
        let odds = combined_odds(combination.iter().map(|leg| leg.american_odds()));
        let distance = (odds as i64 - self.target_odds as i64).abs();
        if distance <= self.tolerance {
            self.accepted.push(Candidate::new(combination, odds, true));
        } else {
            self.closest.offer(combination, odds, distance);
        }
    }
}

pub fn find_combinations<'a, L: Leg>(
    props: &[&'a L],
    target_odds: i32,
    legs: RangeInclusive<usize>,
    config: &SearchConfig,
    rand: &mut impl Rand,
) -> Vec<Candidate<'a, L>> {
    if props.is_empty() {
        return vec![];
    }
    let tolerance = config.tolerance(target_odds);
    let estimate = estimate_legs(props, target_odds, &legs, config.heuristic_sample);

    let mut tally = Tally {
        target_odds,
        tolerance,
        accepted: vec![],
        closest: Closest::new(config.closest_cap),
    };
    let n = props.len();
    for num_legs in leg_order(estimate, &legs) {
        if tally.accepted.len() >= config.accept_cap {
            break;
        }
        let total = count_combinations(n, num_legs);
        if total == 0 {
            continue;
        }
        let divisor = u64::max(1, num_legs.saturating_sub(2) as u64);
        let budget = u64::min(config.max_combinations / divisor, total);
        if total > budget {
            trace!("sampling {budget} of {total} {num_legs}-leg combinations");
            let mut ordinals = vec![0; num_legs];
            for rank in sample_ranks(total, budget as usize, rand) {
                unrank(n, rank, &mut ordinals);
                tally.evaluate(props, &ordinals);
            }
        } else {
            trace!("enumerating all {total} {num_legs}-leg combinations");
            for ordinals in Combinations::new(n, num_legs) {
                tally.evaluate(props, &ordinals);
            }
        }
    }

    let Tally {
        accepted, closest, ..
    } = tally;
    if accepted.is_empty() {
        closest
            .entries
            .into_iter()
            .take(config.fallback_count)
            .map(|(legs, odds, _)| Candidate::new(legs, odds, false))
            .collect()
    } else {
        accepted
    }
}
