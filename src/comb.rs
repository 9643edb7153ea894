//! Combinatorics over _k_-subsets of a pool of _n_ items.
//!
//! Subsets are represented as strictly ascending ordinals and enumerated in lexicographic order.
//! Each subset has a rank in `0..count_combinations(n, k)`; [unrank] maps a rank back to its
//! ordinals so that large subset spaces can be sampled without materialising them.

use rustc_hash::FxHashSet;
use tinyrand::Rand;

/// The binomial coefficient _n_ choose _k_, saturating at [u64::MAX].
///
/// A saturated count understates the subset space. Ranks drawn from `0..u64::MAX` then only reach
/// a lexicographic prefix of it, so sampling by rank is no longer uniform over all subsets.
pub fn count_combinations(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = usize::min(k, n - k);
    let mut count = 1u128;
    for i in 0..k {
        count = match count.checked_mul((n - i) as u128) {
            Some(product) => product / (i + 1) as u128,
            None => return u64::MAX,
        };
        if count > u64::MAX as u128 {
            return u64::MAX;
        }
    }
    count as u64
}

/// Writes the ordinals of the `rank`-th lexicographic _k_-subset of `0..n` into `ordinals`.
pub fn unrank(n: usize, rank: u64, ordinals: &mut [usize]) {
    let k = ordinals.len();
    debug_assert!(k <= n, "cannot pick {k} from {n}");
    let mut residual = rank;
    let mut candidate = 0;
    for (position, ordinal) in ordinals.iter_mut().enumerate() {
        loop {
            let remaining = k - position - 1;
            let completions = count_combinations(n - candidate - 1, remaining);
            if residual < completions {
                break;
            }
            residual -= completions;
            candidate += 1;
        }
        *ordinal = candidate;
        candidate += 1;
    }
}

/// Draws `count` distinct ranks uniformly from `0..total` using Floyd's algorithm. The ranks are
/// returned in the order they were drawn.
///
/// Uniform over ranks only: see [count_combinations] for what a saturated `total` implies.
pub fn sample_ranks(total: u64, count: usize, rand: &mut impl Rand) -> Vec<u64> {
    let count = u64::min(count as u64, total);
    let mut drawn = FxHashSet::default();
    let mut ranks = Vec::with_capacity(count as usize);
    for upper in total - count..total {
        let candidate = rand.next_lim_u64(upper + 1);
        let rank = if drawn.contains(&candidate) { upper } else { candidate };
        drawn.insert(rank);
        ranks.push(rank);
    }
    ranks
}

/// Picks `count` distinct indexes from `0..len` in uniformly random order (a partial
/// Fisher-Yates shuffle).
pub fn sample_indexes(len: usize, count: usize, rand: &mut impl Rand) -> Vec<usize> {
    let mut indexes: Vec<_> = (0..len).collect();
    let count = usize::min(count, len);
    for position in 0..count {
        let swap = position + rand.next_lim_usize(len - position);
        indexes.swap(position, swap);
    }
    indexes.truncate(count);
    indexes
}

/// Lexicographic iterator over all _k_-subsets of `0..n`.
pub struct Combinations {
    n: usize,
    ordinals: Vec<usize>,
    exhausted: bool,
}
impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            ordinals: (0..k).collect(),
            exhausted: k > n,
        }
    }

    fn advance(&mut self) {
        let k = self.ordinals.len();
        let mut position = k;
        while position > 0 {
            position -= 1;
            if self.ordinals[position] < self.n - k + position {
                self.ordinals[position] += 1;
                for next in position + 1..k {
                    self.ordinals[next] = self.ordinals[next - 1] + 1;
                }
                return;
            }
        }
        self.exhausted = true;
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.ordinals.clone();
        self.advance();
        Some(current)
    }
}
