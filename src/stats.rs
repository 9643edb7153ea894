//! Descriptive statistics over historical samples.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn mean(&self) -> f64;
    fn stdev(&self) -> f64;
    fn count_over(&self, line: f64) -> usize;
    fn trailing(&self, n: usize) -> &Self;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Arithmetic mean; 0 for an empty slice.
    fn mean(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.sum() / self.len() as f64
        }
    }

    /// Population standard deviation.
    fn stdev(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .iter()
            .map(|&sample| (sample - mean).powi(2))
            .sum::<f64>()
            / self.len() as f64;
        variance.sqrt()
    }

    fn count_over(&self, line: f64) -> usize {
        self.iter().filter(|&&sample| sample > line).count()
    }

    /// The last `n` elements, or the entire slice if it is shorter.
    fn trailing(&self, n: usize) -> &Self {
        &self[self.len().saturating_sub(n)..]
    }
}

/// Rounds the exact binary value of `value` to a multiple of `1 / scale`, ties to even.
///
/// The scaled product is itself rounded, so a product that lands on a tie may stand for an exact
/// value slightly to either side of it. The residual of the product, recovered with a fused
/// multiply-add, settles which.
fn round_scaled(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round_ties_even() / scale;
    }
    let residual = value.mul_add(scale, -scaled);
    let rounded = if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / scale
}

/// Rounds to one decimal place, ties to even.
#[inline]
pub fn round1(value: f64) -> f64 {
    round_scaled(value, 10.0)
}

#[inline]
pub fn round2(value: f64) -> f64 {
    round_scaled(value, 100.0)
}

/// Mean of the last `n` samples, rounded to one decimal, or `None` if fewer than `n` exist.
pub fn trailing_average(samples: &[f64], n: usize) -> Option<f64> {
    if n == 0 || samples.len() < n {
        None
    } else {
        Some(round1(samples.trailing(n).mean()))
    }
}

/// Nearest half-unit to the mean, the fallback line when no bookmaker has quoted one.
pub fn fair_line(samples: &[f64]) -> f64 {
    (samples.mean() * 2.0).round_ties_even() / 2.0
}
