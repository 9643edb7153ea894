//! Compact `Display` adapters for console output.

use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// A stat sample, shown without a fractional part when it is whole.
#[derive(Debug, Clone, Copy)]
pub struct DisplaySample(pub f64);

impl Display for DisplaySample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

/// Formats a sequence of samples as `[28, 26, 22.5]`.
pub struct DisplaySamples<'a> {
    samples: &'a [f64],
}

impl<'a> From<&'a [f64]> for DisplaySamples<'a> {
    fn from(samples: &'a [f64]) -> Self {
        DisplaySamples { samples }
    }
}

impl<'a> Display for DisplaySamples<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, &sample) in self.samples.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", DisplaySample(sample))?;
        }
        write!(f, "]")
    }
}

/// Formats an optional value, substituting a dash for `None`.
pub struct DisplayOption<'a, D: Display>(pub &'a Option<D>);

impl<'a, D: Display> Display for DisplayOption<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "-"),
            Some(value) => write!(f, "{value}"),
        }
    }
}

pub struct DisplayRangeInclusive<'a, D: Display> {
    range: &'a RangeInclusive<D>,
}

impl<'a, D: Display> From<&'a RangeInclusive<D>> for DisplayRangeInclusive<'a, D> {
    fn from(range: &'a RangeInclusive<D>) -> Self {
        DisplayRangeInclusive { range }
    }
}

impl<'a, D: Display> Display for DisplayRangeInclusive<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.range.start(), self.range.end())
    }
}
