//! Conversions between American and decimal odds, and the combined price of a parlay.
//!
//! The inverse conversion truncates toward zero rather than rounding. This makes the round trip
//! lossy for some prices (−110 comes back as −109), which is the behaviour downstream consumers
//! expect to reproduce.

/// Price assumed for a leg when the bookmaker did not quote one.
pub const STANDARD_PRICE: i32 = -110;

pub trait MarketPrice {
    fn american(&self) -> i32;

    fn decimal(&self) -> f64 {
        american_to_decimal(self.american())
    }
}

impl MarketPrice for i32 {
    fn american(&self) -> i32 {
        *self
    }
}

#[inline]
pub fn american_to_decimal(american: i32) -> f64 {
    if american > 0 {
        american as f64 / 100.0 + 1.0
    } else {
        100.0 / (american as f64).abs() + 1.0
    }
}

/// Untruncated inverse of [american_to_decimal].
#[inline]
pub fn decimal_to_american_exact(decimal: f64) -> f64 {
    if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    }
}

#[inline]
pub fn decimal_to_american(decimal: f64) -> i32 {
    decimal_to_american_exact(decimal) as i32
}

/// Multiplies the decimal prices of all legs and converts the product back to American odds.
/// An empty parlay has no price and yields 0.
pub fn combined_odds<P: MarketPrice>(legs: impl IntoIterator<Item = P>) -> i32 {
    let mut legs = legs.into_iter().peekable();
    if legs.peek().is_none() {
        return 0;
    }
    let product: f64 = legs.map(|leg| leg.decimal()).product();
    decimal_to_american(product)
}

/// Formats American odds with an explicit sign for positive prices.
pub fn display_american(american: i32) -> String {
    if american > 0 {
        format!("+{american}")
    } else {
        american.to_string()
    }
}
