//! Decimal truncation used for every reported figure.
//!
//! Values are scaled, truncated toward zero and scaled back. This is not
//! round-half-to-even or round-half-up: 2.999 at two places is 2.99.

/// Truncate `value` toward zero at `places` decimal places
#[must_use]
pub fn truncate_to(value: f64, places: u32) -> f64 {
    let multiplier = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    (value * multiplier).trunc() / multiplier
}
