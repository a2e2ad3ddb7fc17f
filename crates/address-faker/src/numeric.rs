//! Bounded decimal sampling with exact fractional digits.
//!
//! Values are carried as an integer count of `10^-precision` steps, so the
//! rendered string always has exactly `precision` fractional digits and never
//! falls back to scientific notation.

use std::fmt;

use serde::Serialize;

use crate::error::FakerError;
use crate::random::{RandomSource, SeedableEngine};

/// Default number of fractional digits.
pub const DEFAULT_PRECISION: u32 = 4;

/// Largest supported number of fractional digits.
pub const MAX_PRECISION: u32 = 12;

/// A decimal number with a fixed count of fractional digits.
///
/// # Example
///
/// ```
/// use address_faker::FixedDecimal;
///
/// assert_eq!(FixedDecimal::new(-1_250, 3).to_string(), "-1.250");
/// assert_eq!(FixedDecimal::new(5, 0).to_string(), "5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedDecimal {
    units: i64,
    precision: u32,
}

impl FixedDecimal {
    /// Creates a decimal from a count of `10^-precision` steps.
    ///
    /// Precision is capped at [`MAX_PRECISION`]; `units` are then read as
    /// steps of the capped precision.
    #[must_use]
    pub const fn new(units: i64, precision: u32) -> Self {
        let capped = if precision > MAX_PRECISION {
            MAX_PRECISION
        } else {
            precision
        };
        Self {
            units,
            precision: capped,
        }
    }

    /// Rounds a real number onto the `10^-precision` grid.
    ///
    /// Precision is capped at [`MAX_PRECISION`] and magnitudes beyond the
    /// `i64` range saturate.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "rounding a real onto the decimal grid; the cast saturates"
    )]
    pub fn from_f64(value: f64, precision: u32) -> Self {
        let capped = precision.min(MAX_PRECISION);
        let units = (value * scale_f64(capped)).round() as i64;
        Self {
            units,
            precision: capped,
        }
    }

    /// Returns the number of fractional digits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns the value as an `f64`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "converting grid steps back to a real number"
    )]
    pub fn to_f64(&self) -> f64 {
        self.units as f64 / scale_f64(self.precision)
    }
}

fn scale_f64(precision: u32) -> f64 {
    10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX))
}

impl fmt::Display for FixedDecimal {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "splitting grid steps into whole and fractional parts"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();
        if self.precision == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        let scale = 10_u64.pow(self.precision);
        let whole = magnitude / scale;
        let fraction = magnitude % scale;
        let width = usize::try_from(self.precision).unwrap_or(usize::MAX);
        write!(f, "{sign}{whole}.{fraction:0width$}")
    }
}

impl Serialize for FixedDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Samples a decimal between two bounds given in either order.
///
/// Reversed bounds are swapped rather than rejected.
///
/// # Errors
///
/// Returns [`FakerError::InvalidRange`] for non-finite bounds or a range
/// without grid values, and [`FakerError::UnsupportedPrecision`] for a
/// precision above [`MAX_PRECISION`].
///
/// # Example
///
/// ```
/// use address_faker::{RandomSource, Seed, numeric};
///
/// let mut random: RandomSource = RandomSource::new(Seed::Single(7));
/// let value = numeric::range(&mut random, 5.0, -5.0, 4).expect("valid bounds");
///
/// assert!((-5.0..=5.0).contains(&value.to_f64()));
/// assert_eq!(value.to_string().split_once('.').map(|(_, f)| f.len()), Some(4));
/// ```
pub fn range<R: SeedableEngine>(
    random: &mut RandomSource<R>,
    min: f64,
    max: f64,
    precision: u32,
) -> Result<FixedDecimal, FakerError> {
    let (low, high) = if min > max { (max, min) } else { (min, max) };
    random.next_float(low, high, precision)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::seed::Seed;

    #[rstest]
    #[case(0, 0, "0")]
    #[case(1_234_567, 4, "123.4567")]
    #[case(-1_234_567, 4, "-123.4567")]
    #[case(5, 4, "0.0005")]
    #[case(-5, 4, "-0.0005")]
    #[case(1_800_000, 4, "180.0000")]
    #[case(42, 0, "42")]
    fn renders_exact_fraction_digits(
        #[case] units: i64,
        #[case] precision: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(FixedDecimal::new(units, precision).to_string(), expected);
    }

    #[rstest]
    #[case(20)]
    #[case(u32::MAX)]
    fn excessive_precision_is_capped(#[case] precision: u32) {
        let value = FixedDecimal::new(1, precision);
        assert_eq!(value.precision(), MAX_PRECISION);
        assert_eq!(value.to_string(), "0.000000000001");
    }

    #[rstest]
    #[case(-22.582_84, 4, "-22.5828")]
    #[case(106.755_51, 4, "106.7555")]
    #[case(-0.000_01, 4, "0.0000")]
    #[case(1e-9, 2, "0.00")]
    fn rounds_reals_onto_the_grid(#[case] value: f64, #[case] precision: u32, #[case] expected: &str) {
        assert_eq!(FixedDecimal::from_f64(value, precision).to_string(), expected);
    }

    #[test]
    fn never_uses_scientific_notation() {
        let tiny = FixedDecimal::from_f64(1e-7, 10).to_string();
        assert_eq!(tiny, "0.0000001000");
    }

    #[test]
    fn range_swaps_reversed_bounds() {
        let mut random: RandomSource = RandomSource::new(Seed::Single(1211));
        for _ in 0..500 {
            let value = range(&mut random, 100.0, -30.0, DEFAULT_PRECISION)
                .expect("bounds are swapped");
            assert!((-30.0..=100.0).contains(&value.to_f64()), "value {value}");
        }
    }

    #[test]
    fn range_is_deterministic_per_seed() {
        let mut first: RandomSource = RandomSource::new(Seed::Single(42));
        let mut second: RandomSource = RandomSource::new(Seed::Single(42));
        for _ in 0..50 {
            assert_eq!(
                range(&mut first, -90.0, 90.0, 4),
                range(&mut second, -90.0, 90.0, 4)
            );
        }
    }

    #[test]
    fn range_precision_is_exact_up_to_ten_digits() {
        let mut random: RandomSource = RandomSource::new(Seed::Single(3));
        for precision in 0..=10 {
            let rendered = range(&mut random, -1.0, 1.0, precision)
                .expect("valid bounds")
                .to_string();
            let digits = rendered.split_once('.').map_or(0, |(_, frac)| frac.len());
            assert_eq!(digits, usize::try_from(precision).unwrap_or(0), "{rendered}");
        }
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&FixedDecimal::new(-905, 2)).expect("serialize");
        assert_eq!(json, "\"-9.05\"");
    }
}
