//! Seeded random source shared by every synthesizer.
//!
//! All draws go through [`RandomSource::next_unit`], which consumes exactly
//! one 32-bit word from the engine. Integer, decimal, and pick operations are
//! derived from that single primitive so that a given seed and call sequence
//! always produces the same output.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::debug;

use crate::error::FakerError;
use crate::mersenne::Mt19937;
use crate::numeric::{FixedDecimal, MAX_PRECISION};
use crate::seed::Seed;

/// Largest magnitude that survives a round trip through `f64` exactly.
const MAX_EXACT_SCALED: f64 = 9_007_199_254_740_992.0;

/// Tolerance used when snapping scaled bounds onto the decimal grid.
const GRID_TOLERANCE: f64 = 1e-6;

/// Engines that can be rebuilt deterministically from a [`Seed`].
pub trait SeedableEngine: RngCore {
    /// Builds an engine whose output is fully determined by `seed`.
    fn from_seed_value(seed: &Seed) -> Self;
}

impl SeedableEngine for Mt19937 {
    fn from_seed_value(seed: &Seed) -> Self {
        match seed {
            Seed::Single(value) => Self::new(*value),
            Seed::Sequence(_) => Self::from_key(&seed.words()),
        }
    }
}

impl SeedableEngine for ChaCha8Rng {
    fn from_seed_value(seed: &Seed) -> Self {
        let mut expander = Mt19937::from_seed_value(seed);
        Self::from_rng(&mut expander)
    }
}

/// A value paired with its relative selection weight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeightedChoice<T> {
    /// The selectable value.
    pub value: T,
    /// Relative weight; weights need no normalisation.
    pub weight: f64,
}

impl<T> WeightedChoice<T> {
    /// Creates a weighted choice.
    #[must_use]
    pub const fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }

    const fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }
}

/// Deterministic random source.
///
/// Two sources seeded with the same [`Seed`] and driven through the same
/// calls yield identical results.
///
/// # Example
///
/// ```
/// use address_faker::{RandomSource, Seed};
///
/// let mut first: RandomSource = RandomSource::new(Seed::Single(42));
/// let mut second: RandomSource = RandomSource::new(Seed::Single(42));
///
/// let a = first.next_int(1, 6).expect("valid range");
/// let b = second.next_int(1, 6).expect("valid range");
/// assert_eq!(a, b);
/// assert!((1..=6).contains(&a));
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource<R = Mt19937> {
    engine: R,
    seed: Seed,
}

impl<R: SeedableEngine> RandomSource<R> {
    /// Creates a source seeded with `seed`.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        let engine = R::from_seed_value(&seed);
        Self { engine, seed }
    }

    /// Resets the internal state from `seed`.
    pub fn reseed(&mut self, seed: Seed) {
        debug!(%seed, "reseeding random source");
        self.engine = R::from_seed_value(&seed);
        self.seed = seed;
    }

    /// Returns the seed the source was last seeded with.
    #[must_use]
    pub const fn seed_value(&self) -> &Seed {
        &self.seed
    }

    /// Draws a real number in `[0, 1)` from one 32-bit engine word.
    #[expect(
        clippy::float_arithmetic,
        reason = "scaling a 32-bit word onto the unit interval"
    )]
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.engine.next_u32()) / 4_294_967_296.0
    }

    /// Draws an integer uniformly from the inclusive range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::InvalidRange`] when `min > max`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "the offset is the floor of a unit draw scaled by the span"
    )]
    pub fn next_int(&mut self, min: i64, max: i64) -> Result<i64, FakerError> {
        if min > max {
            return Err(FakerError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i128;
        let value = (i128::from(min) + offset).min(i128::from(max));
        Ok(i64::try_from(value).unwrap_or(max))
    }

    /// Draws a decimal in `[min, max]` with exactly `precision` fractional
    /// digits.
    ///
    /// The bounds are snapped inwards onto the `10^-precision` grid and one
    /// grid step is drawn uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::InvalidRange`] when `min > max`, when a bound is
    /// not finite, or when no grid value lies between the bounds. Returns
    /// [`FakerError::UnsupportedPrecision`] when the scaled range cannot be
    /// represented exactly.
    pub fn next_float(
        &mut self,
        min: f64,
        max: f64,
        precision: u32,
    ) -> Result<FixedDecimal, FakerError> {
        let invalid = || FakerError::InvalidRange {
            min: min.to_string(),
            max: max.to_string(),
        };
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(invalid());
        }
        let scale = decimal_scale(precision)?;
        let low = snap_to_grid(min, scale, GridEdge::Lower);
        let high = snap_to_grid(max, scale, GridEdge::Upper);
        let (Some(low_units), Some(high_units)) = (exact_units(low), exact_units(high)) else {
            return Err(FakerError::UnsupportedPrecision {
                precision,
                max_precision: MAX_PRECISION,
            });
        };
        if low_units > high_units {
            return Err(invalid());
        }
        let units = self.next_int(low_units, high_units)?;
        Ok(FixedDecimal::new(units, precision))
    }

    /// Draws a boolean with even odds.
    pub fn next_bool(&mut self) -> bool {
        self.next_unit() >= 0.5
    }

    /// Picks an element uniformly from `items`.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::EmptyDomain`] when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, FakerError> {
        let empty = || FakerError::EmptyDomain { domain: "list" };
        let last_index = items.len().checked_sub(1).ok_or_else(empty)?;
        let upper = i64::try_from(last_index).unwrap_or(i64::MAX);
        let index = self.next_int(0, upper)?;
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .ok_or_else(empty)
    }

    /// Picks an element with probability proportional to its weight.
    ///
    /// Entries with non-positive or non-finite weights are never chosen.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::EmptyDomain`] when `items` is empty or carries
    /// no positive weight.
    #[expect(
        clippy::float_arithmetic,
        reason = "cumulative weights are summed in floating point"
    )]
    pub fn weighted_pick<'a, T>(
        &mut self,
        items: &'a [WeightedChoice<T>],
    ) -> Result<&'a T, FakerError> {
        let empty = || FakerError::EmptyDomain {
            domain: "weighted list",
        };
        let total: f64 = items.iter().map(WeightedChoice::effective_weight).sum();
        if total <= 0.0 {
            return Err(empty());
        }

        let target = self.next_unit() * total;
        let mut cumulative = 0.0;
        for choice in items {
            let weight = choice.effective_weight();
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            if target < cumulative {
                return Ok(&choice.value);
            }
        }

        // Rounding can leave the target just past the final boundary.
        items
            .iter()
            .rev()
            .find(|choice| choice.effective_weight() > 0.0)
            .map(|choice| &choice.value)
            .ok_or_else(empty)
    }
}

#[derive(Clone, Copy)]
enum GridEdge {
    Lower,
    Upper,
}

fn decimal_scale(precision: u32) -> Result<f64, FakerError> {
    if precision > MAX_PRECISION {
        return Err(FakerError::UnsupportedPrecision {
            precision,
            max_precision: MAX_PRECISION,
        });
    }
    let exponent = i32::try_from(precision).unwrap_or(i32::MAX);
    Ok(10_f64.powi(exponent))
}

#[expect(
    clippy::float_arithmetic,
    reason = "bounds are scaled onto the decimal grid"
)]
fn snap_to_grid(value: f64, scale: f64, edge: GridEdge) -> f64 {
    let scaled = value * scale;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < GRID_TOLERANCE {
        return nearest;
    }
    match edge {
        GridEdge::Lower => scaled.ceil(),
        GridEdge::Upper => scaled.floor(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "magnitude is checked against the exact f64 integer range first"
)]
fn exact_units(scaled: f64) -> Option<i64> {
    (scaled.abs() <= MAX_EXACT_SCALED).then(|| scaled as i64)
}

#[cfg(test)]
mod tests {
    //! Covers determinism, range handling, and pick semantics.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn source() -> RandomSource {
        RandomSource::new(Seed::Single(42))
    }

    #[test]
    fn identical_seeds_produce_identical_sequences() {
        let mut first: RandomSource = RandomSource::new(Seed::Sequence(vec![7, 11, 13]));
        let mut second: RandomSource = RandomSource::new(Seed::Sequence(vec![7, 11, 13]));

        for _ in 0..200 {
            assert_eq!(first.next_int(-50, 50), second.next_int(-50, 50));
            assert_eq!(first.next_float(0.0, 1.0, 6), second.next_float(0.0, 1.0, 6));
        }
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut source: RandomSource = RandomSource::new(Seed::Single(1337));
        let first: Vec<i64> = (0..10)
            .map(|_| source.next_int(0, 1000).expect("valid range"))
            .collect();

        source.reseed(Seed::Single(1337));
        let second: Vec<i64> = (0..10)
            .map(|_| source.next_int(0, 1000).expect("valid range"))
            .collect();

        assert_eq!(first, second);
        assert_eq!(source.seed_value(), &Seed::Single(1337));
    }

    #[test]
    fn chacha_engine_is_deterministic() {
        let mut first: RandomSource<ChaCha8Rng> = RandomSource::new(Seed::Single(9));
        let mut second: RandomSource<ChaCha8Rng> = RandomSource::new(Seed::Single(9));
        for _ in 0..50 {
            assert_eq!(first.next_int(0, 99), second.next_int(0, 99));
        }
    }

    #[test]
    fn unit_draw_follows_engine_words() {
        let mut source: RandomSource = RandomSource::new(Seed::Single(5489));
        let unit = source.next_unit();
        assert!((unit - 3_499_211_612.0 / 4_294_967_296.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pick_indices_scale_engine_words() {
        // Seed 42 yields 1608637542, 3421126067, 4083286876, 787846414,
        // 3143890026; each index is floor(word / 2^32 * len).
        let mut source: RandomSource = RandomSource::new(Seed::Single(42));
        let lengths = [10_usize, 26, 7, 3, 100];
        let picked: Vec<usize> = lengths
            .iter()
            .map(|&len| {
                let items: Vec<usize> = (0..len).collect();
                *source.pick(&items).expect("non-empty list")
            })
            .collect();

        assert_eq!(picked, vec![3, 20, 6, 0, 73]);
    }

    #[rstest]
    fn next_int_stays_in_range(mut source: RandomSource) {
        for _ in 0..1000 {
            let value = source.next_int(-3, 3).expect("valid range");
            assert!((-3..=3).contains(&value), "out of range: {value}");
        }
    }

    #[rstest]
    fn next_int_accepts_single_value_range(mut source: RandomSource) {
        assert_eq!(source.next_int(5, 5), Ok(5));
    }

    #[rstest]
    fn next_int_rejects_reversed_bounds(mut source: RandomSource) {
        assert_eq!(
            source.next_int(2, 1),
            Err(FakerError::InvalidRange {
                min: "2".to_owned(),
                max: "1".to_owned()
            })
        );
    }

    #[rstest]
    fn next_int_handles_extreme_bounds(mut source: RandomSource) {
        let value = source.next_int(i64::MIN, i64::MAX);
        assert!(value.is_ok());
    }

    #[rstest]
    fn next_float_rejects_reversed_bounds(mut source: RandomSource) {
        assert!(matches!(
            source.next_float(1.0, 0.0, 2),
            Err(FakerError::InvalidRange { .. })
        ));
    }

    #[rstest]
    fn next_float_rejects_excessive_precision(mut source: RandomSource) {
        assert_eq!(
            source.next_float(0.0, 1.0, MAX_PRECISION + 1),
            Err(FakerError::UnsupportedPrecision {
                precision: MAX_PRECISION + 1,
                max_precision: MAX_PRECISION
            })
        );
    }

    #[rstest]
    fn next_float_snaps_inexact_bounds(mut source: RandomSource) {
        for _ in 0..200 {
            let value = source.next_float(1.1, 1.3, 1).expect("valid range");
            let rendered = value.to_string();
            assert!(
                ["1.1", "1.2", "1.3"].contains(&rendered.as_str()),
                "unexpected value {rendered}"
            );
        }
    }

    #[rstest]
    fn next_float_rejects_ranges_without_grid_values(mut source: RandomSource) {
        assert!(matches!(
            source.next_float(1.01, 1.04, 1),
            Err(FakerError::InvalidRange { .. })
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    #[case(7)]
    #[case(10)]
    fn next_float_has_exact_fraction_digits(mut source: RandomSource, #[case] precision: u32) {
        for _ in 0..100 {
            let rendered = source
                .next_float(-180.0, 180.0, precision)
                .expect("valid range")
                .to_string();
            let digits = rendered.split_once('.').map_or(0, |(_, frac)| frac.len());
            assert_eq!(digits, usize::try_from(precision).unwrap_or(0), "rendered {rendered}");
        }
    }

    #[rstest]
    fn pick_rejects_empty_lists(mut source: RandomSource) {
        let empty: [&str; 0] = [];
        assert_eq!(
            source.pick(&empty),
            Err(FakerError::EmptyDomain { domain: "list" })
        );
    }

    #[rstest]
    fn pick_returns_members(mut source: RandomSource) {
        let items = ["North", "East", "South", "West"];
        for _ in 0..100 {
            let picked = source.pick(&items).expect("non-empty");
            assert!(items.contains(picked));
        }
    }

    #[rstest]
    fn weighted_pick_rejects_empty_lists(mut source: RandomSource) {
        let empty: Vec<WeightedChoice<&str>> = Vec::new();
        assert_eq!(
            source.weighted_pick(&empty),
            Err(FakerError::EmptyDomain {
                domain: "weighted list"
            })
        );
    }

    #[rstest]
    fn weighted_pick_rejects_zero_total_weight(mut source: RandomSource) {
        let items = vec![WeightedChoice::new("a", 0.0), WeightedChoice::new("b", -1.0)];
        assert!(source.weighted_pick(&items).is_err());
    }

    #[rstest]
    fn weighted_pick_never_selects_zero_weight(mut source: RandomSource) {
        let items = vec![
            WeightedChoice::new("never", 0.0),
            WeightedChoice::new("always", 3.5),
        ];
        for _ in 0..200 {
            assert_eq!(source.weighted_pick(&items), Ok(&"always"));
        }
    }

    #[rstest]
    fn weighted_pick_follows_weights(mut source: RandomSource) {
        let items = vec![WeightedChoice::new("heavy", 9.0), WeightedChoice::new("light", 1.0)];
        let heavy = (0..5000)
            .filter(|_| source.weighted_pick(&items) == Ok(&"heavy"))
            .count();
        assert!((4200..=4800).contains(&heavy), "heavy picked {heavy} times");
    }
}
