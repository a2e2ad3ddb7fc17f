//! Seed values for deterministic generation.
//!
//! A seed is either a single integer or an ordered sequence of integers. It
//! fully determines every value drawn afterwards and can be read back for
//! reproducibility logging.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A seed for a [`crate::RandomSource`].
///
/// Deserializes from a JSON number or a JSON array of numbers.
///
/// # Example
///
/// ```
/// use address_faker::Seed;
///
/// let single: Seed = serde_json::from_str("42").expect("number seed");
/// let sequence: Seed = serde_json::from_str("[1, 2, 3]").expect("array seed");
///
/// assert_eq!(single, Seed::Single(42));
/// assert_eq!(sequence.to_string(), "[1, 2, 3]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// A single 32-bit seed.
    Single(u32),
    /// An ordered sequence of 32-bit seed words.
    Sequence(Vec<u32>),
}

impl Seed {
    /// Returns the seed as key words for array-based initialisation.
    ///
    /// An empty sequence yields the single word `0`.
    #[must_use]
    pub fn words(&self) -> Vec<u32> {
        match self {
            Self::Single(value) => vec![*value],
            Self::Sequence(words) if words.is_empty() => vec![0],
            Self::Sequence(words) => words.clone(),
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::Single(0)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<u32>> for Seed {
    fn from(words: Vec<u32>) -> Self {
        Self::Sequence(words)
    }
}

impl From<&[u32]> for Seed {
    fn from(words: &[u32]) -> Self {
        Self::Sequence(words.to_vec())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Sequence(words) => {
                f.write_str("[")?;
                for (index, word) in words.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{word}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Seed::Single(42), "42")]
    #[case(Seed::Sequence(vec![1, 2, 3]), "[1, 2, 3]")]
    #[case(Seed::Sequence(vec![]), "[]")]
    fn seed_displays_for_logging(#[case] seed: Seed, #[case] expected: &str) {
        assert_eq!(seed.to_string(), expected);
    }

    #[test]
    fn seed_serializes_as_number_or_array() {
        let single = serde_json::to_string(&Seed::Single(1337)).expect("serialize");
        let sequence = serde_json::to_string(&Seed::Sequence(vec![4, 5])).expect("serialize");
        assert_eq!(single, "1337");
        assert_eq!(sequence, "[4,5]");
    }

    #[test]
    fn empty_sequence_uses_zero_word() {
        assert_eq!(Seed::Sequence(vec![]).words(), vec![0]);
    }

    #[test]
    fn single_seed_is_one_word() {
        assert_eq!(Seed::from(1211).words(), vec![1211]);
    }
}
