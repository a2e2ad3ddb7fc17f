//! Placeholder-driven format expansion.
//!
//! Formats are processed left to right. `#` draws a digit, `?` draws an
//! uppercase letter, and `*` draws a digit or uppercase letter; each token
//! consumes exactly one draw. `\` emits the following character literally.
//! `{{category.field}}` resolves another locale field and expands it in
//! place, up to [`MAX_REFERENCE_DEPTH`] levels deep. Everything else passes
//! through unchanged.

use crate::catalog::LocaleValue;
use crate::error::FakerError;
use crate::random::{RandomSource, SeedableEngine};
use crate::registry::LocaleRegistry;

/// Maximum nesting of `{{...}}` references.
pub const MAX_REFERENCE_DEPTH: usize = 8;

const DIGITS: &[u8; 10] = b"0123456789";
const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Expands format strings against a registry and a random source.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use address_faker::{LocaleCatalog, LocaleRegistry, PatternExpander, RandomSource, Seed};
///
/// let catalog = LocaleCatalog::from_json(r#"{"en": {"address": {"unit": "Apt. ###"}}}"#)
///     .expect("valid catalog");
/// let registry = LocaleRegistry::new(Arc::new(catalog), "en", "en").expect("known locale");
/// let mut random: RandomSource = RandomSource::new(Seed::Single(42));
///
/// let mut expander = PatternExpander::new(&registry, &mut random);
/// let unit = expander.expand("{{address.unit}} \\#1").expect("expands");
///
/// assert!(unit.starts_with("Apt. "));
/// assert!(unit.ends_with(" #1"));
/// ```
#[derive(Debug)]
pub struct PatternExpander<'a, R> {
    registry: &'a LocaleRegistry,
    random: &'a mut RandomSource<R>,
}

impl<'a, R: SeedableEngine> PatternExpander<'a, R> {
    /// Creates an expander over `registry` drawing from `random`.
    pub const fn new(registry: &'a LocaleRegistry, random: &'a mut RandomSource<R>) -> Self {
        Self { registry, random }
    }

    /// Expands `format` into a concrete string.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::MissingField`] for an unresolvable reference,
    /// [`FakerError::FormatRecursion`] when references nest too deeply, and
    /// any error raised while picking a referenced value.
    pub fn expand(&mut self, format: &str) -> Result<String, FakerError> {
        self.expand_at(format, 0)
    }

    /// Produces a string from a resolved locale value.
    ///
    /// Lists and weighted lists are sampled and the choice is expanded,
    /// formats are expanded, and ranges draw a zero-padded integer. `path`
    /// names the field in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::UnexpectedValueKind`] for tables, and any error
    /// raised by sampling or expansion.
    pub fn expand_value(&mut self, path: &str, value: &LocaleValue) -> Result<String, FakerError> {
        self.expand_value_at(path, value, 0)
    }

    /// Samples a resolved locale value and returns it verbatim.
    ///
    /// Used for plain value lists such as street suffixes or country names,
    /// whose entries are data rather than formats: a picked entry keeps any
    /// `#` or `?` it contains, and only one draw is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::UnexpectedValueKind`] for tables, and any error
    /// raised by sampling.
    pub fn pick_value(&mut self, path: &str, value: &LocaleValue) -> Result<String, FakerError> {
        match value {
            LocaleValue::Format(text) => Ok(text.clone()),
            LocaleValue::List(items) => self.random.pick(items).cloned(),
            LocaleValue::Weighted(items) => self.random.weighted_pick(items).cloned(),
            LocaleValue::Range(range) => {
                let drawn = self.random.next_int(range.min, range.max)?;
                Ok(range.render(drawn))
            }
            LocaleValue::Table(_) => Err(unexpected_table(path, value)),
        }
    }

    fn expand_value_at(
        &mut self,
        path: &str,
        value: &LocaleValue,
        depth: usize,
    ) -> Result<String, FakerError> {
        match value {
            LocaleValue::Format(format) => self.expand_at(format, depth),
            LocaleValue::List(items) => {
                let choice = self.random.pick(items)?;
                self.expand_at(choice, depth)
            }
            LocaleValue::Weighted(items) => {
                let choice = self.random.weighted_pick(items)?;
                self.expand_at(choice, depth)
            }
            LocaleValue::Range(range) => {
                let drawn = self.random.next_int(range.min, range.max)?;
                Ok(range.render(drawn))
            }
            LocaleValue::Table(_) => Err(unexpected_table(path, value)),
        }
    }

    fn expand_at(&mut self, format: &str, depth: usize) -> Result<String, FakerError> {
        let mut output = String::with_capacity(format.len());
        let mut chars = format.chars();

        loop {
            if let Some((reference, tail)) = split_reference(chars.as_str()) {
                let expanded = self.expand_reference(reference, depth)?;
                output.push_str(&expanded);
                chars = tail.chars();
                continue;
            }

            let Some(ch) = chars.next() else {
                break;
            };
            match ch {
                '#' => output.push(self.draw(DIGITS)?),
                '?' => output.push(self.draw(LETTERS)?),
                '*' => output.push(self.draw(ALPHANUMERIC)?),
                '\\' => output.push(chars.next().unwrap_or('\\')),
                other => output.push(other),
            }
        }

        Ok(output)
    }

    fn expand_reference(&mut self, reference: &str, depth: usize) -> Result<String, FakerError> {
        if depth >= MAX_REFERENCE_DEPTH {
            return Err(FakerError::FormatRecursion {
                reference: reference.to_owned(),
                depth: MAX_REFERENCE_DEPTH,
            });
        }
        let registry = self.registry;
        let resolved = registry.resolve_reference(reference)?;
        self.expand_value_at(reference, resolved.value, depth + 1)
    }

    fn draw(&mut self, alphabet: &[u8]) -> Result<char, FakerError> {
        self.random.pick(alphabet).map(|byte| char::from(*byte))
    }
}

/// Splits `{{reference}}tail` into the trimmed reference and the tail.
fn split_reference(input: &str) -> Option<(&str, &str)> {
    let inner = input.strip_prefix("{{")?;
    let (reference, tail) = inner.split_once("}}")?;
    Some((reference.trim(), tail))
}

fn unexpected_table(path: &str, value: &LocaleValue) -> FakerError {
    FakerError::UnexpectedValueKind {
        path: path.to_owned(),
        expected: "a format, list, or range",
        found: value.kind(),
    }
}
