//! Address field generation.
//!
//! [`Address`] is a short-lived view over a [`crate::Faker`] that resolves
//! `address.*` fields through the locale registry and turns them into values
//! with the pattern expander, the numeric sampler, or the geospatial sampler.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::LocaleValue;
use crate::error::FakerError;
use crate::geo::{self, Coordinate, DistanceUnit, GeoSampling, GpsCoordinate};
use crate::numeric::{self, DEFAULT_PRECISION, FixedDecimal};
use crate::pattern::PatternExpander;
use crate::random::{RandomSource, SeedableEngine};
use crate::registry::LocaleRegistry;

const CATEGORY: &str = "address";

/// Column used by [`Address::country_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryCodeFormat {
    /// Two-letter ISO 3166-1 codes.
    #[default]
    Alpha2,
    /// Three-letter ISO 3166-1 codes.
    Alpha3,
}

impl CountryCodeFormat {
    const fn field(self) -> &'static str {
        match self {
            Self::Alpha2 => "country_code",
            Self::Alpha3 => "country_code_alpha_3",
        }
    }
}

impl fmt::Display for CountryCodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha2 => f.write_str("alpha-2"),
            Self::Alpha3 => f.write_str("alpha-3"),
        }
    }
}

/// Error returned when parsing an unknown country code format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown country code format '{format}', expected 'alpha-2' or 'alpha-3'")]
pub struct UnknownCountryCodeFormat {
    /// The rejected input.
    pub format: String,
}

impl FromStr for CountryCodeFormat {
    type Err = UnknownCountryCodeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha-2" => Ok(Self::Alpha2),
            "alpha-3" => Ok(Self::Alpha3),
            other => Err(UnknownCountryCodeFormat {
                format: other.to_owned(),
            }),
        }
    }
}

/// Subsets of the locale direction list.
#[derive(Debug, Clone, Copy)]
enum Directions {
    All,
    Cardinal,
    Ordinal,
}

impl Directions {
    fn select(self, items: &[String]) -> &[String] {
        let len = items.len();
        let selected = match self {
            Self::All => items.get(..),
            Self::Cardinal => items.get(..len.min(4)),
            Self::Ordinal => items.get(len.min(4)..len.min(8)),
        };
        selected.unwrap_or_default()
    }
}

/// Generates address values for one faker instance.
///
/// Obtained from [`crate::Faker::address`]; every method consumes draws from
/// the faker's random source.
///
/// # Example
///
/// ```
/// use address_faker::{Faker, FakerConfig, LocaleCatalog, Seed};
///
/// let catalog = LocaleCatalog::builtin().expect("bundled locales parse");
/// let config = FakerConfig {
///     seed: Some(Seed::Single(42)),
///     ..FakerConfig::default()
/// };
/// let mut faker = Faker::new(catalog, &config).expect("known locales");
///
/// let zip = faker.address().zip_code(Some("###-###")).expect("valid format");
/// assert_eq!(zip.len(), 7);
/// ```
#[derive(Debug)]
pub struct Address<'a, R> {
    registry: &'a LocaleRegistry,
    random: &'a mut RandomSource<R>,
    sampling: GeoSampling,
}

impl<'a, R: SeedableEngine> Address<'a, R> {
    pub(crate) const fn new(
        registry: &'a LocaleRegistry,
        random: &'a mut RandomSource<R>,
        sampling: GeoSampling,
    ) -> Self {
        Self {
            registry,
            random,
            sampling,
        }
    }

    /// Generates a city from the locale's city formats.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::MissingField`] if neither locale defines the
    /// field, or any error raised while expanding it.
    pub fn city(&mut self) -> Result<String, FakerError> {
        self.field("city")
    }

    /// Picks a city prefix such as `North`.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn city_prefix(&mut self) -> Result<String, FakerError> {
        self.value("city_prefix")
    }

    /// Picks a city suffix such as `ville`.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn city_suffix(&mut self) -> Result<String, FakerError> {
        self.value("city_suffix")
    }

    /// Picks a real city name.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn city_name(&mut self) -> Result<String, FakerError> {
        self.value("city_name")
    }

    /// Generates a street name from the locale's street formats.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn street_name(&mut self) -> Result<String, FakerError> {
        self.field("street")
    }

    /// Picks a street prefix.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn street_prefix(&mut self) -> Result<String, FakerError> {
        self.value("street_prefix")
    }

    /// Picks a street suffix such as `Avenue`.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn street_suffix(&mut self) -> Result<String, FakerError> {
        self.value("street_suffix")
    }

    /// Generates a building number.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn building_number(&mut self) -> Result<String, FakerError> {
        self.field("building_number")
    }

    /// Generates a secondary address line such as `Apt. 123`.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn secondary_address(&mut self) -> Result<String, FakerError> {
        self.field("secondary_address")
    }

    /// Generates a building number and street name, plus a secondary address
    /// line when `use_full_address` is set.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn street_address(&mut self, use_full_address: bool) -> Result<String, FakerError> {
        let variant = if use_full_address { "full" } else { "normal" };
        self.resolve_and_expand("address.street_address", variant)
    }

    /// Picks a county.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn county(&mut self) -> Result<String, FakerError> {
        self.value("county")
    }

    /// Picks a country name.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn country(&mut self) -> Result<String, FakerError> {
        self.value("country")
    }

    /// Picks an ISO country code in the requested format.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn country_code(&mut self, format: CountryCodeFormat) -> Result<String, FakerError> {
        self.value(format.field())
    }

    /// Picks a state or province name.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn state(&mut self) -> Result<String, FakerError> {
        self.value("state")
    }

    /// Picks a state or province abbreviation.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn state_abbr(&mut self) -> Result<String, FakerError> {
        self.value("state_abbr")
    }

    /// Picks a time zone identifier.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn time_zone(&mut self) -> Result<String, FakerError> {
        self.value("time_zone")
    }

    /// Generates a postal code.
    ///
    /// A caller-supplied `format` is expanded directly; otherwise the
    /// locale's `postcode` field is used.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn zip_code(&mut self, format: Option<&str>) -> Result<String, FakerError> {
        if let Some(pattern) = format {
            return self.expander().expand(pattern);
        }
        self.field("postcode")
    }

    /// Draws a postal code from the range assigned to a state.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::UnknownRegion`] if neither locale assigns a
    /// range to `state_abbr`.
    pub fn zip_code_by_state(&mut self, state_abbr: &str) -> Result<String, FakerError> {
        let registry = self.registry;
        let resolved = registry
            .resolve_field("address.postcode_by_state", state_abbr)
            .map_err(|_| FakerError::UnknownRegion {
                region: state_abbr.to_owned(),
            })?;
        let path = format!("address.postcode_by_state.{state_abbr}");
        self.expander().expand_value(&path, resolved.value)
    }

    /// Picks one of the eight compass directions.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn direction(&mut self, abbreviated: bool) -> Result<String, FakerError> {
        self.pick_direction(abbreviated, Directions::All)
    }

    /// Picks one of the four cardinal directions.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn cardinal_direction(&mut self, abbreviated: bool) -> Result<String, FakerError> {
        self.pick_direction(abbreviated, Directions::Cardinal)
    }

    /// Picks one of the four ordinal directions.
    ///
    /// # Errors
    ///
    /// See [`Address::city`].
    pub fn ordinal_direction(&mut self, abbreviated: bool) -> Result<String, FakerError> {
        self.pick_direction(abbreviated, Directions::Ordinal)
    }

    /// Samples a latitude.
    ///
    /// Bounds default to `-90` and `90`, are swapped when reversed, and are
    /// clamped to the latitude domain. Precision defaults to four digits.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::InvalidRange`] for non-finite bounds and
    /// [`FakerError::UnsupportedPrecision`] for excessive precision.
    pub fn latitude(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
        precision: Option<u32>,
    ) -> Result<FixedDecimal, FakerError> {
        self.coordinate_axis(min, max, precision, 90.0)
    }

    /// Samples a longitude.
    ///
    /// Bounds default to `-180` and `180`; otherwise behaves like
    /// [`Address::latitude`].
    ///
    /// # Errors
    ///
    /// See [`Address::latitude`].
    pub fn longitude(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
        precision: Option<u32>,
    ) -> Result<FixedDecimal, FakerError> {
        self.coordinate_axis(min, max, precision, 180.0)
    }

    /// Samples a coordinate near `origin`.
    ///
    /// Without an origin a random global coordinate is drawn first. The
    /// radius defaults to 100 kilometres or miles depending on `is_metric`.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::InvalidRange`] for a negative or non-finite
    /// radius.
    pub fn nearby_gps_coordinate(
        &mut self,
        origin: Option<Coordinate>,
        radius: Option<f64>,
        is_metric: bool,
    ) -> Result<GpsCoordinate, FakerError> {
        let center = if let Some(given) = origin {
            given
        } else {
            let latitude = self.latitude(None, None, None)?;
            let longitude = self.longitude(None, None, None)?;
            Coordinate::new(latitude.to_f64(), longitude.to_f64())
        };
        geo::nearby(
            self.random,
            center,
            radius,
            DistanceUnit::from_metric(is_metric),
            self.sampling,
        )
    }

    #[expect(clippy::float_arithmetic, reason = "negating the domain limit")]
    fn coordinate_axis(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
        precision: Option<u32>,
        limit: f64,
    ) -> Result<FixedDecimal, FakerError> {
        let low = min.unwrap_or(-limit).clamp(-limit, limit);
        let high = max.unwrap_or(limit).clamp(-limit, limit);
        numeric::range(self.random, low, high, precision.unwrap_or(DEFAULT_PRECISION))
    }

    fn pick_direction(
        &mut self,
        abbreviated: bool,
        directions: Directions,
    ) -> Result<String, FakerError> {
        let field = if abbreviated { "direction_abbr" } else { "direction" };
        let registry = self.registry;
        let resolved = registry.resolve_field(CATEGORY, field)?;
        let LocaleValue::List(items) = resolved.value else {
            return Err(FakerError::UnexpectedValueKind {
                path: format!("{CATEGORY}.{field}"),
                expected: "a list",
                found: resolved.value.kind(),
            });
        };
        self.random.pick(directions.select(items)).cloned()
    }

    fn field(&mut self, field: &str) -> Result<String, FakerError> {
        self.resolve_and_expand(CATEGORY, field)
    }

    fn value(&mut self, field: &str) -> Result<String, FakerError> {
        let registry = self.registry;
        let resolved = registry.resolve_field(CATEGORY, field)?;
        let path = format!("{CATEGORY}.{field}");
        self.expander().pick_value(&path, resolved.value)
    }

    fn resolve_and_expand(&mut self, category_path: &str, field: &str) -> Result<String, FakerError> {
        let registry = self.registry;
        let resolved = registry.resolve_field(category_path, field)?;
        let path = format!("{category_path}.{field}");
        self.expander().expand_value(&path, resolved.value)
    }

    fn expander(&mut self) -> PatternExpander<'_, R> {
        PatternExpander::new(self.registry, self.random)
    }
}
