//! Faker configuration.
//!
//! Configuration is plain data: which locale to generate in, which locale
//! fills the gaps, an optional seed, and the geospatial sampling strategy.
//! It can be built in code or parsed from camelCase JSON.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::geo::GeoSampling;
use crate::seed::Seed;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Settings for constructing a [`crate::Faker`].
///
/// # Example
///
/// ```
/// use address_faker::{FakerConfig, GeoSampling, Seed};
///
/// let config = FakerConfig::from_json(r#"{
///     "locale": "en_CA",
///     "seed": [1, 2, 3],
///     "geoSampling": "sphericalCap"
/// }"#).expect("valid config");
///
/// assert_eq!(config.locale, "en_CA");
/// assert_eq!(config.fallback_locale, "en");
/// assert_eq!(config.seed, Some(Seed::Sequence(vec![1, 2, 3])));
/// assert_eq!(config.geo_sampling, GeoSampling::SphericalCap);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FakerConfig {
    /// Active locale identifier.
    pub locale: String,
    /// Locale consulted for fields the active locale lacks.
    pub fallback_locale: String,
    /// Seed for the random source; a random seed is drawn when absent.
    pub seed: Option<Seed>,
    /// Strategy for nearby coordinate sampling.
    pub geo_sampling: GeoSampling,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_owned(),
            fallback_locale: DEFAULT_LOCALE.to_owned(),
            seed: None,
            geo_sampling: GeoSampling::default(),
        }
    }
}

impl FakerConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] if the JSON is malformed or
    /// contains unknown keys.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the file cannot be read and
    /// [`CatalogError::InvalidConfig`] if it cannot be parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// Returns the configuration with `seed` set.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Returns the configuration with the active locale set.
    #[must_use]
    pub fn with_locale(mut self, locale: &str) -> Self {
        locale.clone_into(&mut self.locale);
        self
    }
}
