//! Deterministic, locale-aware fake address and geocoordinate generation.
//!
//! This crate synthesizes plausible addresses, postal codes, compass
//! directions, and coordinates from locale data tables. Output is fully
//! determined by a caller-supplied seed, and locales act as partial overrides
//! of a fallback locale.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Seeded Mersenne Twister draws, with `ChaCha8` as an alternative engine
//! - Locale catalogs loaded from JSON strings, directories, or bundled tables
//! - Two-tier field lookup between an active and a fallback locale
//! - Placeholder-driven format expansion with nested field references
//! - Fixed-precision decimal sampling and nearby-coordinate sampling
//!
//! # Example
//!
//! ```
//! use address_faker::{Faker, FakerConfig, LocaleCatalog};
//!
//! let catalog = LocaleCatalog::builtin().expect("bundled locales parse");
//! let config = FakerConfig::default().with_locale("en_CA").with_seed(42_u32);
//! let mut faker = Faker::new(catalog, &config).expect("known locales");
//!
//! let mut address = faker.address();
//! let city = address.city().expect("city formats resolve");
//! let postcode = address.zip_code(None).expect("postcode formats resolve");
//! let latitude = address.latitude(None, None, None).expect("default bounds");
//!
//! assert!(!city.is_empty());
//! assert_eq!(postcode.len(), 7);
//! assert!((-90.0..=90.0).contains(&latitude.to_f64()));
//! ```

mod address;
mod catalog;
mod config;
mod error;
mod faker;
pub mod geo;
mod mersenne;
pub mod numeric;
mod pattern;
mod random;
mod registry;
mod seed;

pub use address::{Address, CountryCodeFormat, UnknownCountryCodeFormat};
pub use catalog::{LocaleCatalog, LocaleSummary, LocaleTable, LocaleValue, RegionRange};
pub use config::{DEFAULT_LOCALE, FakerConfig};
pub use error::{CatalogError, FakerError};
pub use faker::Faker;
pub use geo::{Coordinate, DistanceUnit, GeoSampling, GpsCoordinate};
pub use mersenne::Mt19937;
pub use numeric::{DEFAULT_PRECISION, FixedDecimal, MAX_PRECISION};
pub use pattern::{MAX_REFERENCE_DEPTH, PatternExpander};
pub use random::{RandomSource, SeedableEngine, WeightedChoice};
pub use registry::{LocaleRegistry, Lookup, Origin, Resolved};
pub use seed::Seed;
