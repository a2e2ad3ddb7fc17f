//! The faker instance tying locales, randomness, and generators together.

use std::sync::Arc;

use tracing::debug;

use crate::address::Address;
use crate::catalog::LocaleCatalog;
use crate::config::FakerConfig;
use crate::error::CatalogError;
use crate::geo::GeoSampling;
use crate::mersenne::Mt19937;
use crate::random::{RandomSource, SeedableEngine};
use crate::registry::LocaleRegistry;
use crate::seed::Seed;

/// An explicitly constructed generator with its own random source and
/// active locale.
///
/// Instances are independent: each owns its random source, while the locale
/// catalog is shared read-only.
///
/// # Example
///
/// ```
/// use address_faker::{Faker, FakerConfig, LocaleCatalog};
///
/// let catalog = LocaleCatalog::builtin().expect("bundled locales parse");
/// let config = FakerConfig::default().with_seed(1337_u32);
///
/// let mut first = Faker::new(catalog.clone(), &config).expect("known locales");
/// let mut second = Faker::new(catalog, &config).expect("known locales");
///
/// assert_eq!(first.address().city(), second.address().city());
/// ```
#[derive(Debug, Clone)]
pub struct Faker<R = Mt19937> {
    registry: LocaleRegistry,
    random: RandomSource<R>,
    geo_sampling: GeoSampling,
}

impl Faker {
    /// Creates a faker backed by the Mersenne Twister engine.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] if the configured locale or
    /// fallback locale is missing from `catalog`.
    pub fn new(
        catalog: impl Into<Arc<LocaleCatalog>>,
        config: &FakerConfig,
    ) -> Result<Self, CatalogError> {
        Self::with_engine(catalog, config)
    }
}

impl<R: SeedableEngine> Faker<R> {
    /// Creates a faker backed by any seedable engine.
    ///
    /// Without a configured seed a random one is drawn and logged so that the
    /// run can be reproduced.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] if the configured locale or
    /// fallback locale is missing from `catalog`.
    pub fn with_engine(
        catalog: impl Into<Arc<LocaleCatalog>>,
        config: &FakerConfig,
    ) -> Result<Self, CatalogError> {
        let registry =
            LocaleRegistry::new(catalog.into(), &config.locale, &config.fallback_locale)?;
        let seed = config.seed.clone().unwrap_or_else(|| {
            let drawn = Seed::Single(rand::random());
            debug!(seed = %drawn, "no seed configured; drew a random seed");
            drawn
        });
        debug!(%seed, locale = %config.locale, "creating faker");

        Ok(Self {
            registry,
            random: RandomSource::new(seed),
            geo_sampling: config.geo_sampling,
        })
    }

    /// Re-seeds the random source, restarting its sequence.
    pub fn seed(&mut self, seed: impl Into<Seed>) {
        self.random.reseed(seed.into());
    }

    /// Returns the current seed.
    #[must_use]
    pub const fn seed_value(&self) -> &Seed {
        self.random.seed_value()
    }

    /// Returns the active locale identifier.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.registry.locale()
    }

    /// Switches the active locale; the fallback locale stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] if the catalog lacks `locale`.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), CatalogError> {
        self.registry.set_locale(locale)
    }

    /// Returns the geospatial sampling strategy.
    #[must_use]
    pub const fn geo_sampling(&self) -> GeoSampling {
        self.geo_sampling
    }

    /// Returns the address generators.
    pub fn address(&mut self) -> Address<'_, R> {
        Address::new(&self.registry, &mut self.random, self.geo_sampling)
    }

    /// Returns the locale registry.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Returns the random source for direct draws.
    pub const fn random_mut(&mut self) -> &mut RandomSource<R> {
        &mut self.random
    }
}
