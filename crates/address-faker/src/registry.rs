//! Two-tier locale lookup with fallback.
//!
//! The registry pairs an active locale with a fallback locale drawn from a
//! shared [`LocaleCatalog`]. Lookups descend the active locale first; at the
//! first missing node the whole path is retried against the fallback. A field
//! that is found is always used whole, so list values are never merged
//! between the two locales.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{LocaleCatalog, LocaleTable, LocaleValue};
use crate::error::{CatalogError, FakerError};

/// Where a resolved field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The active locale defines the field.
    Primary,
    /// Only the fallback locale defines the field.
    Fallback,
}

/// Outcome of a two-tier lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// Found in the active locale.
    Primary(&'a LocaleValue),
    /// Found in the fallback locale.
    Fallback(&'a LocaleValue),
    /// Neither locale defines the field.
    Absent,
}

/// A field value together with its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    /// The field's value container.
    pub value: &'a LocaleValue,
    /// Which locale supplied it.
    pub origin: Origin,
}

/// Active-locale view over a shared catalog.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use address_faker::{LocaleCatalog, LocaleRegistry, LocaleValue, Origin};
///
/// let catalog = LocaleCatalog::from_json(r#"{
///     "en": {"address": {"city_prefix": ["North"], "city_suffix": ["ville"]}},
///     "en_XX": {"address": {"city_suffix": ["burgh"]}}
/// }"#).expect("valid catalog");
///
/// let registry = LocaleRegistry::new(Arc::new(catalog), "en_XX", "en").expect("known locales");
/// let prefix = registry.resolve_field("address", "city_prefix").expect("resolves");
///
/// assert_eq!(prefix.origin, Origin::Fallback);
/// assert_eq!(prefix.value, &LocaleValue::List(vec!["North".to_owned()]));
/// ```
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    catalog: Arc<LocaleCatalog>,
    locale: String,
    fallback: String,
}

impl LocaleRegistry {
    /// Creates a registry with an active and a fallback locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] if either locale is missing
    /// from the catalog.
    pub fn new(
        catalog: Arc<LocaleCatalog>,
        locale: &str,
        fallback: &str,
    ) -> Result<Self, CatalogError> {
        ensure_known(&catalog, fallback)?;
        ensure_known(&catalog, locale)?;
        Ok(Self {
            catalog,
            locale: locale.to_owned(),
            fallback: fallback.to_owned(),
        })
    }

    /// Returns the active locale identifier.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the fallback locale identifier.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Returns the shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &LocaleCatalog {
        &self.catalog
    }

    /// Switches the active locale without reloading any data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownLocale`] if the catalog lacks `locale`;
    /// the active locale is left unchanged.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), CatalogError> {
        ensure_known(&self.catalog, locale)?;
        debug!(from = %self.locale, to = %locale, "switching active locale");
        locale.clone_into(&mut self.locale);
        Ok(())
    }

    /// Looks up `field` under the dot-separated `category_path`.
    #[must_use]
    pub fn lookup(&self, category_path: &str, field: &str) -> Lookup<'_> {
        let path = || category_path.split('.').chain(std::iter::once(field));

        if let Some(value) = self.table(&self.locale).and_then(|table| table.find(path())) {
            return Lookup::Primary(value);
        }
        if self.locale == self.fallback {
            return Lookup::Absent;
        }
        match self.table(&self.fallback).and_then(|table| table.find(path())) {
            Some(value) => {
                debug!(
                    locale = %self.locale,
                    fallback = %self.fallback,
                    category = category_path,
                    field,
                    "resolved field from fallback locale"
                );
                Lookup::Fallback(value)
            }
            None => Lookup::Absent,
        }
    }

    /// Resolves `field` under `category_path`, failing when both locales
    /// lack it.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::MissingField`] naming the category path and
    /// field.
    pub fn resolve_field(&self, category_path: &str, field: &str) -> Result<Resolved<'_>, FakerError> {
        match self.lookup(category_path, field) {
            Lookup::Primary(value) => Ok(Resolved {
                value,
                origin: Origin::Primary,
            }),
            Lookup::Fallback(value) => Ok(Resolved {
                value,
                origin: Origin::Fallback,
            }),
            Lookup::Absent => Err(FakerError::MissingField {
                locale: self.locale.clone(),
                category: category_path.to_owned(),
                field: field.to_owned(),
            }),
        }
    }

    /// Resolves a full dot-separated reference such as `address.city_prefix`.
    ///
    /// The final segment is the field; everything before it is the category
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`FakerError::MissingField`] if the reference cannot be
    /// resolved or has no category segment.
    pub fn resolve_reference(&self, reference: &str) -> Result<Resolved<'_>, FakerError> {
        match reference.rsplit_once('.') {
            Some((category_path, field)) => self.resolve_field(category_path, field),
            None => Err(FakerError::MissingField {
                locale: self.locale.clone(),
                category: String::new(),
                field: reference.to_owned(),
            }),
        }
    }

    fn table(&self, locale: &str) -> Option<&LocaleTable> {
        self.catalog.get(locale)
    }
}

fn ensure_known(catalog: &LocaleCatalog, locale: &str) -> Result<(), CatalogError> {
    if catalog.contains(locale) {
        Ok(())
    } else {
        Err(CatalogError::UnknownLocale {
            locale: locale.to_owned(),
        })
    }
}
