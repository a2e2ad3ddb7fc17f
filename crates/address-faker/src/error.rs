//! Error types for the address-faker crate.
//!
//! This module defines semantic error enums for catalog loading and value
//! generation, following the project's error handling conventions with
//! `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading locale catalogs or selecting locales.
///
/// These errors cover file I/O, JSON parsing, configuration parsing, and
/// locale lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A locale file or directory could not be read.
    #[error("failed to read locale data at '{path}': {message}")]
    IoError {
        /// Path to the locale file or directory.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Locale JSON is malformed or has an unexpected shape.
    #[error("invalid locale JSON in '{source_name}': {message}")]
    ParseError {
        /// Locale identifier or file name the JSON came from.
        source_name: String,
        /// Description of the parse error.
        message: String,
    },

    /// The catalog contains no locales.
    #[error("locale catalog contains no locales")]
    EmptyCatalog,

    /// The requested locale is not part of the catalog.
    #[error("locale '{locale}' not found in catalog")]
    UnknownLocale {
        /// The locale identifier that was not found.
        locale: String,
    },

    /// The faker configuration JSON is malformed.
    #[error("invalid faker configuration: {message}")]
    InvalidConfig {
        /// Description of the parse error.
        message: String,
    },
}

/// Errors that can occur while generating values.
///
/// Every generation failure is reported to the caller; none of them are
/// retried because generation is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FakerError {
    /// A pick was requested over an empty collection.
    #[error("cannot pick from an empty {domain}")]
    EmptyDomain {
        /// Kind of collection that was empty.
        domain: &'static str,
    },

    /// Numeric bounds where the minimum exceeds the maximum.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Rendered lower bound.
        min: String,
        /// Rendered upper bound.
        max: String,
    },

    /// Neither the active locale nor the fallback defines the field.
    #[error("field '{category}.{field}' missing in locale '{locale}' and its fallback")]
    MissingField {
        /// Active locale at the time of the lookup.
        locale: String,
        /// Dot-separated category path.
        category: String,
        /// Field name within the category.
        field: String,
    },

    /// The region code is absent from the region range table.
    #[error("unknown region '{region}'")]
    UnknownRegion {
        /// The region code that was requested.
        region: String,
    },

    /// Format references nested deeper than the supported bound.
    #[error("format reference '{reference}' exceeds maximum depth of {depth}")]
    FormatRecursion {
        /// The reference that would have exceeded the bound.
        reference: String,
        /// The maximum supported depth.
        depth: usize,
    },

    /// A field holds a value kind the operation cannot use.
    #[error("field '{path}' holds {found}, expected {expected}")]
    UnexpectedValueKind {
        /// Full dot-separated path of the field.
        path: String,
        /// Kind of value the operation needed.
        expected: &'static str,
        /// Kind of value the field holds.
        found: &'static str,
    },

    /// The precision cannot be represented exactly for the requested bounds.
    #[error("precision {precision} is not supported for this range (maximum {max_precision})")]
    UnsupportedPrecision {
        /// Requested number of fractional digits.
        precision: u32,
        /// Largest supported precision.
        max_precision: u32,
    },
}
