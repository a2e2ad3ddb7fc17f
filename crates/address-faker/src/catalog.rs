//! Locale catalog types and JSON parsing.
//!
//! A catalog holds every loaded locale as an immutable tree of typed values.
//! Locales are loaded once, from JSON strings, from a directory of
//! `<locale>.json` files, or from the bundled English tables, and are then
//! shared read-only by every [`crate::LocaleRegistry`].

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::random::WeightedChoice;

const BUILTIN_LOCALES: [(&str, &str); 3] = [
    ("en", include_str!("../locales/en.json")),
    ("en_US", include_str!("../locales/en_US.json")),
    ("en_CA", include_str!("../locales/en_CA.json")),
];

/// A single value in a locale tree.
///
/// JSON strings become formats, string arrays become lists, arrays of
/// `{"value", "weight"}` objects become weighted lists, `{"min", "max"}`
/// objects become ranges, and any other object becomes a nested table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocaleValue {
    /// A single format string.
    Format(String),
    /// Ordered choices picked uniformly.
    List(Vec<String>),
    /// Choices picked proportionally to their weights.
    Weighted(Vec<WeightedChoice<String>>),
    /// An inclusive integer range.
    Range(RegionRange),
    /// A nested sub-table.
    Table(BTreeMap<String, LocaleValue>),
}

impl LocaleValue {
    /// Returns a short description of the value kind for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) => "a format",
            Self::List(_) => "a list",
            Self::Weighted(_) => "a weighted list",
            Self::Range(_) => "a range",
            Self::Table(_) => "a table",
        }
    }

    /// Returns the child entry when the value is a table.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Table(entries) => entries.get(key),
            _ => None,
        }
    }
}

/// An inclusive integer range with an optional zero-padding width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRange {
    /// Lowest value in the range.
    pub min: i64,
    /// Highest value in the range.
    pub max: i64,
    /// Minimum rendered width, padded with leading zeros.
    #[serde(default)]
    pub width: Option<usize>,
}

impl RegionRange {
    /// Renders `value` with the range's zero padding.
    ///
    /// # Example
    ///
    /// ```
    /// use address_faker::RegionRange;
    ///
    /// let connecticut = RegionRange { min: 6001, max: 6389, width: Some(5) };
    /// assert_eq!(connecticut.render(6020), "06020");
    /// ```
    #[must_use]
    pub fn render(&self, value: i64) -> String {
        let width = self.width.unwrap_or(0);
        format!("{value:0width$}")
    }
}

/// One locale: metadata plus a tree of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    title: Option<String>,
    separator: Option<String>,
    categories: BTreeMap<String, LocaleValue>,
}

impl LocaleTable {
    /// Parses a locale table from a JSON string.
    ///
    /// `source_name` identifies the locale or file in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ParseError`] if the JSON is malformed or a
    /// category does not match any value shape.
    pub fn from_json(source_name: &str, json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
            source_name: source_name.to_owned(),
            message: e.to_string(),
        })?;
        Self::from_value(source_name, value)
    }

    fn from_value(source_name: &str, value: Value) -> Result<Self, CatalogError> {
        let raw: RawLocaleTable =
            serde_json::from_value(value).map_err(|e| CatalogError::ParseError {
                source_name: source_name.to_owned(),
                message: e.to_string(),
            })?;

        Ok(Self {
            title: metadata_text(raw.title),
            separator: metadata_text(raw.separator),
            categories: raw.categories,
        })
    }

    /// Returns the human-readable locale title, if one was loaded.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the list separator, if one was loaded.
    #[must_use]
    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    /// Returns a top-level category.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&LocaleValue> {
        self.categories.get(name)
    }

    /// Descends the tree along `path`, returning `None` at the first missing
    /// node.
    #[must_use]
    pub fn find<'a, I>(&self, path: I) -> Option<&LocaleValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = path.into_iter();
        let first = segments.next()?;
        segments.try_fold(self.categories.get(first)?, |node, segment| {
            node.child(segment)
        })
    }
}

/// Keeps metadata only when it is a string; anything else counts as absent.
fn metadata_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

/// Display metadata for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSummary {
    /// Locale identifier.
    pub id: String,
    /// Human-readable title, or a placeholder when the locale has none.
    pub title: String,
    /// List separator, when the locale defines one.
    pub separator: Option<String>,
}

/// An immutable set of locales keyed by identifier.
///
/// # Example
///
/// ```
/// use address_faker::LocaleCatalog;
///
/// let json = r#"{
///     "en": {"title": "English", "address": {"city_prefix": ["North", "Lake"]}},
///     "en_XX": {"address": {"city_suffix": ["ville"]}}
/// }"#;
///
/// let catalog = LocaleCatalog::from_json(json).expect("valid catalog");
/// assert!(catalog.contains("en_XX"));
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCatalog {
    locales: BTreeMap<String, LocaleTable>,
}

impl LocaleCatalog {
    /// Parses a catalog from a JSON object mapping locale ids to tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ParseError`] for malformed JSON or tables, and
    /// [`CatalogError::EmptyCatalog`] if the object has no locales.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
                source_name: "catalog".to_owned(),
                message: e.to_string(),
            })?;

        let locales = raw
            .into_iter()
            .map(|(id, value)| LocaleTable::from_value(&id, value).map(|table| (id, table)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Self::from_tables(locales)
    }

    /// Builds a catalog from already parsed tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyCatalog`] if no tables are supplied.
    pub fn from_tables<I>(tables: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, LocaleTable)>,
    {
        let locales: BTreeMap<_, _> = tables.into_iter().collect();
        if locales.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Self { locales })
    }

    /// Loads every `<locale>.json` file in a directory.
    ///
    /// Entries that are not regular `.json` files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the directory or a file cannot be
    /// read, [`CatalogError::ParseError`] if a file is malformed, and
    /// [`CatalogError::EmptyCatalog`] if no locale files were found.
    pub fn from_dir(path: &Utf8Path) -> Result<Self, CatalogError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| io_error(path, &err))?;
        let mut locales = BTreeMap::new();

        for listed in dir.entries().map_err(|err| io_error(path, &err))? {
            let entry = listed.map_err(|err| io_error(path, &err))?;
            let is_file = entry
                .file_type()
                .map_err(|err| io_error(path, &err))?
                .is_file();
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            let Some(locale) = file_name.strip_suffix(".json") else {
                continue;
            };
            if !is_file {
                continue;
            }

            let contents = dir
                .read_to_string(&file_name)
                .map_err(|err| io_error(&path.join(&file_name), &err))?;
            let table = LocaleTable::from_json(&file_name, &contents)?;
            locales.insert(locale.to_owned(), table);
        }

        debug!(%path, locales = locales.len(), "loaded locale catalog from directory");
        Self::from_tables(locales)
    }

    /// Returns the bundled `en`, `en_US`, and `en_CA` locales.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ParseError`] if a bundled table is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        let locales = BUILTIN_LOCALES
            .iter()
            .map(|(id, json)| LocaleTable::from_json(id, json).map(|table| ((*id).to_owned(), table)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tables(locales)
    }

    /// Returns the table for a locale.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&LocaleTable> {
        self.locales.get(locale)
    }

    /// Returns `true` if the catalog holds `locale`.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Returns the locale identifiers in sorted order.
    pub fn locale_ids(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Returns the number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Returns `true` if the catalog has no locales.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Lists every locale with its display metadata.
    ///
    /// A locale without a title gets a descriptive placeholder and a warning
    /// is logged; generation data is never substituted this way.
    #[must_use]
    pub fn summaries(&self) -> Vec<LocaleSummary> {
        self.locales
            .iter()
            .map(|(id, table)| {
                let title = table.title().map_or_else(
                    || {
                        warn!(locale = %id, "locale has no title metadata; using placeholder");
                        format!("Untitled locale ({id})")
                    },
                    str::to_owned,
                );
                LocaleSummary {
                    id: id.clone(),
                    title,
                    separator: table.separator().map(str::to_owned),
                }
            })
            .collect()
    }
}

fn io_error(path: &Utf8Path, err: &std::io::Error) -> CatalogError {
    CatalogError::IoError {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Raw JSON representation of a locale table.
#[derive(Debug, Deserialize)]
struct RawLocaleTable {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    separator: Option<Value>,
    #[serde(flatten)]
    categories: BTreeMap<String, LocaleValue>,
}
