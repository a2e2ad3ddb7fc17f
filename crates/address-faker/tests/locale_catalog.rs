//! Integration tests for loading locale catalogs from disk.
//!
//! These tests write locale files into a scratch directory and exercise
//! directory loading, error reporting, and fallback resolution on the result.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use std::sync::Arc;

use address_faker::{
    CatalogError, Faker, FakerConfig, LocaleCatalog, LocaleRegistry, LocaleValue, Origin,
};
use camino::Utf8Path;
use rstest::rstest;
use test_support::{unique_temp_dir, write_locale_dir};

const EN_JSON: &str = r#"{
    "title": "English",
    "separator": " & ",
    "address": {
        "city_prefix": ["North", "South"],
        "city_suffix": ["ville"],
        "city": ["{{address.city_prefix}}{{address.city_suffix}}"]
    }
}"#;

const EN_GB_JSON: &str = r#"{
    "title": "English (Great Britain)",
    "address": {
        "city_suffix": ["ford"],
        "postcode": ["??# #??"]
    }
}"#;

#[test]
fn loads_every_json_file_in_a_directory() {
    let path = write_locale_dir(
        "catalog-load",
        &[
            ("en.json", EN_JSON),
            ("en_GB.json", EN_GB_JSON),
            ("README.md", "not a locale"),
        ],
    )
    .expect("write locale files");

    let catalog = LocaleCatalog::from_dir(&path).expect("directory loads");

    let ids: Vec<_> = catalog.locale_ids().collect();
    assert_eq!(ids, vec!["en", "en_GB"]);
    assert_eq!(
        catalog.get("en_GB").and_then(|table| table.title()),
        Some("English (Great Britain)")
    );
}

#[test]
fn loaded_locales_fall_back_to_base_locale() {
    let path = write_locale_dir("catalog-fallback", &[("en.json", EN_JSON), ("en_GB.json", EN_GB_JSON)])
        .expect("write locale files");
    let catalog = Arc::new(LocaleCatalog::from_dir(&path).expect("directory loads"));
    let registry = LocaleRegistry::new(catalog, "en_GB", "en").expect("known locales");

    let prefix = registry
        .resolve_field("address", "city_prefix")
        .expect("fallback provides prefix");
    let suffix = registry
        .resolve_field("address", "city_suffix")
        .expect("locale provides suffix");

    assert_eq!(prefix.origin, Origin::Fallback);
    assert_eq!(suffix.origin, Origin::Primary);
    assert_eq!(suffix.value, &LocaleValue::List(vec!["ford".to_owned()]));
}

#[test]
fn generated_cities_mix_locale_and_fallback_fields() {
    let path = write_locale_dir("catalog-generate", &[("en.json", EN_JSON), ("en_GB.json", EN_GB_JSON)])
        .expect("write locale files");
    let catalog = LocaleCatalog::from_dir(&path).expect("directory loads");
    let config = FakerConfig::default().with_locale("en_GB").with_seed(7_u32);
    let mut faker = Faker::new(catalog, &config).expect("known locales");

    for _ in 0..20 {
        let city = faker.address().city().expect("city resolves");
        assert!(city == "Northford" || city == "Southford", "unexpected {city}");
    }
}

#[test]
fn missing_directory_is_an_io_error() {
    let result = LocaleCatalog::from_dir(Utf8Path::new("target/address-faker-tests/absent"));
    assert!(matches!(result, Err(CatalogError::IoError { .. })));
}

#[test]
fn directory_without_locales_is_empty() {
    let path = unique_temp_dir("catalog-empty").expect("create directory");
    assert_eq!(LocaleCatalog::from_dir(&path), Err(CatalogError::EmptyCatalog));
}

#[rstest]
#[case::malformed("{ not json")]
#[case::bad_value(r#"{"address": {"city": 12}}"#)]
fn malformed_file_is_a_parse_error(#[case] contents: &str) {
    let path = write_locale_dir("catalog-malformed", &[("en.json", contents)])
        .expect("write locale files");

    let result = LocaleCatalog::from_dir(&path);

    assert!(matches!(
        result,
        Err(CatalogError::ParseError { source_name, .. }) if source_name == "en.json"
    ));
}

#[test]
fn summaries_report_titles_and_placeholders() {
    let path = write_locale_dir(
        "catalog-summaries",
        &[("en.json", EN_JSON), ("xx.json", r#"{"address": {}}"#)],
    )
    .expect("write locale files");
    let catalog = LocaleCatalog::from_dir(&path).expect("directory loads");

    let summaries = catalog.summaries();
    let titles: Vec<_> = summaries.iter().map(|summary| summary.title.as_str()).collect();

    assert_eq!(titles, vec!["English", "Untitled locale (xx)"]);
    assert_eq!(
        summaries.first().and_then(|summary| summary.separator.as_deref()),
        Some(" & ")
    );
}

#[test]
fn config_file_selects_locale_and_seed() {
    let path = write_locale_dir(
        "catalog-config",
        &[("faker.json", r#"{"locale": "en_CA", "seed": 1211}"#)],
    )
    .expect("write config file");

    let config = FakerConfig::from_file(&path.join("faker.json")).expect("config parses");
    let catalog = LocaleCatalog::builtin().expect("bundled locales parse");
    let faker = Faker::new(catalog, &config).expect("known locales");

    assert_eq!(faker.locale(), "en_CA");
    assert_eq!(faker.seed_value().to_string(), "1211");
}
