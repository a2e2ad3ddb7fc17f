//! Boundedness tests for nearby-coordinate sampling.
//!
//! Each trial draws a random origin, radius, and unit system, samples a
//! nearby coordinate, and measures the great-circle distance back to the
//! origin in the same unit system.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "distance assertions are floating-point"
)]

use address_faker::geo::{self, DEFAULT_RADIUS};
use address_faker::{Coordinate, DistanceUnit, Faker, FakerConfig, GeoSampling, LocaleCatalog};
use rstest::{fixture, rstest};

const TRIALS: usize = 10_000;

/// Tolerance for the flat-degree approximation and output rounding.
const DISTANCE_MARGIN: f64 = 1.0;

#[fixture]
fn catalog() -> LocaleCatalog {
    LocaleCatalog::builtin().expect("bundled locales parse")
}

fn faker_with(catalog: LocaleCatalog, sampling: GeoSampling) -> Faker {
    let config = FakerConfig {
        geo_sampling: sampling,
        ..FakerConfig::default().with_seed(20_231_024_u32)
    };
    Faker::new(catalog, &config).expect("known locales")
}

#[rstest]
#[case::flat_disk(GeoSampling::FlatDisk)]
#[case::spherical_cap(GeoSampling::SphericalCap)]
fn nearby_points_stay_within_radius(catalog: LocaleCatalog, #[case] sampling: GeoSampling) {
    let mut faker = faker_with(catalog, sampling);

    for trial in 0..TRIALS {
        let mut address = faker.address();
        let latitude = address.latitude(None, None, None).expect("default bounds");
        let longitude = address.longitude(None, None, None).expect("default bounds");
        let origin = Coordinate::new(latitude.to_f64(), longitude.to_f64());

        let random = faker.random_mut();
        let radius = random.next_unit() * 99.0 + 1.0;
        let is_metric = random.next_bool();

        let point = faker
            .address()
            .nearby_gps_coordinate(Some(origin), Some(radius), is_metric)
            .expect("valid radius")
            .to_coordinate();

        assert!((-90.0..=90.0).contains(&point.latitude), "trial {trial}: {point:?}");
        assert!((-180.0..=180.0).contains(&point.longitude), "trial {trial}: {point:?}");

        let distance =
            geo::great_circle_distance(origin, point, DistanceUnit::from_metric(is_metric));
        assert!(
            distance <= radius + DISTANCE_MARGIN,
            "trial {trial}: {distance} exceeds {radius} from {origin:?}"
        );
    }
}

#[rstest]
#[case::metric(true)]
#[case::imperial(false)]
fn default_radius_stays_close(catalog: LocaleCatalog, #[case] is_metric: bool) {
    let mut faker = faker_with(catalog, GeoSampling::FlatDisk);
    let unit = DistanceUnit::from_metric(is_metric);

    for _ in 0..1_000 {
        let origin = Coordinate::new(40.7128, -74.0060);
        let point = faker
            .address()
            .nearby_gps_coordinate(Some(origin), None, is_metric)
            .expect("default radius")
            .to_coordinate();

        let distance = geo::great_circle_distance(origin, point, unit);
        assert!(distance <= DEFAULT_RADIUS + DISTANCE_MARGIN, "{distance}");
    }
}

#[rstest]
fn output_has_fixed_precision(catalog: LocaleCatalog) {
    let mut faker = faker_with(catalog, GeoSampling::FlatDisk);

    for _ in 0..200 {
        let point = faker
            .address()
            .nearby_gps_coordinate(None, None, true)
            .expect("random origin");
        for rendered in [point.latitude.to_string(), point.longitude.to_string()] {
            let digits = rendered.split_once('.').map(|(_, fraction)| fraction.len());
            assert_eq!(digits, Some(4), "{rendered}");
        }
    }
}

#[rstest]
fn same_seed_yields_same_coordinates(catalog: LocaleCatalog) {
    let mut first = faker_with(catalog.clone(), GeoSampling::FlatDisk);
    let mut second = faker_with(catalog, GeoSampling::FlatDisk);

    for _ in 0..100 {
        assert_eq!(
            first.address().nearby_gps_coordinate(None, Some(25.0), false),
            second.address().nearby_gps_coordinate(None, Some(25.0), false)
        );
    }
}
