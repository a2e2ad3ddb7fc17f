//! Geospatial sampling around a reference coordinate.
//!
//! The default [`GeoSampling::FlatDisk`] strategy converts the radius to
//! degrees with a single constant of 111.045 km per degree on both axes. This
//! is a coarse flat-earth approximation: the error grows at high latitudes and
//! with large radii, and distances measured on the sphere may exceed the
//! requested radius by a small margin. [`GeoSampling::SphericalCap`] samples
//! the great-circle cap instead and stays within the radius.
#![expect(
    clippy::float_arithmetic,
    reason = "coordinate sampling and distance math are floating-point"
)]

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::FakerError;
use crate::numeric::{DEFAULT_PRECISION, FixedDecimal};
use crate::random::{RandomSource, SeedableEngine};

/// Kilometres spanned by one degree in the flat approximation.
pub const KM_PER_DEGREE: f64 = 111.045;

/// Equatorial earth radius used for great-circle math, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Kilometres in one statute mile.
pub const KM_PER_MILE: f64 = 1.609_344;

/// Radius used when the caller does not supply one.
pub const DEFAULT_RADIUS: f64 = 100.0;

/// Fractional digits of sampled output coordinates.
pub const COORDINATE_PRECISION: u32 = DEFAULT_PRECISION;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without normalising it.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Clamps latitude to `[-90, 90]` and wraps longitude into `[-180, 180)`.
    ///
    /// # Example
    ///
    /// ```
    /// use address_faker::Coordinate;
    ///
    /// let wrapped = Coordinate::new(95.0, 190.0).normalized();
    /// assert_eq!(wrapped, Coordinate::new(90.0, -170.0));
    /// ```
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            latitude: self.latitude.clamp(-90.0, 90.0),
            longitude: (self.longitude + 180.0).rem_euclid(360.0) - 180.0,
        }
    }

    const fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Unit system for radii and distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    /// Kilometres.
    #[default]
    Kilometres,
    /// Statute miles.
    Miles,
}

impl DistanceUnit {
    /// Selects kilometres when `is_metric`, miles otherwise.
    #[must_use]
    pub const fn from_metric(is_metric: bool) -> Self {
        if is_metric {
            Self::Kilometres
        } else {
            Self::Miles
        }
    }

    /// Converts a distance in this unit to kilometres.
    #[must_use]
    pub const fn to_km(self, distance: f64) -> f64 {
        match self {
            Self::Kilometres => distance,
            Self::Miles => distance * KM_PER_MILE,
        }
    }

    /// Converts a distance in kilometres to this unit.
    #[must_use]
    pub const fn from_km(self, km: f64) -> f64 {
        match self {
            Self::Kilometres => km,
            Self::Miles => km / KM_PER_MILE,
        }
    }
}

/// Strategy used to place points around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeoSampling {
    /// Uniform over a disk measured in flat degrees.
    #[default]
    FlatDisk,
    /// Uniform over the spherical cap of the given great-circle radius.
    SphericalCap,
}

/// A sampled coordinate rendered with fixed decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GpsCoordinate {
    /// Latitude in degrees.
    pub latitude: FixedDecimal,
    /// Longitude in degrees.
    pub longitude: FixedDecimal,
}

impl GpsCoordinate {
    /// Normalises `coordinate` and rounds it to [`COORDINATE_PRECISION`]
    /// digits.
    #[must_use]
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        let normalized = coordinate.normalized();
        Self {
            latitude: FixedDecimal::from_f64(normalized.latitude, COORDINATE_PRECISION),
            longitude: FixedDecimal::from_f64(normalized.longitude, COORDINATE_PRECISION),
        }
    }

    /// Returns the coordinate as floating-point degrees.
    #[must_use]
    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude.to_f64(), self.longitude.to_f64())
    }
}

/// Samples a coordinate within `radius` of `origin`.
///
/// `radius` is interpreted in `unit` and defaults to [`DEFAULT_RADIUS`]. Two
/// draws are consumed: one for the distance and one for the bearing.
///
/// # Errors
///
/// Returns [`FakerError::InvalidRange`] when the radius is negative or not
/// finite, or when the origin is not finite.
///
/// # Example
///
/// ```
/// use address_faker::{Coordinate, DistanceUnit, GeoSampling, RandomSource, Seed, geo};
///
/// let mut random: RandomSource = RandomSource::new(Seed::Single(42));
/// let origin = Coordinate::new(51.5072, -0.1276);
/// let point = geo::nearby(&mut random, origin, Some(10.0), DistanceUnit::Kilometres, GeoSampling::FlatDisk)
///     .expect("valid radius");
///
/// let distance = geo::great_circle_distance(origin, point.to_coordinate(), DistanceUnit::Kilometres);
/// assert!(distance <= 11.0);
/// ```
pub fn nearby<R: SeedableEngine>(
    random: &mut RandomSource<R>,
    origin: Coordinate,
    radius: Option<f64>,
    unit: DistanceUnit,
    sampling: GeoSampling,
) -> Result<GpsCoordinate, FakerError> {
    let distance = radius.unwrap_or(DEFAULT_RADIUS);
    if !distance.is_finite() || distance < 0.0 || !origin.is_finite() {
        return Err(FakerError::InvalidRange {
            min: "0".to_owned(),
            max: distance.to_string(),
        });
    }
    let radius_km = unit.to_km(distance);

    let point = match sampling {
        GeoSampling::FlatDisk => flat_disk(random, origin, radius_km),
        GeoSampling::SphericalCap => spherical_cap(random, origin, radius_km),
    };
    Ok(GpsCoordinate::from_coordinate(point))
}

fn flat_disk<R: SeedableEngine>(
    random: &mut RandomSource<R>,
    origin: Coordinate,
    radius_km: f64,
) -> Coordinate {
    let radius_degrees = radius_km / KM_PER_DEGREE;
    let distance = radius_degrees * random.next_unit().sqrt();
    let bearing = random.next_unit() * TAU;
    Coordinate::new(
        origin.latitude + distance * bearing.cos(),
        origin.longitude + distance * bearing.sin(),
    )
}

fn spherical_cap<R: SeedableEngine>(
    random: &mut RandomSource<R>,
    origin: Coordinate,
    radius_km: f64,
) -> Coordinate {
    let max_angle = (radius_km / EARTH_RADIUS_KM).min(std::f64::consts::PI);
    let cos_angle = 1.0 - random.next_unit() * (1.0 - max_angle.cos());
    let angle = cos_angle.clamp(-1.0, 1.0).acos();
    let bearing = random.next_unit() * TAU;

    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let sin_lat2 = lat1.sin() * angle.cos() + lat1.cos() * angle.sin() * bearing.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (bearing.sin() * angle.sin() * lat1.cos()).atan2(angle.cos() - lat1.sin() * sin_lat2);

    Coordinate::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Haversine distance between two coordinates on a sphere of radius
/// [`EARTH_RADIUS_KM`], expressed in `unit`.
///
/// # Example
///
/// ```
/// use address_faker::{Coordinate, DistanceUnit, geo};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let one_degree = Coordinate::new(1.0, 0.0);
/// let km = geo::great_circle_distance(origin, one_degree, DistanceUnit::Kilometres);
/// assert!((km - 111.32).abs() < 0.01);
/// ```
#[must_use]
pub fn great_circle_distance(from: Coordinate, to: Coordinate, unit: DistanceUnit) -> f64 {
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();
    let half_chord = (delta_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    unit.from_km(EARTH_RADIUS_KM * angle)
}
