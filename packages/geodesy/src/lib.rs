#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geometry and geodesy primitives.
//!
//! Plain value types for points, lines and polygons expressed in a local
//! East-North-Up frame, plus the georeferencing types ([`Datum`], [`Euler`],
//! [`Wgs`]) needed to project geodetic coordinates into that frame.
//!
//! The only numeric transform here is [`Wgs::to_enu`], which goes through
//! Earth-centered Earth-fixed (ECEF) coordinates on the WGS84 ellipsoid.

use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// A point in the local tangent-plane frame, in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// East offset.
    pub x: f64,
    /// North offset.
    pub y: f64,
    /// Up offset.
    pub z: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A straight segment between exactly two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

impl Line {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// A single ring of points. Interior rings are not modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Ring vertices in order.
    pub vertices: Vec<Point>,
}

impl Polygon {
    #[must_use]
    pub const fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Number of vertices in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Geodetic anchor of a local tangent-plane frame.
///
/// Latitude and longitude are in degrees, altitude in meters above the
/// ellipsoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude reference in meters.
    pub alt: f64,
}

impl Datum {
    #[must_use]
    pub const fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }
}

/// Orientation as roll/pitch/yaw Euler angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation about the forward axis.
    pub roll: f64,
    /// Rotation about the lateral axis.
    pub pitch: f64,
    /// Rotation about the up axis (heading).
    pub yaw: f64,
}

impl Euler {
    #[must_use]
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// A pure heading: roll and pitch are zero.
    #[must_use]
    pub const fn from_yaw(yaw: f64) -> Self {
        Self::new(0.0, 0.0, yaw)
    }
}

/// Earth-centered Earth-fixed coordinates in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Local East-North-Up offset from a [`Datum`], in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enu {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Enu> for Point {
    fn from(enu: Enu) -> Self {
        Self::new(enu.x, enu.y, enu.z)
    }
}

/// A geodetic coordinate on the WGS84 ellipsoid (degrees, meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wgs {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl Wgs {
    #[must_use]
    pub const fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Converts this coordinate to ECEF.
    #[must_use]
    pub fn to_ecef(&self) -> Ecef {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        // Radius of curvature in the prime vertical
        let n = WGS84_A / WGS84_E2.mul_add(-sin_lat * sin_lat, 1.0).sqrt();

        Ecef {
            x: (n + self.alt) * cos_lat * cos_lon,
            y: (n + self.alt) * cos_lat * sin_lon,
            z: n.mul_add(1.0 - WGS84_E2, self.alt) * sin_lat,
        }
    }

    /// Projects this coordinate into the ENU frame anchored at `datum`.
    #[must_use]
    pub fn to_enu(&self, datum: &Datum) -> Enu {
        let origin = Self::from(*datum).to_ecef();
        let target = self.to_ecef();

        let dx = target.x - origin.x;
        let dy = target.y - origin.y;
        let dz = target.z - origin.z;

        let (sin_lat, cos_lat) = datum.lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = datum.lon.to_radians().sin_cos();

        Enu {
            x: (-sin_lon).mul_add(dx, cos_lon * dy),
            y: (-sin_lat * cos_lon).mul_add(dx, (-sin_lat * sin_lon).mul_add(dy, cos_lat * dz)),
            z: (cos_lat * cos_lon).mul_add(dx, (cos_lat * sin_lon).mul_add(dy, sin_lat * dz)),
        }
    }
}

impl From<Datum> for Wgs {
    fn from(datum: Datum) -> Self {
        Self::new(datum.lat, datum.lon, datum.alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn datum_projects_to_origin() {
        let datum = Datum::new(0.0, 0.0, 0.0);
        let enu = Wgs::new(0.0, 0.0, 0.0).to_enu(&datum);
        assert!(enu.x.abs() < TOLERANCE);
        assert!(enu.y.abs() < TOLERANCE);
        assert!(enu.z.abs() < TOLERANCE);
    }

    #[test]
    fn non_zero_datum_projects_to_origin() {
        let datum = Datum::new(52.52, 13.405, 34.0);
        let enu = Wgs::from(datum).to_enu(&datum);
        assert!(enu.x.abs() < TOLERANCE);
        assert!(enu.y.abs() < TOLERANCE);
        assert!(enu.z.abs() < TOLERANCE);
    }

    #[test]
    fn east_offset_on_equator() {
        let datum = Datum::new(0.0, 0.0, 0.0);
        let enu = Wgs::new(0.0, 0.001, 0.0).to_enu(&datum);
        assert!((enu.x - 111.319).abs() < 0.01);
        assert!(enu.y.abs() < 1e-3);
        // Earth curves away below the tangent plane
        assert!(enu.z < 0.0 && enu.z > -0.01);
    }

    #[test]
    fn north_offset_is_positive_y() {
        let datum = Datum::new(45.0, 7.0, 0.0);
        let enu = Wgs::new(45.001, 7.0, 0.0).to_enu(&datum);
        assert!(enu.x.abs() < 1e-3);
        assert!((enu.y - 111.13).abs() < 0.05);
    }

    #[test]
    fn altitude_maps_to_up() {
        let datum = Datum::new(10.0, 20.0, 0.0);
        let enu = Wgs::new(10.0, 20.0, 100.0).to_enu(&datum);
        assert!((enu.z - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn ecef_on_equator_prime_meridian() {
        let ecef = Wgs::new(0.0, 0.0, 0.0).to_ecef();
        assert!((ecef.x - WGS84_A).abs() < TOLERANCE);
        assert!(ecef.y.abs() < TOLERANCE);
        assert!(ecef.z.abs() < TOLERANCE);
    }

    #[test]
    fn euler_from_yaw_zeroes_roll_and_pitch() {
        let euler = Euler::from_yaw(1.5);
        assert_eq!(euler, Euler::new(0.0, 0.0, 1.5));
    }
}
