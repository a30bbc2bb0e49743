#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed model of a georeferenced GeoJSON document.
//!
//! A [`FeatureCollection`] owns the document datum and heading, the
//! document-level properties, and an ordered list of [`Feature`]s. Every
//! coordinate held here is already expressed in the local ENU frame anchored
//! at the datum; geodetic values never reach this crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use geoson_geodesy::{Datum, Euler, Line, Point, Polygon};

/// Flattened feature or document properties.
///
/// String values are kept verbatim; every other JSON value is stored as its
/// compact JSON text.
pub type Properties = BTreeMap<String, String>;

/// Coordinate reference system declared by a document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Crs {
    /// Geodetic longitude/latitude/altitude, projected into the local frame.
    #[strum(to_string = "WGS", serialize = "WGS84", serialize = "EPSG:4326")]
    Wgs,
    /// Coordinates already in a local planar frame.
    #[strum(to_string = "ENU", serialize = "ECEF")]
    Enu,
}

/// Shape kind of a [`Geometry`], used for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GeometryKind {
    /// [`Geometry::Point`]
    Point,
    /// [`Geometry::Line`]
    Line,
    /// [`Geometry::Path`]
    Path,
    /// [`Geometry::Polygon`]
    Polygon,
}

/// A single parsed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Geometry {
    /// A single position.
    Point(Point),
    /// A line string of exactly two points.
    Line(Line),
    /// A line string of any length other than two.
    Path(Vec<Point>),
    /// Outer ring only.
    Polygon(Polygon),
}

impl Geometry {
    /// Builds a line-string geometry: a [`Line`] when there are exactly two
    /// points, a [`Geometry::Path`] otherwise.
    #[must_use]
    pub fn from_line_string(points: Vec<Point>) -> Self {
        match points.as_slice() {
            [start, end] => Self::Line(Line::new(*start, *end)),
            _ => Self::Path(points),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::Line(_) => GeometryKind::Line,
            Self::Path(_) => GeometryKind::Path,
            Self::Polygon(_) => GeometryKind::Polygon,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// One geometry with its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// The shape, in the local frame.
    pub geometry: Geometry,
    /// This feature's own copy of its source feature's properties.
    pub properties: Properties,
}

/// The parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollection {
    /// Anchor of the local frame every [`Point`] is expressed in.
    pub datum: Datum,
    /// Document heading. Only `yaw` is populated.
    pub heading: Euler,
    /// Document-level properties other than `crs`, `datum` and `heading`.
    pub global_properties: Properties,
    /// Features in document order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection anchored at `datum`.
    #[must_use]
    pub const fn new(datum: Datum, heading: Euler) -> Self {
        Self {
            datum,
            heading,
            global_properties: Properties::new(),
            features: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterates over the geometries of every feature, in order.
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
        self.features.iter().map(|feature| &feature.geometry)
    }
}

/// Human-readable summary. Not a stable machine format.
impl fmt::Display for FeatureCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DATUM: {}, {}, {}",
            self.datum.lat, self.datum.lon, self.datum.alt
        )?;
        writeln!(f, "HEADING: {}", self.heading.yaw)?;
        writeln!(f, "FEATURES: {}", self.features.len())?;

        for feature in &self.features {
            writeln!(f, "  {}", feature.geometry)?;
            if !feature.properties.is_empty() {
                writeln!(f, "    PROPS:{}", feature.properties.len())?;
            }
        }

        Ok(())
    }
}
