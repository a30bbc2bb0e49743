//! Recursive parsing of GeoJSON geometry objects.
//!
//! Every geometry object produces zero or more [`Geometry`] values. Multi*
//! kinds and `GeometryCollection` flatten into one value per component, in
//! document order.

use geoson_models::{Geometry, Point, Polygon};
use serde_json::Value;
use strum_macros::{AsRefStr, EnumString};

use crate::GeosonError;
use crate::coordinates::Frame;

/// The seven GeoJSON geometry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum GeometryType {
    /// A single position.
    Point,
    /// An ordered list of positions.
    LineString,
    /// A list of linear rings; the first is the outer ring.
    Polygon,
    /// A list of positions, each its own point.
    MultiPoint,
    /// A list of line strings.
    MultiLineString,
    /// A list of polygons.
    MultiPolygon,
    /// A list of nested geometry objects under `geometries`.
    GeometryCollection,
}

/// Parses a geometry object.
///
/// Objects with a missing or unrecognized `type`, or without the
/// `coordinates` their type needs, produce no geometries. Only the outer ring
/// of a polygon is kept.
///
/// # Errors
///
/// * If any position is malformed (see [`Frame::point`])
pub fn parse_geometry(geometry: &Value, frame: &Frame) -> Result<Vec<Geometry>, GeosonError> {
    let Some(object) = geometry.as_object() else {
        log::debug!("Skipping geometry that is not an object");
        return Ok(vec![]);
    };

    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        log::debug!("Skipping geometry without a string type");
        return Ok(vec![]);
    };

    let Ok(kind) = kind.parse::<GeometryType>() else {
        log::debug!("Skipping unsupported geometry type '{kind}'");
        return Ok(vec![]);
    };

    let coordinates = object.get("coordinates").and_then(Value::as_array);

    match (kind, coordinates) {
        (GeometryType::GeometryCollection, _) => {
            parse_collection(object.get("geometries").and_then(Value::as_array), frame)
        }
        (_, None) => {
            log::debug!("Skipping {} without coordinates", kind.as_ref());
            Ok(vec![])
        }
        (GeometryType::Point, Some(position)) => Ok(vec![Geometry::Point(frame.point(position)?)]),
        (GeometryType::LineString, Some(positions)) => {
            Ok(vec![parse_line_string(positions, frame)?])
        }
        (GeometryType::Polygon, Some(rings)) => {
            Ok(vec![Geometry::Polygon(parse_polygon(rings, frame)?)])
        }
        (GeometryType::MultiPoint, Some(positions)) => arrays(positions)
            .map(|position| frame.point(position).map(Geometry::Point))
            .collect(),
        (GeometryType::MultiLineString, Some(lines)) => arrays(lines)
            .map(|line| parse_line_string(line, frame))
            .collect(),
        (GeometryType::MultiPolygon, Some(polygons)) => arrays(polygons)
            .map(|rings| parse_polygon(rings, frame).map(Geometry::Polygon))
            .collect(),
    }
}

/// Concatenates the geometries of every object member, in order.
fn parse_collection(
    members: Option<&Vec<Value>>,
    frame: &Frame,
) -> Result<Vec<Geometry>, GeosonError> {
    let Some(members) = members else {
        log::debug!("Skipping GeometryCollection without geometries");
        return Ok(vec![]);
    };

    let mut out = Vec::with_capacity(members.len());
    for member in members.iter().filter(|member| member.is_object()) {
        out.extend(parse_geometry(member, frame)?);
    }
    Ok(out)
}

/// Array-valued entries of `values`; anything else is skipped.
fn arrays(values: &[Value]) -> impl Iterator<Item = &[Value]> {
    values
        .iter()
        .filter_map(Value::as_array)
        .map(Vec::as_slice)
}

fn parse_positions(positions: &[Value], frame: &Frame) -> Result<Vec<Point>, GeosonError> {
    arrays(positions)
        .map(|position| frame.point(position))
        .collect()
}

/// A [`Geometry::Line`] for exactly two positions, otherwise a
/// [`Geometry::Path`].
fn parse_line_string(positions: &[Value], frame: &Frame) -> Result<Geometry, GeosonError> {
    Ok(Geometry::from_line_string(parse_positions(positions, frame)?))
}

/// Reads ring 0 only. Holes are dropped.
fn parse_polygon(rings: &[Value], frame: &Frame) -> Result<Polygon, GeosonError> {
    let Some(outer) = rings.first().and_then(Value::as_array) else {
        return Ok(Polygon::default());
    };

    if rings.len() > 1 {
        log::trace!("Dropping {} interior ring(s)", rings.len() - 1);
    }

    Ok(Polygon::new(parse_positions(outer, frame)?))
}
