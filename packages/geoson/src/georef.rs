//! Document georeferencing: CRS, datum and heading.
//!
//! These live under the top-level `properties` object alongside any other
//! document-level properties:
//!
//! ```json
//! "properties": { "crs": "EPSG:4326", "datum": [52.1, 5.2, 0.0], "heading": 0.0 }
//! ```

use std::str::FromStr as _;

use geoson_models::{Crs, Datum, Euler, Properties};
use serde_json::{Map, Value};

use crate::GeosonError;
use crate::properties::flatten_value;

/// Keys consumed by georeferencing and excluded from the global properties.
pub const RESERVED_KEYS: &[&str] = &["crs", "datum", "heading"];

/// Georeferencing resolved once per document.
///
/// Duplicate keys in `properties` resolve to the last occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Georeference {
    /// How positions are interpreted.
    pub crs: Crs,
    /// Anchor of the local frame, from `datum` as `[lat, lon, alt]`.
    pub datum: Datum,
    /// `heading` as yaw; roll and pitch are zero.
    pub heading: Euler,
    /// Remaining document-level properties.
    pub global_properties: Properties,
}

/// Resolves georeferencing from a `FeatureCollection` object.
///
/// # Errors
///
/// * If `properties` is missing or not an object
/// * If `crs` is missing, not a string, or not a recognized CRS
/// * If `datum` is not an array starting with three numbers
/// * If `heading` is missing or not a number
pub fn resolve(collection: &Map<String, Value>) -> Result<Georeference, GeosonError> {
    let Some(Value::Object(properties)) = collection.get("properties") else {
        return Err(GeosonError::MissingProperties);
    };

    let Some(Value::String(crs)) = properties.get("crs") else {
        return Err(GeosonError::MissingCrs);
    };

    let datum = properties
        .get("datum")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .and_then(parse_datum)
        .ok_or(GeosonError::InvalidDatum)?;

    let heading = properties
        .get("heading")
        .and_then(Value::as_f64)
        .ok_or(GeosonError::MissingHeading)?;

    let crs = Crs::from_str(crs).map_err(|_| GeosonError::UnknownCrs { value: crs.clone() })?;

    let global_properties = properties
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), flatten_value(value)))
        .collect();

    Ok(Georeference {
        crs,
        datum,
        heading: Euler::from_yaw(heading),
        global_properties,
    })
}

fn parse_datum(values: &[Value]) -> Option<Datum> {
    match values {
        [lat, lon, alt, ..] => Some(Datum::new(lat.as_f64()?, lon.as_f64()?, alt.as_f64()?)),
        _ => None,
    }
}
