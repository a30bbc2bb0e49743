#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GeoJSON to local-frame feature collection parser.
//!
//! Reads a GeoJSON document (a `FeatureCollection`, a single `Feature`, or a
//! bare geometry) whose top-level `properties` carry `crs`, `datum` and
//! `heading`, and produces a [`FeatureCollection`] whose points are all
//! expressed in the ENU frame anchored at the datum.
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "properties": { "crs": "EPSG:4326", "datum": [52.1, 5.2, 0.0], "heading": 0.0 },
//!   "features": [ ... ]
//! }
//! ```
//!
//! Any schema violation aborts the whole parse. Features that cannot be
//! represented (no geometry, unknown geometry type, missing coordinates) are
//! dropped without error.

pub mod coordinates;
pub mod geometry;
pub mod georef;
pub mod normalize;
pub mod properties;

use std::path::{Path, PathBuf};

use geoson_models::{Feature, FeatureCollection};
use serde_json::Value;
use thiserror::Error;

use crate::coordinates::Frame;
use crate::geometry::parse_geometry;
use crate::georef::resolve;
use crate::normalize::normalize;
use crate::properties::flatten;

pub use geoson_models as models;

/// Errors that abort parsing a document.
#[derive(Debug, Error)]
pub enum GeosonError {
    /// The source file could not be read.
    #[error("Cannot open \"{}\": {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The input is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The root is not an object with a string `type`.
    #[error("Top-level object has no string 'type' field")]
    MalformedDocument,

    /// No top-level `properties` object.
    #[error("Missing top-level 'properties'")]
    MissingProperties,

    /// `properties.crs` is missing or not a string.
    #[error("'properties' missing string 'crs'")]
    MissingCrs,

    /// `properties.crs` is not a recognized CRS.
    #[error("Unknown CRS string: {value}")]
    UnknownCrs {
        /// The rejected CRS string.
        value: String,
    },

    /// `properties.datum` is missing or has fewer than three numbers.
    #[error("'properties' missing array 'datum' of at least 3 numbers")]
    InvalidDatum,

    /// `properties.heading` is missing or not a number.
    #[error("'properties' missing numeric 'heading'")]
    MissingHeading,

    /// A position has fewer than two numeric entries.
    #[error("Invalid point coordinates: {position}")]
    InvalidPoint {
        /// The offending position as compact JSON.
        position: String,
    },
}

/// Reads and parses a GeoJSON file.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the contents fail [`parse_feature_collection`]
pub fn read_feature_collection(path: impl AsRef<Path>) -> Result<FeatureCollection, GeosonError> {
    let path = path.as_ref();
    log::debug!("Reading GeoJSON from {}", path.display());

    let text = std::fs::read_to_string(path).map_err(|source| GeosonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_feature_collection(&text)
}

/// Parses GeoJSON text.
///
/// # Errors
///
/// * If the text is not valid JSON
/// * If the document fails [`from_value`]
pub fn parse_feature_collection(text: &str) -> Result<FeatureCollection, GeosonError> {
    from_value(serde_json::from_str(text)?)
}

/// Builds a [`FeatureCollection`] from an already parsed JSON document.
///
/// # Errors
///
/// * If the root has no string `type`
/// * If the top-level `properties`, `crs`, `datum` or `heading` are missing
///   or malformed
/// * If any position has fewer than two numbers
pub fn from_value(root: Value) -> Result<FeatureCollection, GeosonError> {
    let document = normalize(root)?;
    let georef = resolve(&document)?;
    let frame = Frame::new(georef.crs, georef.datum);

    log::debug!(
        "Resolved crs={} datum=({}, {}, {}) heading={}",
        georef.crs,
        georef.datum.lat,
        georef.datum.lon,
        georef.datum.alt,
        georef.heading.yaw
    );

    let mut collection = FeatureCollection::new(georef.datum, georef.heading);
    collection.global_properties = georef.global_properties;

    let entries = document
        .get("features")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    for (index, entry) in entries.iter().enumerate() {
        let Some(feature) = entry.as_object() else {
            log::debug!("Skipping feature {index}: not an object");
            continue;
        };

        let geometry = match feature.get("geometry") {
            None | Some(Value::Null) => {
                log::debug!("Skipping feature {index}: no geometry");
                continue;
            }
            Some(geometry) => geometry,
        };

        let geometries = parse_geometry(geometry, &frame)?;
        let properties = flatten(feature.get("properties").and_then(Value::as_object));

        collection
            .features
            .extend(geometries.into_iter().map(|geometry| Feature {
                geometry,
                properties: properties.clone(),
            }));
    }

    log::debug!(
        "Parsed {} feature(s) from {} input feature(s)",
        collection.features.len(),
        entries.len()
    );

    Ok(collection)
}
