//! Top-level document normalization.
//!
//! A GeoJSON document may be a `FeatureCollection`, a single `Feature`, or a
//! bare geometry. Everything downstream only deals with the collection shape,
//! so the other two are wrapped here.

use serde_json::{Map, Value, json};

use crate::GeosonError;

/// Returns the document as a `FeatureCollection` object.
///
/// A wrapped document keeps its own top-level `properties` on the
/// synthesized collection, so the georeferencing fields stay reachable.
///
/// # Errors
///
/// * If the root is not an object or has no string `type` field
pub fn normalize(root: Value) -> Result<Map<String, Value>, GeosonError> {
    let Value::Object(object) = root else {
        return Err(GeosonError::MalformedDocument);
    };

    let kind = match object.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        _ => return Err(GeosonError::MalformedDocument),
    };

    match kind.as_str() {
        "FeatureCollection" => Ok(object),
        "Feature" => {
            log::trace!("Wrapping bare Feature in a FeatureCollection");
            let properties = object.get("properties").cloned();
            Ok(wrap(Value::Object(object), properties))
        }
        other => {
            log::trace!("Wrapping bare {other} geometry in a FeatureCollection");
            let properties = object.get("properties").cloned();
            let feature = json!({
                "type": "Feature",
                "geometry": Value::Object(object),
                "properties": {},
            });
            Ok(wrap(feature, properties))
        }
    }
}

fn wrap(feature: Value, properties: Option<Value>) -> Map<String, Value> {
    let mut collection = Map::new();
    collection.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );
    collection.insert("features".to_string(), Value::Array(vec![feature]));
    if let Some(properties) = properties {
        collection.insert("properties".to_string(), properties);
    }
    collection
}
