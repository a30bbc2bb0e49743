//! Coordinate interpretation.
//!
//! This is the only place where the document CRS changes numeric output.

use geoson_geodesy::Wgs;
use geoson_models::{Crs, Datum, Point};
use serde_json::Value;

use crate::GeosonError;

/// The CRS and datum every coordinate of a document is read against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub crs: Crs,
    pub datum: Datum,
}

impl Frame {
    #[must_use]
    pub const fn new(crs: Crs, datum: Datum) -> Self {
        Self { crs, datum }
    }

    /// Reads a GeoJSON position (`[x, y]` or `[x, y, z]`) into a local-frame
    /// point.
    ///
    /// For [`Crs::Enu`] the values are taken as-is. For [`Crs::Wgs`] they are
    /// longitude, latitude and altitude and get projected into the ENU frame
    /// anchored at the datum. A missing or non-numeric third value is `0.0`.
    ///
    /// # Errors
    ///
    /// * If the position has fewer than two entries or the first two are not
    ///   numbers
    pub fn point(&self, position: &[Value]) -> Result<Point, GeosonError> {
        let invalid = || GeosonError::InvalidPoint {
            position: Value::Array(position.to_vec()).to_string(),
        };

        let [x, y, rest @ ..] = position else {
            return Err(invalid());
        };
        let x = x.as_f64().ok_or_else(invalid)?;
        let y = y.as_f64().ok_or_else(invalid)?;
        let z = rest.first().and_then(Value::as_f64).unwrap_or(0.0);

        Ok(match self.crs {
            Crs::Enu => Point::new(x, y, z),
            Crs::Wgs => Wgs::new(y, x, z).to_enu(&self.datum).into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn position(value: &Value) -> Vec<Value> {
        value.as_array().unwrap().clone()
    }

    #[test]
    fn local_frame_passes_through() {
        let frame = Frame::new(Crs::Enu, Datum::new(45.0, 7.0, 100.0));
        let point = frame.point(&position(&json!([10.0, 20.0, 5.0]))).unwrap();
        assert_eq!(point, Point::new(10.0, 20.0, 5.0));
    }

    #[test]
    fn missing_z_defaults_to_zero() {
        let frame = Frame::new(Crs::Enu, Datum::default());
        let point = frame.point(&position(&json!([1, 2]))).unwrap();
        assert_eq!(point, Point::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn extra_entries_are_ignored() {
        let frame = Frame::new(Crs::Enu, Datum::default());
        let point = frame.point(&position(&json!([1, 2, 3, 4]))).unwrap();
        assert_eq!(point, Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn geodetic_at_datum_is_origin() {
        let frame = Frame::new(Crs::Wgs, Datum::new(0.0, 0.0, 0.0));
        let point = frame.point(&position(&json!([0.0, 0.0, 0.0]))).unwrap();
        assert!(point.x.abs() < TOLERANCE);
        assert!(point.y.abs() < TOLERANCE);
        assert!(point.z.abs() < TOLERANCE);
    }

    #[test]
    fn geodetic_reads_longitude_first() {
        let frame = Frame::new(Crs::Wgs, Datum::new(0.0, 0.0, 0.0));

        // [lon, lat]: a small step in longitude moves east only
        let east = frame.point(&position(&json!([0.001, 0.0]))).unwrap();
        assert!((east.x - 111.319).abs() < 0.01);
        assert!(east.y.abs() < 1e-3);

        let north = frame.point(&position(&json!([0.0, 0.001]))).unwrap();
        assert!(north.x.abs() < 1e-3);
        assert!(north.y > 110.0);
    }

    #[test]
    fn rejects_short_positions() {
        let frame = Frame::new(Crs::Enu, Datum::default());
        for value in [json!([]), json!([1.0])] {
            assert!(matches!(
                frame.point(&position(&value)),
                Err(GeosonError::InvalidPoint { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_numeric_positions() {
        let frame = Frame::new(Crs::Wgs, Datum::default());
        let err = frame.point(&position(&json!(["a", 1.0]))).unwrap_err();
        assert!(matches!(
            &err,
            GeosonError::InvalidPoint { position } if position == r#"["a",1.0]"#
        ));
    }
}
