//! Geo-distance query types.
//!
//! This module defines the query used to find posts near a coordinate.

use super::post::Location;

/// Radius used when a search does not name one, in kilometres.
pub const DEFAULT_DISTANCE_KM: f64 = 200.0;

/// Distance sent for a zero radius. The engine rejects distances that are not
/// strictly positive; one millimetre still matches posts at the exact center.
pub const ZERO_RADIUS_DISTANCE: &str = "1mm";

/// Geo-distance search parameters.
///
/// Selects every post whose location lies within `distance_km` of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoQuery {
    /// Center of the search circle.
    pub center: Location,

    /// Search radius in kilometres.
    pub distance_km: f64,
}

impl GeoQuery {
    /// Create a new geo query.
    ///
    /// # Example
    ///
    /// ```
    /// use around_shared::{GeoQuery, Location};
    ///
    /// let query = GeoQuery::new(Location::new(37.0, -122.0), 10.0);
    /// assert_eq!(query.distance(), "10km");
    /// ```
    pub fn new(center: Location, distance_km: f64) -> Self {
        Self {
            center,
            distance_km,
        }
    }

    /// The radius in the unit-suffixed form the search engine expects.
    ///
    /// Always strictly positive: a zero radius becomes [`ZERO_RADIUS_DISTANCE`].
    pub fn distance(&self) -> String {
        if self.distance_km > 0.0 {
            format!("{}km", self.distance_km)
        } else {
            ZERO_RADIUS_DISTANCE.to_string()
        }
    }

    /// Validate the query parameters.
    ///
    /// Returns an error message if validation fails. Coordinates are not range
    /// checked; only the radius must be a finite, non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        if !self.distance_km.is_finite() {
            return Err("range must be a finite number of kilometres".to_string());
        }

        if self.distance_km < 0.0 {
            return Err("range cannot be negative".to_string());
        }

        Ok(())
    }
}
