//! Great-circle distance between named locations. Pure functions, no
//! state, no side effects.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine distance in kilometres between two points.
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Option-lifting form: `None` when either point is unknown.
pub fn distance_km(a: Option<Coord>, b: Option<Coord>) -> Option<f64> {
    Some(haversine_km(a?, b?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        let p = Coord { lat: 40.34, lng: 15.90 };
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coord { lat: 40.0, lng: 15.0 };
        let b = Coord { lat: 41.0, lng: 15.0 };
        let d = haversine_km(a, b);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn missing_point_yields_none() {
        let p = Coord { lat: 40.0, lng: 15.0 };
        assert_eq!(distance_km(None, Some(p)), None);
        assert_eq!(distance_km(Some(p), None), None);
        assert!(distance_km(Some(p), Some(p)).is_some());
    }
}
