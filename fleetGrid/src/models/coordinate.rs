use serde::{Deserialize, Serialize};
use crate::config::constants::EARTH_RADIUS_M;

/// WGS84 latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }

    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Coordinate {
        Coordinate::new(self.lat + d_lat, self.lng + d_lng)
    }
}

/// Haversine distance in meters between two coordinates. Uses the
/// `asin(sqrt(a))` form, which stays accurate for the short separations the
/// optimizer compares.
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinate::new(40.9887, 29.0238);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((a.distance_to(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn symmetric() {
        let a = Coordinate::new(40.9887, 29.0238);
        let b = Coordinate::new(41.0082, 28.9784);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn small_separations_stay_precise() {
        // ~1.1 cm north
        let a = Coordinate::new(40.0, 29.0);
        let b = Coordinate::new(40.0 + 1e-7, 29.0);
        let d = a.distance_to(&b);
        assert!(d > 0.0);
        assert!((d - 0.011_119_5).abs() < 1e-5);
    }

    #[test]
    fn antipodal_points() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        assert!((a.distance_to(&b) - EARTH_RADIUS_M * std::f64::consts::PI).abs() < 1e-3);
    }
}
