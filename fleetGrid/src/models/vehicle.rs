use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::config::constants::{
    round_to, AVERAGE_REVENUE_PER_TRIP, BASE_TRIPS_PER_DAY, MAX_SCORE, SCORE_TRIPS_RANGE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePlacement {
    pub vehicle_id: String,
    pub grid_id: String,
    pub position: Coordinate,
    pub battery_level: u8,
    pub expected_trips: f64,
    pub expected_revenue: f64,
}

impl VehiclePlacement {
    pub fn new(sequence: usize, grid_id: &str, position: Coordinate, battery_level: u8, final_score: f64) -> Self {
        let trips = expected_trips(final_score);
        Self {
            vehicle_id: vehicle_id(sequence),
            grid_id: grid_id.to_string(),
            position,
            battery_level,
            expected_trips: round_to(trips, 1),
            expected_revenue: round_to(trips * AVERAGE_REVENUE_PER_TRIP, 2),
        }
    }
}

/// `v_001`, `v_002`, ... for 1-based sequence numbers.
pub fn vehicle_id(sequence: usize) -> String {
    format!("v_{:03}", sequence)
}

/// Daily trips a vehicle is expected to make in a cell of the given score.
pub fn expected_trips(final_score: f64) -> f64 {
    BASE_TRIPS_PER_DAY + (final_score / MAX_SCORE) * SCORE_TRIPS_RANGE
}
