use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::coordinate::Coordinate;
use crate::config::constants::METERS_PER_DEGREE_LAT;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub top_left: Coordinate,
    pub top_right: Coordinate,
    pub bottom_left: Coordinate,
    pub bottom_right: Coordinate,
}

impl GridBounds {
    pub fn around(center: &Coordinate, half_size_deg: f64) -> Self {
        Self {
            top_left: center.offset(half_size_deg, -half_size_deg),
            top_right: center.offset(half_size_deg, half_size_deg),
            bottom_left: center.offset(-half_size_deg, -half_size_deg),
            bottom_right: center.offset(-half_size_deg, half_size_deg),
        }
    }

    /// Bounds for a square cell of `grid_size_m` meters.
    pub fn from_size_m(center: &Coordinate, grid_size_m: u32) -> Self {
        Self::around(center, grid_size_m as f64 / METERS_PER_DEGREE_LAT / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridScores {
    pub accessibility: f64,
    pub demand: f64,
    pub operational: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedestrianTraffic {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for PedestrianTraffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PedestrianTraffic::Low => "low",
            PedestrianTraffic::Medium => "medium",
            PedestrianTraffic::High => "high",
            PedestrianTraffic::VeryHigh => "very_high",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PedestrianTraffic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PedestrianTraffic::Low),
            "medium" => Ok(PedestrianTraffic::Medium),
            "high" => Ok(PedestrianTraffic::High),
            "very_high" | "very high" => Ok(PedestrianTraffic::VeryHigh),
            other => Err(format!("unknown pedestrian traffic level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFeatures {
    pub metro_distance: u32,
    pub bus_stop_count: u32,
    pub building_count: u32,
    pub pedestrian_traffic: PedestrianTraffic,
    pub commercial_ratio: f64,
}

impl Default for GridFeatures {
    fn default() -> Self {
        Self {
            metro_distance: 0,
            bus_stop_count: 0,
            building_count: 0,
            pedestrian_traffic: PedestrianTraffic::Medium,
            commercial_ratio: 0.0,
        }
    }
}

/// A scored cell of the demand grid. Produced by a catalog and only read by
/// the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub id: String,
    pub city: String,
    pub district: String,
    pub grid_size: u32,
    pub center: Coordinate,
    pub bounds: GridBounds,
    pub scores: GridScores,
    pub features: GridFeatures,
    pub recommended_vehicles: u32,
}

impl GridCell {
    /// Minimal cell with uniform component scores, derived bounds and
    /// default features.
    pub fn new(id: &str, center: Coordinate, final_score: f64, recommended_vehicles: u32) -> Self {
        Self {
            id: id.to_string(),
            city: String::new(),
            district: String::new(),
            grid_size: crate::config::constants::DEFAULT_GRID_SIZE_M,
            center,
            bounds: GridBounds::from_size_m(&center, crate::config::constants::DEFAULT_GRID_SIZE_M),
            scores: GridScores {
                accessibility: final_score,
                demand: final_score,
                operational: final_score,
                final_score,
            },
            features: GridFeatures::default(),
            recommended_vehicles,
        }
    }

    pub fn final_score(&self) -> f64 {
        self.scores.final_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedestrian_traffic_round_trips_through_text() {
        for level in [PedestrianTraffic::Low, PedestrianTraffic::Medium, PedestrianTraffic::High, PedestrianTraffic::VeryHigh] {
            assert_eq!(level.to_string().parse::<PedestrianTraffic>().unwrap(), level);
        }
        assert!("gridlock".parse::<PedestrianTraffic>().is_err());
    }

    #[test]
    fn bounds_surround_center() {
        let center = Coordinate::new(41.0, 29.0);
        let bounds = GridBounds::around(&center, 0.00225);
        assert!(bounds.top_left.lat > center.lat && bounds.top_left.lng < center.lng);
        assert!(bounds.bottom_right.lat < center.lat && bounds.bottom_right.lng > center.lng);
        assert!((bounds.top_right.lat - bounds.bottom_right.lat - 0.0045).abs() < 1e-12);
    }

    #[test]
    fn serializes_with_nested_scores() {
        let cell = GridCell::new("KD_A1", Coordinate::new(41.0, 29.0), 95.8, 4);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["scores"]["final_score"], 95.8);
        assert_eq!(json["features"]["pedestrian_traffic"], "medium");
        assert_eq!(json["center"]["lng"], 29.0);
    }
}
