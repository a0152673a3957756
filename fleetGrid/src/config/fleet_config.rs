use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::constants::{
    DEFAULT_CITY, DEFAULT_DISTRICT, DEFAULT_FLEET_SIZE, DEFAULT_GRID_SIZE_M,
    DEFAULT_MAX_VEHICLES_PER_GRID, DEFAULT_MIN_VEHICLE_DISTANCE_M,
};
use crate::core::optimizer::OptimizationParams;

/// Request-level settings for a run. Every field has a default so a config
/// file only needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub city: String,
    pub district: String,
    pub fleet_size: i64,
    pub grid_size: u32,                 // meters, informational for the sample catalog
    pub min_vehicle_distance: f64,      // meters
    pub max_vehicles_per_grid: i64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            district: DEFAULT_DISTRICT.to_string(),
            fleet_size: DEFAULT_FLEET_SIZE,
            grid_size: DEFAULT_GRID_SIZE_M,
            min_vehicle_distance: DEFAULT_MIN_VEHICLE_DISTANCE_M,
            max_vehicles_per_grid: DEFAULT_MAX_VEHICLES_PER_GRID,
        }
    }
}

impl FleetConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: FleetConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn optimization_params(&self) -> OptimizationParams {
        OptimizationParams {
            fleet_size: self.fleet_size,
            min_vehicle_distance: self.min_vehicle_distance,
            max_vehicles_per_grid: self.max_vehicles_per_grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fleet_size": 12, "min_vehicle_distance": 150.0 }}"#).unwrap();

        let config = FleetConfig::load(file.path()).unwrap();

        assert_eq!(config.fleet_size, 12);
        assert_eq!(config.min_vehicle_distance, 150.0);
        assert_eq!(config.city, "Istanbul");
        assert_eq!(config.max_vehicles_per_grid, 10);
        assert_eq!(config.grid_size, 500);
    }

    #[test]
    fn params_mirror_config() {
        let params = FleetConfig::default().optimization_params();
        assert_eq!(params.fleet_size, 50);
        assert_eq!(params.min_vehicle_distance, 200.0);
        assert_eq!(params.max_vehicles_per_grid, 10);
    }
}
