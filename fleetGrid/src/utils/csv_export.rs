use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::models::distribution::DistributionResult;

const PLACEMENT_HEADER: [&str; 8] = [
    "optimization_id", "vehicle_id", "grid_id", "lat", "lng",
    "battery_level", "expected_trips", "expected_revenue",
];

#[derive(Debug, Serialize)]
struct PlacementRow<'a> {
    optimization_id: &'a str,
    vehicle_id: &'a str,
    grid_id: &'a str,
    lat: f64,
    lng: f64,
    battery_level: u8,
    expected_trips: f64,
    expected_revenue: f64,
}

pub struct CsvExporter {
    base_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    /// Writes one row per vehicle to `placements_<timestamp>.csv` in the base
    /// directory, creating it if needed. Returns the written path.
    pub fn export_placements(&self, result: &DistributionResult) -> Result<PathBuf, Box<dyn Error + Send + Sync>> {
        fs::create_dir_all(&self.base_dir)?;
        let file_name = format!("placements_{}.csv", Local::now().format("%Y%m%d_%H%M%S%.3f"));
        let path = self.base_dir.join(file_name);

        // Header is written up front so a run with no placements still has columns
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
        writer.write_record(PLACEMENT_HEADER)?;
        for vehicle in &result.vehicles {
            writer.serialize(PlacementRow {
                optimization_id: &result.optimization_id,
                vehicle_id: &vehicle.vehicle_id,
                grid_id: &vehicle.grid_id,
                lat: vehicle.position.lat,
                lng: vehicle.position.lng,
                battery_level: vehicle.battery_level,
                expected_trips: vehicle.expected_trips,
                expected_revenue: vehicle.expected_revenue,
            })?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::Coordinate;
    use crate::models::distribution::DistributionMetrics;
    use crate::models::vehicle::VehiclePlacement;

    #[test]
    fn writes_header_and_one_row_per_vehicle() {
        let dir = tempfile::tempdir().unwrap();
        let result = DistributionResult {
            optimization_id: "opt_test".to_string(),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            fleet_size: 2,
            vehicles: vec![
                VehiclePlacement::new(1, "KD_A1", Coordinate::new(40.9887, 29.0238), 90, 95.8),
                VehiclePlacement::new(2, "KD_A2", Coordinate::new(40.9887, 29.0265), 75, 93.5),
            ],
            metrics: DistributionMetrics::default(),
        };

        let path = CsvExporter::new(dir.path().join("out")).export_placements(&result).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "optimization_id,vehicle_id,grid_id,lat,lng,battery_level,expected_trips,expected_revenue"
        );
        assert!(lines[1].starts_with("opt_test,v_001,KD_A1,40.9887,29.0238,90,12.7,633.2"));
    }

    #[test]
    fn empty_distribution_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let result = DistributionResult {
            optimization_id: "opt_empty".to_string(),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            fleet_size: 0,
            vehicles: Vec::new(),
            metrics: DistributionMetrics::default(),
        };

        let path = CsvExporter::new(dir.path()).export_placements(&result).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();

        assert_eq!(contents.lines().collect::<Vec<_>>(), vec![PLACEMENT_HEADER.join(",")]);
    }
}
