use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::grid_cell::GridCell;
use super::vehicle::VehiclePlacement;
use crate::config::constants::round_to;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionMetrics {
    pub total_expected_revenue: f64,
    pub avg_trips_per_vehicle: f64,
    pub coverage_percentage: f64,
    pub avg_score_covered: f64,
    pub grids_covered: usize,
}

impl DistributionMetrics {
    /// Aggregates placements against the catalog they were drawn from. Means
    /// and ratios over empty sets are 0.
    pub fn calculate(cells: &[GridCell], vehicles: &[VehiclePlacement]) -> Self {
        let total_revenue: f64 = vehicles.iter().map(|v| v.expected_revenue).sum();

        let avg_trips = if vehicles.is_empty() {
            0.0
        } else {
            vehicles.iter().map(|v| v.expected_trips).sum::<f64>() / vehicles.len() as f64
        };

        let covered: HashSet<&str> = vehicles.iter().map(|v| v.grid_id.as_str()).collect();

        let coverage_pct = if cells.is_empty() {
            0.0
        } else {
            covered.len() as f64 / cells.len() as f64 * 100.0
        };

        let covered_scores: Vec<f64> = cells
            .iter()
            .filter(|c| covered.contains(c.id.as_str()))
            .map(|c| c.final_score())
            .collect();
        let avg_score = if covered_scores.is_empty() {
            0.0
        } else {
            covered_scores.iter().sum::<f64>() / covered_scores.len() as f64
        };

        Self {
            total_expected_revenue: round_to(total_revenue, 2),
            avg_trips_per_vehicle: round_to(avg_trips, 2),
            coverage_percentage: round_to(coverage_pct, 2),
            avg_score_covered: round_to(avg_score, 2),
            grids_covered: covered.len(),
        }
    }
}

/// Outcome of one optimization run. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub optimization_id: String,
    pub timestamp: String,
    pub fleet_size: usize,
    pub vehicles: Vec<VehiclePlacement>,
    pub metrics: DistributionMetrics,
}

impl DistributionResult {
    pub fn vehicles_per_grid(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for vehicle in &self.vehicles {
            *counts.entry(vehicle.grid_id.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::Coordinate;

    fn cell(id: &str, score: f64) -> GridCell {
        GridCell::new(id, Coordinate::new(41.0, 29.0), score, 2)
    }

    fn vehicle(seq: usize, grid: &str, score: f64) -> VehiclePlacement {
        VehiclePlacement::new(seq, grid, Coordinate::new(41.0, 29.0), 80, score)
    }

    #[test]
    fn empty_inputs_report_zero() {
        let metrics = DistributionMetrics::calculate(&[], &[]);
        assert_eq!(metrics, DistributionMetrics::default());
    }

    #[test]
    fn no_vehicles_over_nonempty_catalog() {
        let metrics = DistributionMetrics::calculate(&[cell("a", 90.0)], &[]);
        assert_eq!(metrics.coverage_percentage, 0.0);
        assert_eq!(metrics.avg_score_covered, 0.0);
        assert_eq!(metrics.avg_trips_per_vehicle, 0.0);
    }

    #[test]
    fn aggregates_over_covered_cells() {
        let cells = vec![cell("a", 100.0), cell("b", 50.0), cell("c", 0.0)];
        let vehicles = vec![vehicle(1, "a", 100.0), vehicle(2, "a", 100.0), vehicle(3, "b", 50.0)];

        let metrics = DistributionMetrics::calculate(&cells, &vehicles);

        assert_eq!(metrics.grids_covered, 2);
        assert_eq!(metrics.coverage_percentage, 66.67);
        assert_eq!(metrics.avg_score_covered, 75.0);
        // 13 + 13 + 9 trips, 650 + 650 + 450 revenue
        assert_eq!(metrics.avg_trips_per_vehicle, 11.67);
        assert_eq!(metrics.total_expected_revenue, 1750.0);
    }
}
