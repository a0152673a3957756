// Greedy vehicle distribution over scored grid cells
use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::constants::{
    JITTER_STEP_DEG, MAX_BATTERY_LEVEL, MAX_JITTER_SPAN_DEG, MAX_SCORE, MIN_BATTERY_LEVEL,
};
use crate::models::coordinate::Coordinate;
use crate::models::distribution::{DistributionMetrics, DistributionResult};
use crate::models::grid_cell::GridCell;
use crate::models::vehicle::VehiclePlacement;

#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationError {
    InvalidParameter(String),
    InvalidCell(String),
}

impl fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationError::InvalidParameter(s) => write!(f, "Invalid parameter: {}", s),
            OptimizationError::InvalidCell(s) => write!(f, "Invalid grid cell: {}", s),
        }
    }
}

impl std::error::Error for OptimizationError {}

/// Fleet parameters as the caller supplies them. Signed so that nonsensical
/// input can be reported instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationParams {
    pub fleet_size: i64,
    pub min_vehicle_distance: f64,  // meters, 0 disables spacing
    pub max_vehicles_per_grid: i64,
}

impl OptimizationParams {
    pub fn validate(&self) -> Result<(), OptimizationError> {
        if self.fleet_size < 0 {
            return Err(OptimizationError::InvalidParameter(format!(
                "fleet_size must be >= 0, got {}", self.fleet_size
            )));
        }
        if !self.min_vehicle_distance.is_finite() || self.min_vehicle_distance < 0.0 {
            return Err(OptimizationError::InvalidParameter(format!(
                "min_vehicle_distance must be a finite value >= 0, got {}", self.min_vehicle_distance
            )));
        }
        if self.max_vehicles_per_grid < 0 {
            return Err(OptimizationError::InvalidParameter(format!(
                "max_vehicles_per_grid must be >= 0, got {}", self.max_vehicles_per_grid
            )));
        }
        Ok(())
    }
}

fn validate_cells(cells: &[GridCell]) -> Result<(), OptimizationError> {
    let mut seen = HashSet::with_capacity(cells.len());
    for cell in cells {
        if !seen.insert(cell.id.as_str()) {
            return Err(OptimizationError::InvalidCell(format!("duplicate id {}", cell.id)));
        }
        let score = cell.final_score();
        if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
            return Err(OptimizationError::InvalidCell(format!(
                "{} has final_score {} outside [0, {}]", cell.id, score, MAX_SCORE
            )));
        }
        if !cell.center.is_finite() {
            return Err(OptimizationError::InvalidCell(format!("{} has a non-finite center", cell.id)));
        }
    }
    Ok(())
}

/// Candidate position for the `index`-th vehicle of a cell. The spread grows
/// with the index and is capped so the vehicle stays well inside the cell.
fn jittered_position<R: Rng + ?Sized>(center: &Coordinate, index: usize, rng: &mut R) -> Coordinate {
    let offset = (JITTER_STEP_DEG * index as f64).min(MAX_JITTER_SPAN_DEG);
    let d_lat = (rng.gen::<f64>() - 0.5) * offset;
    let d_lng = (rng.gen::<f64>() - 0.5) * offset;
    center.offset(d_lat, d_lng)
}

fn too_close(candidate: &Coordinate, used_positions: &[Coordinate], min_distance: f64) -> bool {
    if min_distance <= 0.0 {
        return false;
    }
    used_positions
        .iter()
        .any(|used| candidate.distance_to(used) < min_distance)
}

/// Places up to `fleet_size` vehicles on the highest scoring cells.
///
/// Cells are visited by descending `final_score` (equal scores keep catalog
/// order). Each cell receives at most `min(recommended_vehicles,
/// max_vehicles_per_grid)` candidates; a candidate closer than
/// `min_vehicle_distance` to any accepted vehicle is dropped without retry.
/// All randomness comes from `rng`, so a seeded generator reproduces a run
/// exactly apart from the timestamp.
pub fn optimize<R: Rng + ?Sized>(
    cells: &[GridCell],
    params: &OptimizationParams,
    rng: &mut R,
) -> Result<DistributionResult, OptimizationError> {
    optimize_at(cells, params, rng, Local::now())
}

#[tracing::instrument(skip_all, fields(cells = cells.len(), fleet_size = params.fleet_size))]
pub fn optimize_at<R: Rng + ?Sized>(
    cells: &[GridCell],
    params: &OptimizationParams,
    rng: &mut R,
    now: DateTime<Local>,
) -> Result<DistributionResult, OptimizationError> {
    params.validate()?;
    validate_cells(cells)?;

    let fleet_size = params.fleet_size as usize;
    let max_per_grid = params.max_vehicles_per_grid as usize;

    let mut ranked: Vec<&GridCell> = cells.iter().collect();
    ranked.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

    let mut vehicles: Vec<VehiclePlacement> = Vec::new();
    let mut used_positions: Vec<Coordinate> = Vec::new();
    let mut rejected = 0usize;

    for cell in ranked {
        if vehicles.len() >= fleet_size {
            break;
        }

        let vehicles_for_grid = (cell.recommended_vehicles as usize)
            .min(max_per_grid)
            .min(fleet_size - vehicles.len());
        if vehicles_for_grid == 0 {
            continue;
        }

        for i in 0..vehicles_for_grid {
            let position = jittered_position(&cell.center, i, rng);

            if too_close(&position, &used_positions, params.min_vehicle_distance) {
                rejected += 1;
                debug!(grid = %cell.id, index = i, "candidate rejected by spacing constraint");
                continue;
            }

            let battery_level = rng.gen_range(MIN_BATTERY_LEVEL..=MAX_BATTERY_LEVEL);
            vehicles.push(VehiclePlacement::new(
                vehicles.len() + 1,
                &cell.id,
                position,
                battery_level,
                cell.final_score(),
            ));
            used_positions.push(position);
        }
    }

    let metrics = DistributionMetrics::calculate(cells, &vehicles);
    info!(
        placed = vehicles.len(),
        rejected,
        grids_covered = metrics.grids_covered,
        "distribution optimized"
    );

    Ok(DistributionResult {
        optimization_id: format!("opt_{}_{:04x}", now.format("%Y%m%d_%H%M%S"), rng.gen::<u16>()),
        timestamp: now.to_rfc3339(),
        fleet_size,
        vehicles,
        metrics,
    })
}
