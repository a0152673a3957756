// Batch optimization over a range of fleet sizes
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::optimizer::{optimize, OptimizationError, OptimizationParams};
use crate::models::grid_cell::GridCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub fleet_size: usize,
    pub vehicles_placed: usize,
    pub total_expected_revenue: f64,
    pub coverage_percentage: f64,
    pub avg_trips_per_vehicle: f64,
    pub grids_covered: usize,
}

/// Fleet sizes `from..=to` in steps of `step`.
pub fn fleet_sizes(from: i64, to: i64, step: i64) -> Result<Vec<i64>, OptimizationError> {
    if step <= 0 {
        return Err(OptimizationError::InvalidParameter(format!("sweep step must be > 0, got {}", step)));
    }
    if from < 0 || to < from {
        return Err(OptimizationError::InvalidParameter(format!(
            "sweep range must satisfy 0 <= from <= to, got {}..={}", from, to
        )));
    }
    Ok((from..=to).step_by(step as usize).collect())
}

/// Runs one optimization per fleet size in parallel. Run `i` draws from its
/// own generator seeded with `seed + i`, so results do not depend on thread
/// scheduling. The fleet size in `base` is ignored.
pub fn sweep(
    cells: &[GridCell],
    sizes: &[i64],
    base: &OptimizationParams,
    seed: u64,
    show_progress: bool,
) -> Result<Vec<SweepPoint>, OptimizationError> {
    for &fleet_size in sizes {
        OptimizationParams { fleet_size, ..*base }.validate()?;
    }

    let progress = if show_progress {
        let bar = ProgressBar::new(sizes.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} fleet sizes") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let points = sizes
        .par_iter()
        .enumerate()
        .map(|(i, &fleet_size)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let params = OptimizationParams { fleet_size, ..*base };
            let result = optimize(cells, &params, &mut rng)?;
            progress.inc(1);

            Ok(SweepPoint {
                fleet_size: result.fleet_size,
                vehicles_placed: result.vehicles.len(),
                total_expected_revenue: result.metrics.total_expected_revenue,
                coverage_percentage: result.metrics.coverage_percentage,
                avg_trips_per_vehicle: result.metrics.avg_trips_per_vehicle,
                grids_covered: result.metrics.grids_covered,
            })
        })
        .collect::<Result<Vec<_>, OptimizationError>>()?;

    progress.finish_and_clear();
    info!(runs = points.len(), "fleet sweep complete");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coordinate::Coordinate;

    fn cells() -> Vec<GridCell> {
        vec![
            GridCell::new("a", Coordinate::new(41.000, 29.000), 95.0, 3),
            GridCell::new("b", Coordinate::new(41.010, 29.000), 85.0, 3),
            GridCell::new("c", Coordinate::new(41.020, 29.000), 75.0, 3),
        ]
    }

    fn base() -> OptimizationParams {
        OptimizationParams { fleet_size: 0, min_vehicle_distance: 0.0, max_vehicles_per_grid: 3 }
    }

    #[test]
    fn sizes_are_inclusive() {
        assert_eq!(fleet_sizes(0, 10, 5).unwrap(), vec![0, 5, 10]);
        assert_eq!(fleet_sizes(3, 3, 1).unwrap(), vec![3]);
        assert!(fleet_sizes(0, 10, 0).is_err());
        assert!(fleet_sizes(5, 1, 1).is_err());
    }

    #[test]
    fn points_follow_requested_order() {
        let sizes = vec![9, 0, 4, 12];
        let points = sweep(&cells(), &sizes, &base(), 7, false).unwrap();

        let placed: Vec<usize> = points.iter().map(|p| p.vehicles_placed).collect();
        assert_eq!(placed, vec![9, 0, 4, 9]);
        assert_eq!(points[1].total_expected_revenue, 0.0);
        assert_eq!(points[0].grids_covered, 3);
        assert_eq!(points[0].coverage_percentage, 100.0);
    }

    #[test]
    fn reproducible_for_a_seed() {
        let sizes = fleet_sizes(1, 9, 2).unwrap();
        let a = sweep(&cells(), &sizes, &base(), 99, false).unwrap();
        let b = sweep(&cells(), &sizes, &base(), 99, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_size_fails_whole_sweep() {
        assert!(matches!(
            sweep(&cells(), &[3, -1], &base(), 1, false),
            Err(OptimizationError::InvalidParameter(_))
        ));
    }
}
