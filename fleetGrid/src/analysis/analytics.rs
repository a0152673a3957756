use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::constants::{
    round_to, AVERAGE_REVENUE_PER_TRIP, DAYS_PER_MONTH, DAYS_PER_WEEK, DAYS_PER_YEAR,
    PROJECTED_TRIPS_PER_VEHICLE, TOP_GRIDS_LIMIT,
};
use crate::models::grid_cell::GridCell;

pub const SCORE_BUCKETS: [(&str, f64); 5] = [
    ("90-100", 90.0),
    ("80-89", 80.0),
    ("70-79", 70.0),
    ("60-69", 60.0),
    ("0-59", f64::NEG_INFINITY),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total_grids: usize,
    pub avg_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGrid {
    pub id: String,
    pub location: String,
    pub score: f64,
    pub accessibility: f64,
    pub demand: f64,
    pub operational: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub score_distribution: BTreeMap<String, usize>,
    pub coverage_stats: CoverageStats,
    pub top_grids: Vec<TopGrid>,
    pub revenue_projection: RevenueProjection,
}

pub fn score_bucket(score: f64) -> &'static str {
    SCORE_BUCKETS
        .iter()
        .find(|(_, floor)| score >= *floor)
        .map(|(label, _)| *label)
        .unwrap_or("0-59")
}

pub fn score_distribution(cells: &[GridCell]) -> BTreeMap<String, usize> {
    let mut distribution: BTreeMap<String, usize> =
        SCORE_BUCKETS.iter().map(|(label, _)| (label.to_string(), 0)).collect();
    for cell in cells {
        *distribution.entry(score_bucket(cell.final_score()).to_string()).or_insert(0) += 1;
    }
    distribution
}

pub fn coverage_stats(cells: &[GridCell]) -> CoverageStats {
    if cells.is_empty() {
        return CoverageStats::default();
    }

    let scores: Vec<f64> = cells.iter().map(|c| c.final_score()).collect();
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);

    CoverageStats {
        total_grids: cells.len(),
        avg_score: round_to(mean, 2),
        max_score: round_to(max, 2),
        min_score: round_to(min, 2),
        std_dev: round_to(variance.sqrt(), 2),
    }
}

pub fn top_grids(cells: &[GridCell], limit: usize) -> Vec<TopGrid> {
    let mut ranked: Vec<&GridCell> = cells.iter().collect();
    ranked.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

    ranked
        .into_iter()
        .take(limit)
        .map(|c| TopGrid {
            id: c.id.clone(),
            location: c.district.clone(),
            score: round_to(c.scores.final_score, 1),
            accessibility: round_to(c.scores.accessibility, 1),
            demand: round_to(c.scores.demand, 1),
            operational: round_to(c.scores.operational, 1),
        })
        .collect()
}

/// Revenue if every cell got its recommended fleet at the district-wide
/// average utilisation.
pub fn revenue_projection(cells: &[GridCell]) -> RevenueProjection {
    let total_vehicles: u64 = cells.iter().map(|c| c.recommended_vehicles as u64).sum();
    let daily = total_vehicles as f64 * PROJECTED_TRIPS_PER_VEHICLE * AVERAGE_REVENUE_PER_TRIP;

    RevenueProjection {
        daily: round_to(daily, 2),
        weekly: round_to(daily * DAYS_PER_WEEK, 2),
        monthly: round_to(daily * DAYS_PER_MONTH, 2),
        yearly: round_to(daily * DAYS_PER_YEAR, 2),
    }
}

pub fn analyze(cells: &[GridCell]) -> AnalyticsData {
    AnalyticsData {
        score_distribution: score_distribution(cells),
        coverage_stats: coverage_stats(cells),
        top_grids: top_grids(cells, TOP_GRIDS_LIMIT),
        revenue_projection: revenue_projection(cells),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::grid_catalog::KadikoySampleCatalog;
    use crate::models::coordinate::Coordinate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(id: &str, score: f64, vehicles: u32) -> GridCell {
        GridCell::new(id, Coordinate::new(41.0, 29.0), score, vehicles)
    }

    #[test]
    fn buckets_use_lower_bounds() {
        assert_eq!(score_bucket(100.0), "90-100");
        assert_eq!(score_bucket(90.0), "90-100");
        assert_eq!(score_bucket(89.99), "80-89");
        assert_eq!(score_bucket(60.0), "60-69");
        assert_eq!(score_bucket(0.0), "0-59");
    }

    #[test]
    fn empty_catalog_is_all_zero() {
        let data = analyze(&[]);
        assert_eq!(data.coverage_stats, CoverageStats::default());
        assert_eq!(data.revenue_projection, RevenueProjection::default());
        assert!(data.top_grids.is_empty());
        assert_eq!(data.score_distribution.len(), 5);
        assert!(data.score_distribution.values().all(|&n| n == 0));
    }

    #[test]
    fn population_standard_deviation() {
        let cells = vec![cell("a", 90.0, 1), cell("b", 70.0, 1)];
        let stats = coverage_stats(&cells);
        assert_eq!(stats.avg_score, 80.0);
        assert_eq!(stats.std_dev, 10.0);
        assert_eq!(stats.max_score, 90.0);
        assert_eq!(stats.min_score, 70.0);
    }

    #[test]
    fn kadikoy_summary() {
        let cells = KadikoySampleCatalog::generate(&mut StdRng::seed_from_u64(1));
        let data = analyze(&cells);

        assert_eq!(data.score_distribution["90-100"], 3);
        assert_eq!(data.score_distribution["80-89"], 8);
        assert_eq!(data.score_distribution["70-79"], 7);
        assert_eq!(data.score_distribution["60-69"], 2);
        assert_eq!(data.top_grids.len(), 10);
        assert_eq!(data.top_grids[0].id, "KD_A1");
        assert_eq!(data.top_grids[0].location, "Kadikoy");
        // 37 vehicles * 8.5 trips * 50
        assert_eq!(data.revenue_projection.daily, 15725.0);
        assert_eq!(data.revenue_projection.yearly, 5_739_625.0);
    }
}
