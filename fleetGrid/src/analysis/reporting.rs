use super::analytics::AnalyticsData;
use crate::core::sweep::SweepPoint;
use crate::data::grid_catalog::KadikoySampleCatalog;
use crate::models::distribution::DistributionResult;

pub fn print_distribution_summary(result: &DistributionResult) {
    println!("\nDistribution {} Summary", result.optimization_id);
    println!("----------------------------------------");
    println!("Timestamp: {}", result.timestamp);
    println!("Vehicles placed: {} / {}", result.vehicles.len(), result.fleet_size);
    println!("Coverage:");
    println!("  Grids covered: {}", result.metrics.grids_covered);
    println!("  Coverage: {:.1}%", result.metrics.coverage_percentage);
    println!("  Avg score of covered grids: {:.1}", result.metrics.avg_score_covered);
    println!("Expected Performance:");
    println!("  Avg trips per vehicle: {:.1}", result.metrics.avg_trips_per_vehicle);
    println!("  Total daily revenue: ₺{:.0}", result.metrics.total_expected_revenue);
}

pub fn print_vehicle_details(result: &DistributionResult) {
    println!("\nVehicle Details:");
    println!("----------------------------------------");
    for vehicle in &result.vehicles {
        let location = KadikoySampleCatalog::location_name(&vehicle.grid_id).unwrap_or("");
        println!(
            "{} @ {} {}: ({:.6}, {:.6}) battery {}%, {:.1} trips, ₺{:.2}",
            vehicle.vehicle_id,
            vehicle.grid_id,
            location,
            vehicle.position.lat,
            vehicle.position.lng,
            vehicle.battery_level,
            vehicle.expected_trips,
            vehicle.expected_revenue
        );
    }
    println!("----------------------------------------");
}

pub fn print_analytics_summary(data: &AnalyticsData) {
    println!("\nGrid Analytics");
    println!("----------------------------------------");
    println!("Score distribution:");
    for (bucket, count) in data.score_distribution.iter().rev() {
        println!("  {:>7}: {}", bucket, count);
    }
    let stats = &data.coverage_stats;
    println!("Scores over {} grids:", stats.total_grids);
    println!("  avg={:.2} max={:.2} min={:.2} std={:.2}",
        stats.avg_score, stats.max_score, stats.min_score, stats.std_dev);
    println!("Top grids:");
    for grid in &data.top_grids {
        println!("  {}: {:.1} (access {:.1}, demand {:.1}, ops {:.1})",
            grid.id, grid.score, grid.accessibility, grid.demand, grid.operational);
    }
    let revenue = &data.revenue_projection;
    println!("Revenue projection:");
    println!("  Daily: ₺{:.1}K", revenue.daily / 1000.0);
    println!("  Weekly: ₺{:.1}K", revenue.weekly / 1000.0);
    println!("  Monthly: ₺{:.1}K", revenue.monthly / 1000.0);
    println!("  Yearly: ₺{:.2}M", revenue.yearly / 1_000_000.0);
}

pub fn print_sweep_table(points: &[SweepPoint]) {
    println!("\nFleet Size Sweep");
    println!("----------------------------------------");
    println!("{:>6} {:>7} {:>12} {:>9} {:>7}", "fleet", "placed", "revenue", "coverage", "trips");
    for point in points {
        println!(
            "{:>6} {:>7} {:>12.2} {:>8.1}% {:>7.2}",
            point.fleet_size,
            point.vehicles_placed,
            point.total_expected_revenue,
            point.coverage_percentage,
            point.avg_trips_per_vehicle
        );
    }
}
