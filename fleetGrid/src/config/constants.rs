// Geodesy
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Placement jitter (degrees)
pub const JITTER_STEP_DEG: f64 = 0.0002;            // Offset growth per vehicle already in the cell
pub const MAX_JITTER_SPAN_DEG: f64 = 0.00225;       // Half a sample cell; keeps jitter within a quarter cell

// Vehicle economics
pub const BASE_TRIPS_PER_DAY: f64 = 5.0;
pub const SCORE_TRIPS_RANGE: f64 = 8.0;             // 5-13 trips per day across the score range
pub const AVERAGE_REVENUE_PER_TRIP: f64 = 50.0;
pub const MAX_SCORE: f64 = 100.0;
pub const MIN_BATTERY_LEVEL: u8 = 70;
pub const MAX_BATTERY_LEVEL: u8 = 100;

// Revenue projection
pub const PROJECTED_TRIPS_PER_VEHICLE: f64 = 8.5;
pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const TOP_GRIDS_LIMIT: usize = 10;

// Kadikoy sample district
pub const KADIKOY_BASE_LAT: f64 = 40.9887;
pub const KADIKOY_BASE_LNG: f64 = 29.0238;
pub const SAMPLE_GRID_SIZE_DEG: f64 = 0.0045;       // ~500m
pub const SAMPLE_ROW_PITCH: f64 = 0.8;
pub const SAMPLE_COL_PITCH: f64 = 0.6;
pub const SAMPLE_CENTER_VARIATION_DEG: f64 = 0.001;
pub const SAMPLE_COLUMNS: usize = 5;

// Conversions
pub const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

// Request defaults
pub const DEFAULT_CITY: &str = "Istanbul";
pub const DEFAULT_DISTRICT: &str = "Kadikoy";
pub const DEFAULT_FLEET_SIZE: i64 = 50;
pub const DEFAULT_GRID_SIZE_M: u32 = 500;
pub const DEFAULT_MIN_VEHICLE_DISTANCE_M: f64 = 200.0;
pub const DEFAULT_MAX_VEHICLES_PER_GRID: i64 = 10;

/// Rounds to a fixed number of decimals for reporting.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
