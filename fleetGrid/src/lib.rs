// Main module declarations for fleetgrid

// Placement engine
pub mod core {
    pub mod optimizer;
    pub mod sweep;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod fleet_config;
}

// Model definitions
pub mod models {
    pub mod coordinate;
    pub mod grid_cell;
    pub mod vehicle;
    pub mod distribution;
}

// Grid data sources
pub mod data {
    pub mod grid_catalog;
    pub mod catalog_loader;
}

// Analysis and reporting
pub mod analysis {
    pub mod analytics;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::core::optimizer::{optimize, OptimizationError, OptimizationParams};
pub use crate::data::grid_catalog::{GridCatalog, KadikoySampleCatalog};
pub use crate::models::coordinate::Coordinate;
pub use crate::models::distribution::{DistributionMetrics, DistributionResult};
pub use crate::models::grid_cell::GridCell;
pub use crate::models::vehicle::VehiclePlacement;
