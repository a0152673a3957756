use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::fleet_config::FleetConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Demand grid catalog and greedy fleet placement", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Random seed for deterministic catalogs and placements")]
    seed: Option<u64>,

    #[arg(short, long, global = true, help = "JSON file with request defaults")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(short, long, global = true, default_value_t = false, help = "Only log warnings and errors")]
    quiet: bool,
}

/// Where the grid cells come from.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct CatalogArgs {
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub district: Option<String>,

    #[arg(short, long, help = "Load cells from a .json or .csv file instead of the sample district")]
    pub input: Option<PathBuf>,
}

/// Optimizer parameters; unset flags fall back to the config.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct PlacementArgs {
    #[arg(long, allow_negative_numbers = true, help = "Minimum distance between vehicles in meters")]
    pub min_distance: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_per_grid: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the grid catalog as JSON
    Grids {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Place a fleet on the catalog and print the distribution as JSON
    Optimize {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        placement: PlacementArgs,

        #[arg(short = 'n', long, allow_negative_numbers = true)]
        fleet_size: Option<i64>,

        #[arg(long, help = "Directory for a CSV export of the placements")]
        export_dir: Option<PathBuf>,

        #[arg(long, default_value_t = false, help = "Print every vehicle in the summary")]
        details: bool,
    },
    /// Print catalog analytics as JSON
    Analytics {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Optimize a range of fleet sizes in parallel
    Sweep {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        placement: PlacementArgs,

        #[arg(long, default_value_t = 10)]
        from: i64,

        #[arg(long, default_value_t = 40)]
        to: i64,

        #[arg(long, default_value_t = 5)]
        step: i64,
    },
}

impl Args {
    pub fn subcommand(&self) -> &Command {
        &self.command
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

impl CatalogArgs {
    pub fn apply(&self, config: &mut FleetConfig) {
        if let Some(city) = &self.city {
            config.city = city.clone();
        }
        if let Some(district) = &self.district {
            config.district = district.clone();
        }
    }
}

impl PlacementArgs {
    pub fn apply(&self, config: &mut FleetConfig) {
        if let Some(min_distance) = self.min_distance {
            config.min_vehicle_distance = min_distance;
        }
        if let Some(max_per_grid) = self.max_per_grid {
            config.max_vehicles_per_grid = max_per_grid;
        }
    }
}
