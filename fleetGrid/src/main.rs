use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use fleetgrid::analysis::{analytics, reporting};
use fleetgrid::cli::cli::{Args, CatalogArgs, Command};
use fleetgrid::config::fleet_config::FleetConfig;
use fleetgrid::core::{optimizer, sweep};
use fleetgrid::data::catalog_loader;
use fleetgrid::data::grid_catalog::{GridCatalog, KadikoySampleCatalog, StaticCatalog};
use fleetgrid::models::grid_cell::GridCell;
use fleetgrid::utils::csv_export::CsvExporter;
use fleetgrid::utils::logging::{self, CatalogOpType, FileIOType, OperationCategory};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.quiet())?;

    let config = match args.config() {
        Some(path) => {
            let _timing = logging::start_timing("load_config",
                OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });
            FleetConfig::load(path)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("failed to read config {}", path.display()))?
        }
        None => FleetConfig::default(),
    };

    // A fixed seed makes both the sample catalog and the placement reproducible
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    run(&args, config, &mut rng)?;

    logging::print_timing_report();
    Ok(())
}

fn run(args: &Args, mut config: FleetConfig, rng: &mut StdRng) -> Result<()> {
    match args.subcommand() {
        Command::Grids { catalog } => {
            let cells = load_cells(catalog, &mut config, rng)?;
            println!("{}", serde_json::to_string_pretty(&cells)?);
        }
        Command::Optimize { catalog, placement, fleet_size, export_dir, details } => {
            placement.apply(&mut config);
            if let Some(fleet_size) = fleet_size {
                config.fleet_size = *fleet_size;
            }
            let cells = load_cells(catalog, &mut config, rng)?;

            let result = {
                let _timing = logging::start_timing("optimize", OperationCategory::Optimization);
                optimizer::optimize(&cells, &config.optimization_params(), rng)?
            };

            println!("{}", serde_json::to_string_pretty(&result)?);
            if !args.quiet() {
                reporting::print_distribution_summary(&result);
                if *details {
                    reporting::print_vehicle_details(&result);
                }
            }

            if let Some(dir) = export_dir {
                let _timing = logging::start_timing("export_placements",
                    OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });
                let path = CsvExporter::new(dir)
                    .export_placements(&result)
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("failed to export placements")?;
                info!(path = %path.display(), "placements exported");
            }
        }
        Command::Analytics { catalog } => {
            let cells = load_cells(catalog, &mut config, rng)?;
            let data = {
                let _timing = logging::start_timing("analyze", OperationCategory::Analytics);
                analytics::analyze(&cells)
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            if !args.quiet() {
                reporting::print_analytics_summary(&data);
            }
        }
        Command::Sweep { catalog, placement, from, to, step } => {
            placement.apply(&mut config);
            let cells = load_cells(catalog, &mut config, rng)?;
            let sizes = sweep::fleet_sizes(*from, *to, *step)?;
            let seed = args.seed().unwrap_or_else(|| rand::Rng::gen(rng));

            let points = {
                let _timing = logging::start_timing("sweep", OperationCategory::Optimization);
                sweep::sweep(&cells, &sizes, &config.optimization_params(), seed, !args.quiet())?
            };

            println!("{}", serde_json::to_string_pretty(&points)?);
            if !args.quiet() {
                reporting::print_sweep_table(&points);
            }
        }
    }
    Ok(())
}

fn load_cells(catalog: &CatalogArgs, config: &mut FleetConfig, rng: &mut StdRng) -> Result<Vec<GridCell>> {
    catalog.apply(config);

    let source: Box<dyn GridCatalog> = match &catalog.input {
        Some(path) => {
            let _timing = logging::start_timing("load_grids",
                OperationCategory::Catalog { subcategory: CatalogOpType::Load });
            let cells = catalog_loader::load_grids(path)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("failed to load grid catalog {}", path.display()))?;
            Box::new(StaticCatalog::new(cells))
        }
        None => Box::new(KadikoySampleCatalog),
    };

    let _timing = logging::start_timing("catalog_grids",
        OperationCategory::Catalog { subcategory: CatalogOpType::Generation });
    let cells = source.grids(&config.city, &config.district, rng)?;
    if cells.is_empty() {
        warn!(city = %config.city, district = %config.district, "grid catalog is empty");
    }
    info!(city = %config.city, district = %config.district, cells = cells.len(), "grid catalog ready");
    Ok(cells)
}
