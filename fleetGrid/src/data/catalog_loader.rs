use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::config::constants::DEFAULT_GRID_SIZE_M;
use crate::models::coordinate::Coordinate;
use crate::models::grid_cell::{GridBounds, GridCell, GridFeatures, GridScores, PedestrianTraffic};

#[derive(Debug)]
pub enum CatalogLoadError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    MissingColumn(String),
    InvalidField { row: usize, column: String, value: String },
    UnsupportedFormat(String),
}

impl From<std::io::Error> for CatalogLoadError {
    fn from(err: std::io::Error) -> Self {
        CatalogLoadError::IoError(err)
    }
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        CatalogLoadError::CsvError(err)
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        CatalogLoadError::JsonError(err)
    }
}

impl std::fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLoadError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            CatalogLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            CatalogLoadError::MissingColumn(c) => write!(f, "Missing column: {}", c),
            CatalogLoadError::InvalidField { row, column, value } => {
                write!(f, "Invalid {} on row {}: {:?}", column, row, value)
            }
            CatalogLoadError::UnsupportedFormat(s) => write!(f, "Unsupported catalog format: {}", s),
        }
    }
}

impl std::error::Error for CatalogLoadError {}

/// Loads grid cells from a `.json` or `.csv` file, picked by extension.
pub fn load_grids(path: &Path) -> Result<Vec<GridCell>, CatalogLoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let cells = match extension.as_str() {
        "json" => load_json(File::open(path)?)?,
        "csv" => load_csv(File::open(path)?)?,
        other => return Err(CatalogLoadError::UnsupportedFormat(other.to_string())),
    };

    info!(path = %path.display(), cells = cells.len(), "grid catalog loaded");
    Ok(cells)
}

/// Reads the catalog's own JSON shape: an array of grid cells.
pub fn load_json<R: Read>(reader: R) -> Result<Vec<GridCell>, CatalogLoadError> {
    let cells: Vec<GridCell> = serde_json::from_reader(BufReader::new(reader))?;
    Ok(cells)
}

struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    fn require(&self, name: &str) -> Result<usize, CatalogLoadError> {
        self.index(name).ok_or_else(|| CatalogLoadError::MissingColumn(name.to_string()))
    }
}

fn field<'r>(record: &'r StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| record.get(i)).map(str::trim).filter(|s| !s.is_empty())
}

fn parse<T: std::str::FromStr>(
    record: &StringRecord,
    idx: Option<usize>,
    row: usize,
    column: &str,
) -> Result<Option<T>, CatalogLoadError> {
    match field(record, idx) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| CatalogLoadError::InvalidField {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_required<T: std::str::FromStr>(
    record: &StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<T, CatalogLoadError> {
    parse(record, Some(idx), row, column)?.ok_or_else(|| CatalogLoadError::InvalidField {
        row,
        column: column.to_string(),
        value: String::new(),
    })
}

/// Reads a flat CSV catalog. `id`, `lat`, `lng`, `final_score` and
/// `recommended_vehicles` are required; component scores default to the final
/// score and descriptive features to empty values.
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<GridCell>, CatalogLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns { headers: reader.headers()?.clone() };

    let id_idx = columns.require("id")?;
    let lat_idx = columns.require("lat")?;
    let lng_idx = columns.require("lng")?;
    let score_idx = columns.require("final_score")?;
    let vehicles_idx = columns.require("recommended_vehicles")?;

    let mut cells = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let id: String = parse_required(&record, id_idx, row, "id")?;
        let lat: f64 = parse_required(&record, lat_idx, row, "lat")?;
        let lng: f64 = parse_required(&record, lng_idx, row, "lng")?;
        let final_score: f64 = parse_required(&record, score_idx, row, "final_score")?;
        let recommended_vehicles: u32 = parse_required(&record, vehicles_idx, row, "recommended_vehicles")?;

        let grid_size: u32 = parse(&record, columns.index("grid_size"), row, "grid_size")?
            .unwrap_or(DEFAULT_GRID_SIZE_M);
        let score_or_final = |name: &str| -> Result<f64, CatalogLoadError> {
            Ok(parse(&record, columns.index(name), row, name)?.unwrap_or(final_score))
        };
        let scores = GridScores {
            accessibility: score_or_final("accessibility")?,
            demand: score_or_final("demand")?,
            operational: score_or_final("operational")?,
            final_score,
        };

        let defaults = GridFeatures::default();
        let pedestrian_traffic = match field(&record, columns.index("pedestrian_traffic")) {
            None => defaults.pedestrian_traffic,
            Some(raw) => raw.parse::<PedestrianTraffic>().map_err(|_| CatalogLoadError::InvalidField {
                row,
                column: "pedestrian_traffic".to_string(),
                value: raw.to_string(),
            })?,
        };
        let features = GridFeatures {
            metro_distance: parse(&record, columns.index("metro_distance"), row, "metro_distance")?
                .unwrap_or(defaults.metro_distance),
            bus_stop_count: parse(&record, columns.index("bus_stop_count"), row, "bus_stop_count")?
                .unwrap_or(defaults.bus_stop_count),
            building_count: parse(&record, columns.index("building_count"), row, "building_count")?
                .unwrap_or(defaults.building_count),
            pedestrian_traffic,
            commercial_ratio: parse(&record, columns.index("commercial_ratio"), row, "commercial_ratio")?
                .unwrap_or(defaults.commercial_ratio),
        };

        if !(0.0..=100.0).contains(&final_score) {
            warn!(row, id = %id, final_score, "final_score outside [0, 100]");
        }

        let center = Coordinate::new(lat, lng);
        cells.push(GridCell {
            id,
            city: field(&record, columns.index("city")).unwrap_or_default().to_string(),
            district: field(&record, columns.index("district")).unwrap_or_default().to_string(),
            grid_size,
            center,
            bounds: GridBounds::from_size_m(&center, grid_size),
            scores,
            features,
            recommended_vehicles,
        });
    }

    Ok(cells)
}
