use std::fmt;

use rand::{Rng, RngCore};

use crate::config::constants::{
    KADIKOY_BASE_LAT, KADIKOY_BASE_LNG, SAMPLE_CENTER_VARIATION_DEG, SAMPLE_COLUMNS,
    SAMPLE_COL_PITCH, SAMPLE_GRID_SIZE_DEG, SAMPLE_ROW_PITCH, DEFAULT_GRID_SIZE_M,
};
use crate::models::coordinate::Coordinate;
use crate::models::grid_cell::{GridBounds, GridCell, GridFeatures, GridScores, PedestrianTraffic};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    NotFound { city: String, district: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound { city, district } => {
                write!(f, "City/district not found: {}/{}", city, district)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Source of scored grid cells for a city district.
pub trait GridCatalog {
    fn grids(&self, city: &str, district: &str, rng: &mut dyn RngCore) -> Result<Vec<GridCell>, CatalogError>;
}

struct SampleLocation {
    name: &'static str,
    final_score: f64,
    accessibility: f64,
    demand: f64,
    operational: f64,
    metro_distance: u32,
    bus_stop_count: u32,
    building_count: u32,
    pedestrian_traffic: PedestrianTraffic,
    commercial_ratio: f64,
    recommended_vehicles: u32,
}

macro_rules! location {
    ($name:expr, $final:expr, $acc:expr, $dem:expr, $op:expr, $metro:expr, $bus:expr,
     $bld:expr, $ped:ident, $comm:expr, $veh:expr) => {
        SampleLocation {
            name: $name,
            final_score: $final,
            accessibility: $acc,
            demand: $dem,
            operational: $op,
            metro_distance: $metro,
            bus_stop_count: $bus,
            building_count: $bld,
            pedestrian_traffic: PedestrianTraffic::$ped,
            commercial_ratio: $comm,
            recommended_vehicles: $veh,
        }
    };
}

const KADIKOY_LOCATIONS: [SampleLocation; 20] = [
    location!("Altiyol Junction", 95.8, 98.0, 96.0, 92.0, 150, 8, 85, VeryHigh, 0.75, 4),
    location!("Bahariye Street", 93.5, 95.0, 94.0, 90.0, 180, 7, 95, VeryHigh, 0.80, 4),
    location!("Moda Pier", 91.2, 88.0, 96.0, 88.0, 300, 5, 65, VeryHigh, 0.55, 3),
    location!("Kadikoy Market", 89.7, 92.0, 91.0, 85.0, 200, 9, 120, High, 0.70, 3),
    location!("Caferaga District", 87.3, 85.0, 90.0, 86.0, 250, 6, 78, High, 0.65, 2),
    location!("Sogutlucesme", 85.9, 90.0, 86.0, 82.0, 180, 8, 88, High, 0.60, 2),
    location!("Moda Street", 84.6, 82.0, 88.0, 83.0, 350, 4, 72, High, 0.58, 2),
    location!("Yeldegirmeni", 82.1, 78.0, 85.0, 81.0, 400, 5, 95, Medium, 0.50, 2),
    location!("Feneryolu", 79.8, 85.0, 79.0, 76.0, 220, 7, 68, Medium, 0.52, 1),
    location!("Hasanpasa", 77.4, 80.0, 78.0, 75.0, 280, 6, 82, Medium, 0.48, 1),
    location!("Fikirtepe", 74.2, 75.0, 76.0, 72.0, 320, 5, 90, Medium, 0.45, 1),
    location!("Rasimpasa", 71.8, 72.0, 74.0, 70.0, 380, 4, 65, Medium, 0.42, 1),
    location!("Goztepe", 69.5, 78.0, 68.0, 68.0, 250, 6, 58, Low, 0.38, 1),
    location!("Kozyatagi North", 67.3, 70.0, 67.0, 66.0, 420, 3, 48, Low, 0.35, 1),
    location!("Bostanci Beach", 88.9, 86.0, 92.0, 87.0, 280, 5, 42, High, 0.60, 2),
    location!("Caddebostan", 85.2, 88.0, 85.0, 84.0, 240, 7, 55, High, 0.62, 2),
    location!("Suadiye", 82.7, 82.0, 84.0, 81.0, 260, 6, 62, Medium, 0.55, 2),
    location!("Erenkoy", 79.9, 79.0, 81.0, 78.0, 300, 5, 70, Medium, 0.50, 1),
    location!("Kosuyolu", 76.5, 74.0, 78.0, 75.0, 340, 4, 58, Medium, 0.47, 1),
    location!("Acibadem", 73.8, 76.0, 73.0, 72.0, 290, 6, 52, Low, 0.43, 1),
];

/// Synthetic Kadikoy (Istanbul) district: twenty named locations laid out in
/// rows of five, each nudged by a small random offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct KadikoySampleCatalog;

impl KadikoySampleCatalog {
    pub const CITY: &'static str = "Istanbul";
    pub const DISTRICT: &'static str = "Kadikoy";

    pub fn covers(city: &str, district: &str) -> bool {
        city.eq_ignore_ascii_case(Self::CITY) && district.eq_ignore_ascii_case(Self::DISTRICT)
    }

    pub fn location_name(grid_id: &str) -> Option<&'static str> {
        let mut chars = grid_id.strip_prefix("KD_")?.chars();
        let row_letter = chars.next().filter(|c| c.is_ascii_uppercase())?;
        let row = (row_letter as u8 - b'A') as usize;
        let col: usize = chars.as_str().parse().ok()?;
        let idx = row * SAMPLE_COLUMNS + col.checked_sub(1)?;
        KADIKOY_LOCATIONS.get(idx).map(|loc| loc.name)
    }

    pub fn generate(rng: &mut dyn RngCore) -> Vec<GridCell> {
        let half_grid = SAMPLE_GRID_SIZE_DEG / 2.0;

        KADIKOY_LOCATIONS
            .iter()
            .enumerate()
            .map(|(idx, loc)| {
                let row = idx / SAMPLE_COLUMNS;
                let col = idx % SAMPLE_COLUMNS;

                let lat_offset = (rng.gen::<f64>() - 0.5) * SAMPLE_CENTER_VARIATION_DEG;
                let lng_offset = (rng.gen::<f64>() - 0.5) * SAMPLE_CENTER_VARIATION_DEG;
                let center = Coordinate::new(
                    KADIKOY_BASE_LAT + row as f64 * SAMPLE_GRID_SIZE_DEG * SAMPLE_ROW_PITCH + lat_offset,
                    KADIKOY_BASE_LNG + col as f64 * SAMPLE_GRID_SIZE_DEG * SAMPLE_COL_PITCH + lng_offset,
                );

                GridCell {
                    id: format!("KD_{}{}", (b'A' + row as u8) as char, col + 1),
                    city: Self::CITY.to_string(),
                    district: Self::DISTRICT.to_string(),
                    grid_size: DEFAULT_GRID_SIZE_M,
                    center,
                    bounds: GridBounds::around(&center, half_grid),
                    scores: GridScores {
                        accessibility: loc.accessibility,
                        demand: loc.demand,
                        operational: loc.operational,
                        final_score: loc.final_score,
                    },
                    features: GridFeatures {
                        metro_distance: loc.metro_distance,
                        bus_stop_count: loc.bus_stop_count,
                        building_count: loc.building_count,
                        pedestrian_traffic: loc.pedestrian_traffic,
                        commercial_ratio: loc.commercial_ratio,
                    },
                    recommended_vehicles: loc.recommended_vehicles,
                }
            })
            .collect()
    }
}

impl GridCatalog for KadikoySampleCatalog {
    fn grids(&self, city: &str, district: &str, rng: &mut dyn RngCore) -> Result<Vec<GridCell>, CatalogError> {
        if !Self::covers(city, district) {
            return Err(CatalogError::NotFound {
                city: city.to_string(),
                district: district.to_string(),
            });
        }
        Ok(Self::generate(rng))
    }
}

/// Cells loaded ahead of time (from a file, or built by hand in tests).
/// Served for any city/district.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    cells: Vec<GridCell>,
}

impl StaticCatalog {
    pub fn new(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }
}

impl GridCatalog for StaticCatalog {
    fn grids(&self, _city: &str, _district: &str, _rng: &mut dyn RngCore) -> Result<Vec<GridCell>, CatalogError> {
        Ok(self.cells.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn kadikoy_has_twenty_unique_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let cells = KadikoySampleCatalog.grids("Istanbul", "Kadikoy", &mut rng).unwrap();

        assert_eq!(cells.len(), 20);
        let ids: HashSet<_> = cells.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(cells[0].id, "KD_A1");
        assert_eq!(cells[19].id, "KD_D5");
        assert_eq!(cells.iter().map(|c| c.recommended_vehicles).sum::<u32>(), 37);
    }

    #[test]
    fn lookup_ignores_case() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(KadikoySampleCatalog.grids("ISTANBUL", "kadikoy", &mut rng).is_ok());
    }

    #[test]
    fn unknown_district_is_not_found() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = KadikoySampleCatalog.grids("Istanbul", "Besiktas", &mut rng).unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound { city: "Istanbul".to_string(), district: "Besiktas".to_string() }
        );
    }

    #[test]
    fn centers_stay_near_their_grid_slot() {
        let mut rng = StdRng::seed_from_u64(9);
        let cells = KadikoySampleCatalog::generate(&mut rng);
        let d = &cells[7]; // row 1, col 2
        let slot_lat = KADIKOY_BASE_LAT + SAMPLE_GRID_SIZE_DEG * SAMPLE_ROW_PITCH;
        let slot_lng = KADIKOY_BASE_LNG + 2.0 * SAMPLE_GRID_SIZE_DEG * SAMPLE_COL_PITCH;
        assert_eq!(d.id, "KD_B3");
        assert!((d.center.lat - slot_lat).abs() <= SAMPLE_CENTER_VARIATION_DEG / 2.0);
        assert!((d.center.lng - slot_lng).abs() <= SAMPLE_CENTER_VARIATION_DEG / 2.0);
        assert!(d.bounds.top_left.lat > d.center.lat);
    }

    #[test]
    fn same_seed_same_catalog() {
        let a = KadikoySampleCatalog::generate(&mut StdRng::seed_from_u64(5));
        let b = KadikoySampleCatalog::generate(&mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn names_resolve_from_ids() {
        assert_eq!(KadikoySampleCatalog::location_name("KD_A1"), Some("Altiyol Junction"));
        assert_eq!(KadikoySampleCatalog::location_name("KD_D5"), Some("Acibadem"));
        assert_eq!(KadikoySampleCatalog::location_name("KD_E1"), None);
        assert_eq!(KadikoySampleCatalog::location_name("KD_A0"), None);
        assert_eq!(KadikoySampleCatalog::location_name("XX_A1"), None);
    }
}
