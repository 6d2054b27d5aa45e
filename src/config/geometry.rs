//! Grid and solar geometry.
//!
//! Everything here is derived from already validated `[AREA]` values:
//! square cells, the cell diagonal, angles in radians, and the pixel that
//! contains the target point of a point run.

use serde::Serialize;

use crate::config::options::PixelIndex;
use crate::config::parse;
use crate::config::resolve::ResolvedTable;
use crate::config::schema::Key;
use crate::error::ConfigError;

/// Degrees to radians.
pub const RADIANS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Model grid definition.
///
/// `x`, `y`, `offset_x`, `offset_y` and `num_cells` are working fields for
/// the simulation engine and start at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridGeometry {
    /// Coordinate system label, copied verbatim.
    pub system: String,
    /// Northern edge of the grid.
    pub north_origin: f64,
    /// Western edge of the grid.
    pub west_origin: f64,
    pub rows: i32,
    pub cols: i32,
    /// Row spacing.
    pub dy: f64,
    /// Column spacing, always equal to `dy`.
    pub dx: f64,
    /// Cell diagonal length.
    pub dxy: f64,
    pub x: i32,
    pub y: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub num_cells: i32,
}

impl GridGeometry {
    /// Builds a grid with square cells of size `spacing`.
    #[must_use]
    pub fn new(
        system: String,
        north_origin: f64,
        west_origin: f64,
        rows: i32,
        cols: i32,
        spacing: f64,
    ) -> Self {
        Self {
            system,
            north_origin,
            west_origin,
            rows,
            cols,
            dy: spacing,
            dx: spacing,
            dxy: diagonal(spacing, spacing),
            x: 0,
            y: 0,
            offset_x: 0,
            offset_y: 0,
            num_cells: 0,
        }
    }

    /// Index of the pixel whose centre is nearest to `(north, east)`.
    ///
    /// Fractional indices are rounded half away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // rounded, and far inside i64 for any real grid
    pub fn pixel_at(&self, north: f64, east: f64) -> PixelIndex {
        let row = ((self.north_origin - 0.5 * self.dy) - north) / self.dy;
        let col = (east - (self.west_origin + 0.5 * self.dx)) / self.dx;
        PixelIndex {
            row: row.round() as i64,
            col: col.round() as i64,
        }
    }

    /// Returns `true` if `index` lies on the grid.
    #[must_use]
    pub fn contains(&self, index: PixelIndex) -> bool {
        (0..i64::from(self.rows)).contains(&index.row)
            && (0..i64::from(self.cols)).contains(&index.col)
    }
}

/// Site geometry for solar calculations, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarGeometry {
    pub latitude: f64,
    pub longitude: f64,
    pub standard_meridian: f64,
}

impl SolarGeometry {
    /// Builds the solar geometry from angles given in degrees.
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64, standard_meridian: f64) -> Self {
        Self {
            latitude: latitude * RADIANS_PER_DEGREE,
            longitude: longitude * RADIANS_PER_DEGREE,
            standard_meridian: standard_meridian * RADIANS_PER_DEGREE,
        }
    }
}

/// Reads the `[AREA]` section.
///
/// Keys are consumed in input-file order, so grid and solar fields
/// interleave: coordinate system, origin, site angles, grid size, spacing.
///
/// # Errors
///
/// Returns an invalid-value error for the first key that fails to parse, a
/// row or column count below one, or a spacing that is not positive.
pub fn read_area(values: &ResolvedTable) -> Result<(GridGeometry, SolarGeometry), ConfigError> {
    let float = |key: Key| parse::float(key, values.get(key));

    let system = parse::non_empty(Key::CoordinateSystem, values.get(Key::CoordinateSystem))?;
    let north = float(Key::ExtremeNorth)?;
    let west = float(Key::ExtremeWest)?;
    let latitude = float(Key::CenterLatitude)?;
    let longitude = float(Key::CenterLongitude)?;
    let meridian = float(Key::TimeZoneMeridian)?;
    let rows = count(values, Key::NumberOfRows)?;
    let cols = count(values, Key::NumberOfColumns)?;

    let spacing = float(Key::GridSpacing)?;
    if spacing <= 0.0 {
        return Err(Key::GridSpacing.invalid(values.get(Key::GridSpacing), "must be positive"));
    }

    Ok((
        GridGeometry::new(system, north, west, rows, cols, spacing),
        SolarGeometry::from_degrees(latitude, longitude, meridian),
    ))
}

/// Reads `POINT NORTH` / `POINT EAST` and locates them on `grid`.
///
/// # Errors
///
/// Returns an invalid-value error if either coordinate fails to parse.
pub fn read_point(grid: &GridGeometry, values: &ResolvedTable) -> Result<PixelIndex, ConfigError> {
    let north = parse::float(Key::PointNorth, values.get(Key::PointNorth))?;
    let east = parse::float(Key::PointEast, values.get(Key::PointEast))?;
    Ok(grid.pixel_at(north, east))
}

fn count(values: &ResolvedTable, key: Key) -> Result<i32, ConfigError> {
    let n = parse::int(key, values.get(key))?;
    if n < 1 {
        return Err(key.invalid(values.get(key), "must be at least 1"));
    }
    Ok(n)
}

/// Euclidean length of a cell diagonal.
#[must_use]
pub fn diagonal(dx: f64, dy: f64) -> f64 {
    dx.hypot(dy)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(north: f64, west: f64, spacing: f64) -> GridGeometry {
        GridGeometry::new("UTM".to_string(), north, west, 100, 100, spacing)
    }

    #[test]
    fn test_square_cells_and_diagonal() {
        let g = grid(0.0, 0.0, 30.0);
        assert_eq!(g.dx, g.dy);
        assert!((g.dxy - 30.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!((g.x, g.y, g.offset_x, g.offset_y, g.num_cells), (0, 0, 0, 0, 0));
    }

    #[test]
    fn test_pixel_ties_round_away_from_zero() {
        let g = grid(1000.0, 0.0, 10.0);
        // row: (1000 - 5 - 100) / 10 = 89.5, col: (50 - 5) / 10 = 4.5
        assert_eq!(g.pixel_at(100.0, 50.0), PixelIndex { row: 90, col: 5 });
    }

    #[test]
    fn test_pixel_negative_ties_round_away_from_zero() {
        let g = grid(1000.0, 0.0, 10.0);
        // row: (995 - 1000) / 10 = -0.5, col: (0 - 5) / 10 = -0.5
        assert_eq!(g.pixel_at(1000.0, 0.0), PixelIndex { row: -1, col: -1 });
    }

    #[test]
    fn test_pixel_at_cell_centre() {
        let g = grid(5_000_000.0, 500_000.0, 90.0);
        let index = g.pixel_at(5_000_000.0 - 45.0 - 90.0 * 7.0, 500_000.0 + 45.0 + 90.0 * 3.0);
        assert_eq!(index, PixelIndex { row: 7, col: 3 });
        assert!(g.contains(index));
    }

    #[test]
    fn test_contains_bounds() {
        let g = grid(0.0, 0.0, 1.0);
        assert!(g.contains(PixelIndex { row: 0, col: 99 }));
        assert!(!g.contains(PixelIndex { row: 100, col: 0 }));
        assert!(!g.contains(PixelIndex { row: -1, col: 0 }));
    }

    fn area(extra: &[(&str, &str)]) -> ResolvedTable {
        use crate::config::input::InputTable;
        use crate::config::resolve::{ConfigLimits, resolve};

        let mut input = InputTable::new();
        for (key, value) in extra.iter().chain(&[
            ("COORDINATE SYSTEM", "UTM"),
            ("EXTREME NORTH", "1000"),
            ("EXTREME WEST", "0"),
            ("CENTER LATITUDE", "47.5"),
            ("CENTER LONGITUDE", "-121.5"),
            ("TIME ZONE MERIDIAN", "-120"),
            ("NUMBER OF ROWS", "100"),
            ("NUMBER OF COLUMNS", "80"),
            ("GRID SPACING", "10"),
        ]) {
            input.insert("AREA", key, value);
        }
        resolve(&input, &ConfigLimits::default()).unwrap()
    }

    #[test]
    fn test_read_area() {
        let (grid, solar) = read_area(&area(&[])).unwrap();
        assert_eq!(grid.system, "UTM");
        assert_eq!((grid.rows, grid.cols), (100, 80));
        assert_eq!(grid.dx, 10.0);
        assert!((solar.standard_meridian - (-120.0 * RADIANS_PER_DEGREE)).abs() < 1e-12);
    }

    #[test]
    fn test_read_area_rejects_degenerate_grid() {
        let err = read_area(&area(&[("NUMBER OF ROWS", "0")])).unwrap_err();
        assert_eq!(err.key(), Some("NUMBER OF ROWS"));

        let err = read_area(&area(&[("GRID SPACING", "-30")])).unwrap_err();
        assert_eq!(err.key(), Some("GRID SPACING"));

        let err = read_area(&area(&[("COORDINATE SYSTEM", " ")])).unwrap_err();
        assert_eq!(err.key(), Some("COORDINATE SYSTEM"));
    }

    #[test]
    fn test_read_area_latitude_before_rows() {
        let err = read_area(&area(&[("CENTER LATITUDE", "north"), ("NUMBER OF ROWS", "x")]))
            .unwrap_err();
        assert_eq!(err.key(), Some("CENTER LATITUDE"));
    }

    #[test]
    fn test_read_point() {
        let values = area(&[("POINT NORTH", "100"), ("POINT EAST", "50")]);
        let (grid, _) = read_area(&values).unwrap();
        assert_eq!(read_point(&grid, &values).unwrap(), PixelIndex { row: 90, col: 5 });

        let values = area(&[("POINT NORTH", "100")]);
        let err = read_point(&grid, &values).unwrap_err();
        assert_eq!(err.key(), Some("POINT EAST"));
    }

    #[test]
    fn test_solar_geometry_radians() {
        let solar = SolarGeometry::from_degrees(90.0, -180.0, 0.0);
        assert!((solar.latitude - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((solar.longitude + std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(solar.standard_meridian, 0.0);
    }
}
