// core/floor_plan.rs

// The floor grid the robot cleans. Owns every cell in row-major order, checks
// that the grid is complete and consistent when it is built, and loads floor
// plans from JSON files. Read-only once constructed.

// Dependencies
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::cell::{Cell, Coord, SurfaceType};
use crate::{CleanSweepError, Result};

/// Upper bound on charging stations in one floor plan
pub const MAX_CHARGING_STATIONS: usize = 16;

/// Rectangular grid of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorPlan {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // cells[y * width + x]
    charging_stations: Vec<Coord>,
}

impl FloorPlan {
    /// Starts building a `width × height` plan of open bare-floor cells
    pub fn builder(width: usize, height: usize) -> FloorPlanBuilder {
        FloorPlanBuilder::new(width, height)
    }

    /// Builds a plan from a row-major list of cells.
    ///
    /// Every cell's coordinate must match its slot in the list.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "grid {}x{} exceeds the coordinate range",
                width, height
            )));
        }
        if cells.len() != width * height {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "expected {} cells for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                cells.len()
            )));
        }

        for (index, cell) in cells.iter().enumerate() {
            let expected = Coord::new((index % width) as i32, (index / width) as i32);
            if cell.coord() != expected {
                return Err(CleanSweepError::InvalidFloorPlan(format!(
                    "cell at slot {} claims coordinate {}",
                    expected,
                    cell.coord()
                )));
            }
        }

        let charging_stations: Vec<Coord> = cells
            .iter()
            .filter(|cell| cell.is_charging_station())
            .map(Cell::coord)
            .collect();
        if charging_stations.len() > MAX_CHARGING_STATIONS {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "{} charging stations exceed the limit of {}",
                charging_stations.len(),
                MAX_CHARGING_STATIONS
            )));
        }

        Ok(FloorPlan {
            width,
            height,
            cells,
            charging_stations,
        })
    }

    /// Loads a floor plan from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let plan = Self::from_json_str(&data)?;
        info!(
            "Loaded {}x{} floor plan from {} ({} charging stations)",
            plan.width,
            plan.height,
            path.display(),
            plan.charging_stations.len()
        );
        Ok(plan)
    }

    /// Parses a floor plan from JSON text.
    ///
    /// `cells` is indexed `cells[y][x]`. Dimensions come from `width`/`height`
    /// when given, then `gridSize`, then the shape of `cells`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: FloorPlanFile = serde_json::from_str(json)?;
        file.into_floor_plan()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Cell at the coordinate, `None` when out of bounds
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        if !self.contains(coord) {
            return None;
        }
        self.cells.get(coord.y as usize * self.width + coord.x as usize)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Coordinates of every charging station, row-major
    pub fn charging_stations(&self) -> &[Coord] {
        &self.charging_stations
    }

    /// Whether the plan has at least one charging station
    pub fn has_charging_station(&self) -> bool {
        !self.charging_stations.is_empty()
    }

    /// Number of cells without an obstacle
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_obstacle()).count()
    }
}

/// Incremental construction of a `FloorPlan`.
///
/// Out-of-bounds edits are remembered and reported by `build`.
#[derive(Debug)]
pub struct FloorPlanBuilder {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    error: Option<String>,
}

impl FloorPlanBuilder {
    fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| {
                (0..width)
                    .map(move |x| Cell::new(Coord::new(x as i32, y as i32), SurfaceType::default()))
            })
            .collect();
        FloorPlanBuilder {
            width,
            height,
            cells,
            error: None,
        }
    }

    /// Sets the surface of every cell
    pub fn surface(mut self, surface: SurfaceType) -> Self {
        self.cells = self
            .cells
            .into_iter()
            .map(|cell| {
                Cell::new(cell.coord(), surface)
                    .with_obstacle(cell.is_obstacle())
                    .with_charging_station(cell.is_charging_station())
                    .with_stairs(cell.is_stairs())
            })
            .collect();
        self
    }

    /// Sets the surface of one cell
    pub fn surface_at(self, x: i32, y: i32, surface: SurfaceType) -> Self {
        self.edit(x, y, |cell| {
            Cell::new(cell.coord(), surface)
                .with_obstacle(cell.is_obstacle())
                .with_charging_station(cell.is_charging_station())
                .with_stairs(cell.is_stairs())
        })
    }

    /// Places an obstacle
    pub fn obstacle(self, x: i32, y: i32) -> Self {
        self.edit(x, y, |cell| cell.with_obstacle(true))
    }

    /// Places a charging station
    pub fn charging_station(self, x: i32, y: i32) -> Self {
        self.edit(x, y, |cell| cell.with_charging_station(true))
    }

    /// Marks stairs
    pub fn stairs(self, x: i32, y: i32) -> Self {
        self.edit(x, y, |cell| cell.with_stairs(true))
    }

    /// Validates and finishes the plan
    pub fn build(self) -> Result<FloorPlan> {
        if let Some(message) = self.error {
            return Err(CleanSweepError::InvalidFloorPlan(message));
        }
        FloorPlan::from_cells(self.width, self.height, self.cells)
    }

    fn edit(mut self, x: i32, y: i32, change: impl FnOnce(Cell) -> Cell) -> Self {
        let in_bounds =
            x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        if !in_bounds {
            if self.error.is_none() {
                self.error = Some(format!(
                    "cell ({}, {}) is outside the {}x{} grid",
                    x, y, self.width, self.height
                ));
            }
            return self;
        }

        let index = y as usize * self.width + x as usize;
        let cell = self.cells[index].clone();
        self.cells[index] = change(cell);
        self
    }
}

// On-disk layout with camelCase keys
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FloorPlanFile {
    #[serde(default)]
    grid_size: Option<usize>,
    #[serde(default)]
    width: Option<usize>,
    #[serde(default)]
    height: Option<usize>,
    cells: Vec<Vec<CellEntry>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellEntry {
    #[serde(default, rename = "type", alias = "surfaceType", alias = "surface")]
    surface: SurfaceType,
    #[serde(default)]
    obstacle: bool,
    #[serde(default, alias = "charging")]
    charging_station: bool,
    #[serde(default)]
    stairs: bool,
}

impl FloorPlanFile {
    fn into_floor_plan(self) -> Result<FloorPlan> {
        let rows = self.cells.len();
        let columns = self.cells.first().map_or(0, Vec::len);
        let width = self.width.or(self.grid_size).unwrap_or(columns);
        let height = self.height.or(self.grid_size).unwrap_or(rows);

        if rows != height {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "declared height {} but found {} rows",
                height, rows
            )));
        }
        if let Some((y, row)) = self.cells.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(CleanSweepError::InvalidFloorPlan(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        let cells = self
            .cells
            .into_iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.into_iter().enumerate().map(move |(x, entry)| {
                    Cell::new(Coord::new(x as i32, y as i32), entry.surface)
                        .with_obstacle(entry.obstacle)
                        .with_charging_station(entry.charging_station)
                        .with_stairs(entry.stairs)
                })
            })
            .collect();

        FloorPlan::from_cells(width, height, cells)
    }
}
