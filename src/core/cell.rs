// core/cell.rs

// Single grid square of the floor plan: where it is, what surface covers it,
// and whether it holds an obstacle, a charging station or stairs. Cells are
// created once when the floor plan is built and never change afterwards.

// Dependencies
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid coordinate.
///
/// Signed so that neighbours of edge cells (e.g. `x - 1` at column 0) can be
/// queried without wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column
    pub x: i32,
    /// Row (grows downwards)
    pub y: i32,
}

impl Coord {
    /// Creates a coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// 4-connected neighbours in search priority order: right, down, left, up.
    pub fn neighbors(self) -> [Coord; 4] {
        [
            Coord::new(self.x.saturating_add(1), self.y),
            Coord::new(self.x, self.y.saturating_add(1)),
            Coord::new(self.x.saturating_sub(1), self.y),
            Coord::new(self.x, self.y.saturating_sub(1)),
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

/// Floor covering of a cell. Each surface has a fixed energy cost per move
/// (see `core::power`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurfaceType {
    /// Hardwood or any other bare floor
    #[default]
    BareFloor,
    /// Tiled floor
    Tile,
    /// Low-pile carpet
    LowPileCarpet,
    /// High-pile carpet
    HighPileCarpet,
    /// Unrecognised surface, also reported for out-of-bounds queries
    Unknown,
}

impl SurfaceType {
    /// Canonical name used in floor plan files and logs
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceType::BareFloor => "bare-floor",
            SurfaceType::Tile => "tile",
            SurfaceType::LowPileCarpet => "low-pile-carpet",
            SurfaceType::HighPileCarpet => "high-pile-carpet",
            SurfaceType::Unknown => "unknown",
        }
    }

    /// Parses a surface name. Case, spaces and underscores are ignored so that
    /// "Low Pile Carpet", "low_pile_carpet" and "low-pile-carpet" all match.
    /// Anything unrecognised becomes `Unknown`.
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "bare-floor" | "bare" | "hardwood" | "wood" => SurfaceType::BareFloor,
            "tile" => SurfaceType::Tile,
            "low-pile-carpet" | "low-pile" | "carpet" => SurfaceType::LowPileCarpet,
            "high-pile-carpet" | "high-pile" => SurfaceType::HighPileCarpet,
            _ => SurfaceType::Unknown,
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SurfaceType {
    fn from(name: String) -> Self {
        SurfaceType::parse(&name)
    }
}

impl From<SurfaceType> for String {
    fn from(surface: SurfaceType) -> Self {
        surface.as_str().to_string()
    }
}

/// One square of the floor grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    surface: SurfaceType,
    obstacle: bool,
    charging_station: bool,
    stairs: bool,
}

impl Cell {
    /// Creates an open cell with the given surface
    pub fn new(coord: Coord, surface: SurfaceType) -> Self {
        Cell {
            coord,
            surface,
            obstacle: false,
            charging_station: false,
            stairs: false,
        }
    }

    /// Marks the cell as blocked by an obstacle
    pub fn with_obstacle(mut self, obstacle: bool) -> Self {
        self.obstacle = obstacle;
        self
    }

    /// Marks the cell as holding a charging station
    pub fn with_charging_station(mut self, charging_station: bool) -> Self {
        self.charging_station = charging_station;
        self
    }

    /// Marks the cell as a stairs drop-off
    pub fn with_stairs(mut self, stairs: bool) -> Self {
        self.stairs = stairs;
        self
    }

    /// Grid position of the cell
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Floor covering
    pub fn surface(&self) -> SurfaceType {
        self.surface
    }

    /// Whether an obstacle occupies the cell
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Whether a charging station sits on the cell
    pub fn is_charging_station(&self) -> bool {
        self.charging_station
    }

    /// Whether the cell is a stairs drop-off
    pub fn is_stairs(&self) -> bool {
        self.stairs
    }
}
