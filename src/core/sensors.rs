// core/sensors.rs

// Virtual sensing over the floor plan. The grid is ground truth, so every
// "sensor" is a lookup: obstacle bumpers become `is_blocked`, the cliff sensor
// becomes `is_stairs`, the surface sensor becomes `floor_type`. Out-of-bounds
// coordinates read as walls with an unknown surface.

// Dependencies
use super::cell::{Coord, SurfaceType};
use super::floor_plan::FloorPlan;

impl FloorPlan {
    /// True when the coordinate is off the grid or holds an obstacle
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.cell(coord).is_none_or(|cell| cell.is_obstacle())
    }

    /// Stairs flag of the cell, false off the grid
    pub fn is_stairs(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.is_stairs())
    }

    /// Surface of the cell, `Unknown` off the grid
    pub fn floor_type(&self, coord: Coord) -> SurfaceType {
        self.cell(coord)
            .map_or(SurfaceType::Unknown, |cell| cell.surface())
    }

    /// Full sensor sweep around a position
    pub fn surroundings(&self, coord: Coord) -> SensorReading {
        let [right, down, left, up] = coord.neighbors().map(|next| Probe {
            blocked: self.is_blocked(next),
            floor: self.floor_type(next),
        });
        SensorReading {
            floor: self.floor_type(coord),
            stairs: self.is_stairs(coord),
            right,
            down,
            left,
            up,
        }
    }
}

/// One directional sensor result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Obstacle or grid edge in that direction
    pub blocked: bool,
    /// Surface in that direction
    pub floor: SurfaceType,
}

/// Snapshot of every sensor at one position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorReading {
    /// Surface underfoot
    pub floor: SurfaceType,
    /// Cliff sensor underfoot
    pub stairs: bool,
    /// x + 1
    pub right: Probe,
    /// y + 1
    pub down: Probe,
    /// x - 1
    pub left: Probe,
    /// y - 1
    pub up: Probe,
}

/// Decides whether the robot is standing on something dangerous.
///
/// The navigator consults this before planning each tick. Swapping the
/// implementation lets callers simulate sensor faults without touching the
/// floor plan.
#[cfg_attr(test, mockall::automock)]
pub trait HazardSensor {
    /// True when the position is unsafe to operate on
    fn is_hazard(&self, floor_plan: &FloorPlan, at: Coord) -> bool;
}

/// Default hazard sensor: the stairs flag of the floor plan
#[derive(Clone, Copy, Debug, Default)]
pub struct StairsSensor;

impl HazardSensor for StairsSensor {
    fn is_hazard(&self, floor_plan: &FloorPlan, at: Coord) -> bool {
        floor_plan.is_stairs(at)
    }
}

/// Hazard sensor backed by an arbitrary predicate
pub struct HazardPredicate<F>(pub F);

impl<F> HazardSensor for HazardPredicate<F>
where
    F: Fn(&FloorPlan, Coord) -> bool,
{
    fn is_hazard(&self, floor_plan: &FloorPlan, at: Coord) -> bool {
        (self.0)(floor_plan, at)
    }
}
