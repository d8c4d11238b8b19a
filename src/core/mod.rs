// core/mod.rs

// Declares and exposes the building blocks the navigator works with: the floor
// grid and its cells, virtual sensors, the power model, robot state and the
// action log sink. Navigation logic lives in `crate::navigation`.

/// Sinks for timestamped action records
pub mod action_log;
/// Coordinates, surfaces and grid cells
pub mod cell;
/// The immutable floor grid and its JSON loader
pub mod floor_plan;
/// Energy costs and battery rules
pub mod power;
/// Lookups over the grid and hazard sensing
pub mod sensors;
/// Robot state, modes and shutdown reasons
pub mod state;

// Re-export key types for a unified API
pub use action_log::{ActionLog, ActionRecord, FileActionLog, MemoryActionLog, NullActionLog};
pub use cell::{Cell, Coord, SurfaceType};
pub use floor_plan::{FloorPlan, FloorPlanBuilder, MAX_CHARGING_STATIONS};
pub use power::{EnergyCosts, FULL_CHARGE, LOW_BATTERY_THRESHOLD, PowerConfig, PowerManager};
pub use sensors::{HazardPredicate, HazardSensor, Probe, SensorReading, StairsSensor};
pub use state::{Mode, ReactivationPolicy, RobotState, ShutdownReason};
