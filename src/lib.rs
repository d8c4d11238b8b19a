//! Clean Sweep - navigation engine for a simulated cleaning robot
//!
//! The robot moves over a fully known floor grid. Each tick it either heads
//! for the nearest unvisited cell or, when the battery is low, for the nearest
//! charging station, using breadth-first search. Moves drain the battery by
//! the cost of the surface moved onto. Stairs, an empty battery or running
//! out of reachable cells shut the robot down.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// YAML runtime configuration
pub mod config;
/// Floor grid, sensors, power model, robot state and action log
pub mod core;
/// Path search and the per-tick controller
pub mod navigation;

// Re-export commonly used items for easier access
pub use config::CleanSweepConfig;
pub use crate::core::{
    ActionLog, Cell, Coord, FileActionLog, FloorPlan, HazardSensor, MemoryActionLog, Mode,
    ReactivationPolicy, RobotState, ShutdownReason, SurfaceType,
};
pub use navigation::{CleanSweepNavigator, NavigatorStatus, TickOutcome, find_path};

use log::info;
use thiserror::Error;

/// Clean Sweep error type
#[derive(Error, Debug)]
pub enum CleanSweepError {
    /// Reading a floor plan/config or opening the action log failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Floor plan JSON could not be parsed
    #[error("Floor plan parse error: {0}")]
    FloorPlanParse(#[from] serde_json::Error),

    /// Configuration YAML could not be parsed
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Floor plan is structurally invalid
    #[error("Invalid floor plan: {0}")]
    InvalidFloorPlan(String),

    /// Configuration or placement value is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CleanSweepError>;

/// Driving loop around a `CleanSweepNavigator`
pub struct CleanSweep {
    navigator: CleanSweepNavigator,
    max_ticks: usize,
}

impl CleanSweep {
    /// Builds the navigator and, when `config.action_log_path` is set, opens
    /// the action log file. The file stays open until this value is dropped.
    pub fn new(floor_plan: FloorPlan, start: Coord, config: &CleanSweepConfig) -> Result<Self> {
        let navigator = CleanSweepNavigator::new(floor_plan, start, config)?;
        let navigator = match &config.action_log_path {
            Some(path) => navigator.with_action_log(FileActionLog::open(path)?),
            None => navigator,
        };

        Ok(CleanSweep {
            navigator,
            max_ticks: config.max_ticks,
        })
    }

    /// Wraps an already configured navigator
    pub fn from_navigator(navigator: CleanSweepNavigator, max_ticks: usize) -> Self {
        CleanSweep {
            navigator,
            max_ticks,
        }
    }

    /// Ticks until shutdown, deactivation or the tick cap
    pub fn run_until_shutdown(&mut self) -> NavigatorStatus {
        for _ in 0..self.max_ticks {
            if self.navigator.navigate() == TickOutcome::Idle {
                break;
            }
            if self.navigator.is_shutdown() {
                break;
            }
        }

        let status = self.navigator.status();
        info!(
            "Run finished at {} after {} moves: {:?} ({} cells visited, battery {}%)",
            status.position,
            status.moves,
            status.mode,
            status.visited_cells,
            status.battery_level
        );
        status
    }

    /// The wrapped navigator
    pub fn navigator(&self) -> &CleanSweepNavigator {
        &self.navigator
    }

    /// Mutable access for manual overrides between runs
    pub fn navigator_mut(&mut self) -> &mut CleanSweepNavigator {
        &mut self.navigator
    }
}
