//! Navigation for the Clean Sweep robot
//!
//! `planner` finds shortest grid paths with breadth-first search;
//! `controller` turns those paths into ticks of robot behaviour.

/// Tick logic and manual overrides
pub mod controller;
/// Breadth-first search over the grid
pub mod planner;

pub use controller::{CleanSweepNavigator, NavigatorStatus, TickOutcome};
pub use planner::{Path, find_path};
