// core/state.rs

// Mutable robot state: where the robot stands, its operating mode, battery and
// the cells it has already cleaned during this activation. Handles the
// shutdown / reactivation transitions; the navigator decides when they fire.

// Dependencies
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::cell::Coord;
use super::power::FULL_CHARGE;

/// Robot operating modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Heading for the nearest unvisited cell
    Cleaning,
    /// Low battery, heading for a charging station
    ReturningToCharge,
    /// Terminal until reactivated from outside
    Shutdown,
}

/// Why the robot shut down
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShutdownReason {
    /// Stairs (or another hazard) underfoot
    HazardDetected,
    /// Battery reached zero
    PowerExhausted,
    /// Every reachable cell has been cleaned, or the robot is boxed in
    NoReachableUnvisitedCell,
    /// Battery is low and no charging station can be reached
    ChargerUnreachable,
    /// The charging walk ended somewhere that is not a charging station
    ChargerValidationFailed,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ShutdownReason::HazardDetected => "hazard detected",
            ShutdownReason::PowerExhausted => "power exhausted",
            ShutdownReason::NoReachableUnvisitedCell => "no reachable unvisited cell",
            ShutdownReason::ChargerUnreachable => "charging station unreachable",
            ShutdownReason::ChargerValidationFailed => "arrived cell is not a charging station",
        })
    }
}

/// What survives an external reactivation (`set_active(true)`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactivationPolicy {
    /// Forget the visited cells so the whole floor is cleaned again
    pub clear_visited: bool,
    /// Refill the battery, as if the robot was carried to a dock
    pub restore_battery: bool,
}

/// Simulation state owned by the navigator
#[derive(Clone, Debug)]
pub struct RobotState {
    position: Coord,
    active: bool,
    mode: Mode,
    shutdown_reason: Option<ShutdownReason>,
    battery: i32, // may dip below zero on the final move
    visited: HashSet<Coord>,
}

impl RobotState {
    /// Fresh robot at `start`, active, fully charged, nothing visited
    pub fn new(start: Coord) -> Self {
        RobotState {
            position: start,
            active: true,
            mode: Mode::Cleaning,
            shutdown_reason: None,
            battery: FULL_CHARGE,
            visited: HashSet::new(),
        }
    }

    /// Current cell
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Battery percentage as reported to users, clamped to 0..=100
    pub fn battery_level(&self) -> u8 {
        self.battery.clamp(0, FULL_CHARGE) as u8
    }

    /// Unclamped internal battery value
    pub fn raw_battery(&self) -> i32 {
        self.battery
    }

    /// Whether the robot accepts ticks
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the robot is in the terminal shutdown mode
    pub fn is_shutdown(&self) -> bool {
        self.mode == Mode::Shutdown
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Reason for the last shutdown, cleared on reactivation
    pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
        self.shutdown_reason
    }

    /// Whether the cell has been stood on during this activation
    pub fn has_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    /// Visited cells, unordered
    pub fn visited(&self) -> &HashSet<Coord> {
        &self.visited
    }

    /// Number of visited cells
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub(crate) fn move_to(&mut self, coord: Coord) {
        self.position = coord;
    }

    /// Returns true if the cell was not visited before
    pub(crate) fn mark_visited(&mut self, coord: Coord) -> bool {
        self.visited.insert(coord)
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != Mode::Shutdown {
            self.mode = mode;
        }
    }

    pub(crate) fn drain(&mut self, amount: i32) {
        self.battery = self.battery.saturating_sub(amount);
    }

    /// Sets the battery, never above a full charge
    pub(crate) fn set_battery(&mut self, level: i32) {
        self.battery = level.min(FULL_CHARGE);
    }

    pub(crate) fn shutdown(&mut self, reason: ShutdownReason) {
        self.active = false;
        self.mode = Mode::Shutdown;
        self.shutdown_reason = Some(reason);
        warn!("Shutdown at {}: {}", self.position, reason);
    }

    /// Pauses ticking without entering shutdown
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        info!("Deactivated at {}", self.position);
    }

    /// Resumes ticking. The policy applies only when leaving shutdown; a
    /// paused or already active robot keeps its history and battery.
    ///
    /// Returns true if a shutdown was cleared.
    pub(crate) fn reactivate(&mut self, policy: ReactivationPolicy) -> bool {
        if self.mode != Mode::Shutdown {
            if !self.active {
                info!("Resumed at {}", self.position);
            }
            self.active = true;
            return false;
        }

        self.active = true;
        self.mode = Mode::Cleaning;
        self.shutdown_reason = None;
        if policy.clear_visited {
            self.visited.clear();
        }
        if policy.restore_battery {
            self.battery = FULL_CHARGE;
        }
        info!(
            "Reactivated at {} (battery {}%, {} cells remembered)",
            self.position,
            self.battery_level(),
            self.visited.len()
        );
        true
    }
}
