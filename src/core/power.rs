// core/power.rs

// Battery accounting. Every move drains the battery by the energy cost of the
// surface the robot moves onto; the low threshold sends the robot back to a
// charging station and a non-positive level shuts it down.

// Dependencies
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::cell::{Cell, SurfaceType};
use super::state::RobotState;
use crate::{CleanSweepError, Result};

/// Battery percentage after a recharge
pub const FULL_CHARGE: i32 = 100;

/// Default low-battery threshold (percent, inclusive)
pub const LOW_BATTERY_THRESHOLD: i32 = 20;

/// Energy units drained per move onto each surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyCosts {
    /// Hardwood and other bare floors
    pub bare_floor: i32,
    /// Tile
    pub tile: i32,
    /// Low-pile carpet
    pub low_pile_carpet: i32,
    /// High-pile carpet
    pub high_pile_carpet: i32,
    /// Unrecognised surfaces
    pub unknown: i32,
}

impl Default for EnergyCosts {
    fn default() -> Self {
        EnergyCosts {
            bare_floor: 1,
            tile: 2,
            low_pile_carpet: 5,
            high_pile_carpet: 8,
            unknown: 1,
        }
    }
}

impl EnergyCosts {
    /// Cost of one move onto `surface`
    pub fn cost(&self, surface: SurfaceType) -> i32 {
        match surface {
            SurfaceType::BareFloor => self.bare_floor,
            SurfaceType::Tile => self.tile,
            SurfaceType::LowPileCarpet => self.low_pile_carpet,
            SurfaceType::HighPileCarpet => self.high_pile_carpet,
            SurfaceType::Unknown => self.unknown,
        }
    }
}

/// Power model configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Battery at or below this level triggers return-to-charge
    pub low_battery_threshold: i32,
    /// Per-surface move costs
    pub energy_costs: EnergyCosts,
}

impl Default for PowerConfig {
    fn default() -> Self {
        PowerConfig {
            low_battery_threshold: LOW_BATTERY_THRESHOLD,
            energy_costs: EnergyCosts::default(),
        }
    }
}

impl PowerConfig {
    /// Checks that every cost is positive and the threshold is a percentage
    pub fn validate(&self) -> Result<()> {
        if !(0..=FULL_CHARGE).contains(&self.low_battery_threshold) {
            return Err(CleanSweepError::Config(format!(
                "low_battery_threshold must be within 0..={}, got {}",
                FULL_CHARGE, self.low_battery_threshold
            )));
        }

        let costs = self.energy_costs;
        for (surface, cost) in [
            (SurfaceType::BareFloor, costs.bare_floor),
            (SurfaceType::Tile, costs.tile),
            (SurfaceType::LowPileCarpet, costs.low_pile_carpet),
            (SurfaceType::HighPileCarpet, costs.high_pile_carpet),
            (SurfaceType::Unknown, costs.unknown),
        ] {
            if cost <= 0 {
                return Err(CleanSweepError::Config(format!(
                    "energy cost for {} must be positive, got {}",
                    surface, cost
                )));
            }
        }
        Ok(())
    }
}

/// Applies the power model to a `RobotState`
#[derive(Clone, Debug, Default)]
pub struct PowerManager {
    config: PowerConfig,
}

impl PowerManager {
    /// Creates a power manager from a validated configuration
    pub fn new(config: PowerConfig) -> Self {
        PowerManager { config }
    }

    /// Configured threshold
    pub fn low_battery_threshold(&self) -> i32 {
        self.config.low_battery_threshold
    }

    /// Energy drained by one move onto `surface`
    pub fn energy_cost(&self, surface: SurfaceType) -> i32 {
        self.config.energy_costs.cost(surface)
    }

    /// Drains the cost of moving onto `cell`; returns the amount drained
    pub fn apply_move(&self, state: &mut RobotState, cell: &Cell) -> i32 {
        let cost = self.energy_cost(cell.surface());
        state.drain(cost);
        debug!(
            "Moved onto {} {}: -{} (battery {}%)",
            cell.surface(),
            cell.coord(),
            cost,
            state.battery_level()
        );
        cost
    }

    /// Battery at or below the low threshold
    pub fn is_low(&self, state: &RobotState) -> bool {
        state.raw_battery() <= self.config.low_battery_threshold
    }

    /// Battery at or below zero
    pub fn is_depleted(&self, state: &RobotState) -> bool {
        state.raw_battery() <= 0
    }

    /// Refills the battery if `cell` is a charging station
    pub fn recharge(&self, state: &mut RobotState, cell: &Cell) -> bool {
        if !cell.is_charging_station() {
            return false;
        }
        state.set_battery(FULL_CHARGE);
        info!("Recharged at {}", cell.coord());
        true
    }
}
