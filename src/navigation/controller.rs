// src/navigation/controller.rs
// Per-tick decision logic for the Clean Sweep robot: pick a goal, plan a path
// to it, walk the path while draining the battery, and shut down when nothing
// sensible is left to do.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::config::CleanSweepConfig;
use crate::core::{
    ActionLog, Cell, Coord, FloorPlan, HazardSensor, Mode, NullActionLog, PowerManager,
    ReactivationPolicy, RobotState, ShutdownReason, StairsSensor,
};
use crate::navigation::planner::{Path, find_path};
use crate::{CleanSweepError, Result};

/// Result of one `navigate` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Robot inactive or shut down, nothing happened
    Idle,
    /// Walked towards the nearest unvisited cell
    Moved {
        /// Cells moved this tick
        steps: usize,
    },
    /// Walked to a charging station and recharged
    Recharged {
        /// Cells moved this tick
        steps: usize,
    },
    /// The tick ended in shutdown
    Shutdown(ShutdownReason),
}

/// Point-in-time summary of the navigator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorStatus {
    /// Current cell
    pub position: Coord,
    /// Battery percentage, clamped to 0..=100
    pub battery_level: u8,
    /// Current mode
    pub mode: Mode,
    /// Set once shut down
    pub shutdown_reason: Option<ShutdownReason>,
    /// Cells visited during this activation
    pub visited_cells: usize,
    /// Moves made since construction
    pub moves: u64,
    /// Ticks processed since construction (idle ticks excluded)
    pub ticks: u64,
}

enum Walk {
    Completed(usize),
    Depleted,
}

/// Navigation controller. Owns the robot state and drives it over a
/// read-only floor plan.
pub struct CleanSweepNavigator {
    floor_plan: FloorPlan,
    state: RobotState,
    power: PowerManager,
    reactivation: ReactivationPolicy,
    hazard_sensor: Box<dyn HazardSensor>,
    action_log: Box<dyn ActionLog>,
    moves: u64,
    ticks: u64,
}

impl CleanSweepNavigator {
    /// Creates a navigator with the robot at `start`.
    ///
    /// Fails if the configuration is invalid or `start` is off the grid or on
    /// an obstacle.
    pub fn new(floor_plan: FloorPlan, start: Coord, config: &CleanSweepConfig) -> Result<Self> {
        config.validate()?;
        check_placement(&floor_plan, start)?;

        info!(
            "Clean Sweep starting at {} on a {}x{} floor ({} charging stations)",
            start,
            floor_plan.width(),
            floor_plan.height(),
            floor_plan.charging_stations().len()
        );

        Ok(CleanSweepNavigator {
            floor_plan,
            state: RobotState::new(start),
            power: PowerManager::new(config.power.clone()),
            reactivation: config.reactivation,
            hazard_sensor: Box::new(StairsSensor),
            action_log: Box::new(NullActionLog),
            moves: 0,
            ticks: 0,
        })
    }

    /// Replaces the hazard sensor (stairs flag by default)
    pub fn with_hazard_sensor(mut self, sensor: impl HazardSensor + 'static) -> Self {
        self.hazard_sensor = Box::new(sensor);
        self
    }

    /// Replaces the action log sink (discarding by default)
    pub fn with_action_log(mut self, log: impl ActionLog + 'static) -> Self {
        self.action_log = Box::new(log);
        self
    }

    /// Runs one tick: plan once, walk the plan, update state.
    pub fn navigate(&mut self) -> TickOutcome {
        if !self.state.is_active() || self.state.is_shutdown() {
            debug!("Navigate ignored: robot inactive or shut down");
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        let current = self.state.position();
        self.state.mark_visited(current);
        debug!(
            "Tick {} at {}: battery {}%, sensors {:?}",
            self.ticks,
            current,
            self.state.battery_level(),
            self.floor_plan.surroundings(current)
        );

        // Hazards override everything else
        if self.hazard_sensor.is_hazard(&self.floor_plan, current) {
            return self.shut_down(ShutdownReason::HazardDetected);
        }
        if self.power.is_depleted(&self.state) {
            return self.shut_down(ShutdownReason::PowerExhausted);
        }

        let on_charger = self
            .floor_plan
            .cell(current)
            .is_some_and(Cell::is_charging_station);
        if self.power.is_low(&self.state) && self.floor_plan.has_charging_station() && !on_charger {
            self.return_to_charge(current)
        } else {
            self.clean(current)
        }
    }

    fn return_to_charge(&mut self, current: Coord) -> TickOutcome {
        self.state.set_mode(Mode::ReturningToCharge);
        info!(
            "Battery low ({}%), returning to charge from {}",
            self.state.battery_level(),
            current
        );

        let path = find_path(&self.floor_plan, current, Cell::is_charging_station);
        if path.is_empty() {
            return self.shut_down(ShutdownReason::ChargerUnreachable);
        }

        let steps = match self.walk(&path) {
            Walk::Completed(steps) => steps,
            Walk::Depleted => return self.shut_down(ShutdownReason::PowerExhausted),
        };

        let arrived = self.state.position();
        let recharged = match self.floor_plan.cell(arrived) {
            Some(cell) => self.power.recharge(&mut self.state, cell),
            None => false,
        };
        if !recharged {
            return self.shut_down(ShutdownReason::ChargerValidationFailed);
        }

        self.state.set_mode(Mode::Cleaning);
        self.record(format!(
            "Recharged at {}, battery {}%",
            arrived,
            self.state.battery_level()
        ));
        TickOutcome::Recharged { steps }
    }

    fn clean(&mut self, current: Coord) -> TickOutcome {
        self.state.set_mode(Mode::Cleaning);

        let visited = self.state.visited();
        let path = find_path(&self.floor_plan, current, |cell| {
            !visited.contains(&cell.coord())
        });
        if path.is_empty() {
            return self.shut_down(ShutdownReason::NoReachableUnvisitedCell);
        }

        match self.walk(&path) {
            Walk::Completed(steps) => TickOutcome::Moved { steps },
            Walk::Depleted => self.shut_down(ShutdownReason::PowerExhausted),
        }
    }

    fn walk(&mut self, path: &Path) -> Walk {
        let mut steps = 0;
        for &next in path.steps() {
            let Some(cell) = self.floor_plan.cell(next) else {
                break;
            };
            let surface = cell.surface();
            self.power.apply_move(&mut self.state, cell);
            self.state.move_to(next);
            self.state.mark_visited(next);
            self.moves += 1;
            steps += 1;

            self.record(format!(
                "Moved to {} on {}, battery {}%",
                next,
                surface,
                self.state.battery_level()
            ));

            if self.power.is_depleted(&self.state) {
                return Walk::Depleted;
            }
        }
        Walk::Completed(steps)
    }

    fn shut_down(&mut self, reason: ShutdownReason) -> TickOutcome {
        self.state.shutdown(reason);
        self.record(format!(
            "Shutdown at {}: {}",
            self.state.position(),
            reason
        ));
        TickOutcome::Shutdown(reason)
    }

    fn record(&mut self, message: String) {
        self.action_log.record(SystemTime::now(), &message);
    }

    /// Manually relocates the robot, bypassing pathfinding.
    ///
    /// Rejected when the target is off the grid or on an obstacle.
    pub fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        let target = Coord::new(x, y);
        check_placement(&self.floor_plan, target)?;
        self.state.move_to(target);
        info!("Robot placed at {}", target);
        Ok(())
    }

    /// Activates or deactivates the robot.
    ///
    /// Activation clears a shutdown; visited history and battery are kept
    /// unless the configured `ReactivationPolicy` says otherwise. The policy
    /// is not applied to a robot that was never shut down.
    pub fn set_active(&mut self, active: bool) {
        if active {
            if self.state.reactivate(self.reactivation) {
                self.record(format!("Reactivated at {}", self.state.position()));
            }
        } else {
            self.state.deactivate();
        }
    }

    /// Overrides the battery level (capped at a full charge)
    pub fn set_battery_level(&mut self, level: i32) {
        self.state.set_battery(level);
    }

    /// Current cell
    pub fn position(&self) -> Coord {
        self.state.position()
    }

    /// Battery percentage, clamped to 0..=100
    pub fn battery_level(&self) -> u8 {
        self.state.battery_level()
    }

    /// Whether ticks are processed
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the robot is shut down
    pub fn is_shutdown(&self) -> bool {
        self.state.is_shutdown()
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Reason for the current shutdown
    pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
        self.state.shutdown_reason()
    }

    /// Robot state
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Floor plan being cleaned
    pub fn floor_plan(&self) -> &FloorPlan {
        &self.floor_plan
    }

    /// Summary for reporting
    pub fn status(&self) -> NavigatorStatus {
        NavigatorStatus {
            position: self.state.position(),
            battery_level: self.state.battery_level(),
            mode: self.state.mode(),
            shutdown_reason: self.state.shutdown_reason(),
            visited_cells: self.state.visited_count(),
            moves: self.moves,
            ticks: self.ticks,
        }
    }
}

fn check_placement(floor_plan: &FloorPlan, at: Coord) -> Result<()> {
    match floor_plan.cell(at) {
        None => Err(CleanSweepError::Config(format!(
            "position {} is outside the {}x{} floor plan",
            at,
            floor_plan.width(),
            floor_plan.height()
        ))),
        Some(cell) if cell.is_obstacle() => Err(CleanSweepError::Config(format!(
            "position {} is an obstacle",
            at
        ))),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action_log::MockActionLog;
    use crate::core::sensors::MockHazardSensor;
    use crate::core::{MemoryActionLog, SurfaceType};

    fn navigator(plan: FloorPlan, x: i32, y: i32) -> CleanSweepNavigator {
        CleanSweepNavigator::new(plan, Coord::new(x, y), &CleanSweepConfig::default()).unwrap()
    }

    #[test]
    fn hazard_sensor_shuts_down_before_planning() {
        let plan = FloorPlan::builder(5, 5).build().unwrap();

        let mut sensor = MockHazardSensor::new();
        sensor
            .expect_is_hazard()
            .withf(|_, at| *at == Coord::new(0, 0))
            .times(1)
            .returning(|_, _| true);

        let mut log = MockActionLog::new();
        log.expect_record()
            .withf(|_, message| message.contains("hazard detected"))
            .times(1)
            .return_const(());

        let mut robot = navigator(plan, 0, 0)
            .with_hazard_sensor(sensor)
            .with_action_log(log);

        assert_eq!(
            robot.navigate(),
            TickOutcome::Shutdown(ShutdownReason::HazardDetected)
        );
        assert_eq!(robot.position(), Coord::new(0, 0));
        assert_eq!(robot.battery_level(), 100);
        assert!(!robot.is_active());
    }

    #[test]
    fn every_move_is_recorded() {
        let plan = FloorPlan::builder(3, 1)
            .surface_at(1, 0, SurfaceType::Tile)
            .build()
            .unwrap();
        let log = MemoryActionLog::new();
        let mut robot = navigator(plan, 0, 0).with_action_log(log.clone());

        assert_eq!(robot.navigate(), TickOutcome::Moved { steps: 1 });
        assert_eq!(robot.battery_level(), 98);
        assert_eq!(log.messages(), vec!["Moved to (1, 0) on tile, battery 98%"]);
    }

    #[test]
    fn idle_ticks_change_nothing() {
        let plan = FloorPlan::builder(3, 3).build().unwrap();
        let mut robot = navigator(plan, 1, 1);
        robot.set_active(false);

        assert_eq!(robot.navigate(), TickOutcome::Idle);
        assert!(!robot.is_shutdown());
        assert_eq!(robot.state().visited_count(), 0);
        assert_eq!(robot.status().ticks, 0);
    }

    #[test]
    fn depleted_battery_shuts_down_without_moving() {
        let plan = FloorPlan::builder(3, 3).build().unwrap();
        let mut robot = navigator(plan, 1, 1);
        robot.set_battery_level(0);

        assert_eq!(
            robot.navigate(),
            TickOutcome::Shutdown(ShutdownReason::PowerExhausted)
        );
        assert_eq!(robot.position(), Coord::new(1, 1));
    }

    #[test]
    fn walk_stops_when_power_runs_out() {
        // every carpet move costs 8
        let plan = FloorPlan::builder(6, 1)
            .surface(SurfaceType::HighPileCarpet)
            .build()
            .unwrap();
        let mut robot = navigator(plan, 0, 0);
        robot.set_battery_level(10);

        assert_eq!(robot.navigate(), TickOutcome::Moved { steps: 1 });
        assert_eq!(robot.battery_level(), 2);
        assert_eq!(
            robot.navigate(),
            TickOutcome::Shutdown(ShutdownReason::PowerExhausted)
        );
        assert_eq!(robot.position(), Coord::new(2, 0));
        assert_eq!(robot.state().raw_battery(), -6);
        assert_eq!(robot.battery_level(), 0);
    }

    #[test]
    fn unreachable_charger_shuts_down() {
        let plan = FloorPlan::builder(5, 5)
            .charging_station(4, 4)
            .obstacle(3, 4)
            .obstacle(4, 3)
            .build()
            .unwrap();
        let mut robot = navigator(plan, 0, 0);
        robot.set_battery_level(10);

        assert_eq!(
            robot.navigate(),
            TickOutcome::Shutdown(ShutdownReason::ChargerUnreachable)
        );
        assert_eq!(robot.mode(), Mode::Shutdown);
    }

    #[test]
    fn charging_walk_can_run_dry() {
        let plan = FloorPlan::builder(8, 1)
            .charging_station(7, 0)
            .build()
            .unwrap();
        let mut robot = navigator(plan, 0, 0);
        robot.set_battery_level(3);

        assert_eq!(
            robot.navigate(),
            TickOutcome::Shutdown(ShutdownReason::PowerExhausted)
        );
        assert_eq!(robot.position(), Coord::new(3, 0));
    }

    #[test]
    fn low_battery_on_a_charger_keeps_cleaning() {
        let plan = FloorPlan::builder(3, 1)
            .charging_station(0, 0)
            .build()
            .unwrap();
        let mut robot = navigator(plan, 0, 0);
        robot.set_battery_level(15);

        assert_eq!(robot.navigate(), TickOutcome::Moved { steps: 1 });
        assert_eq!(robot.battery_level(), 14);

        // next tick goes back to the dock
        assert_eq!(robot.navigate(), TickOutcome::Recharged { steps: 1 });
        assert_eq!(robot.battery_level(), 100);
        assert_eq!(robot.mode(), Mode::Cleaning);
    }

    #[test]
    fn placement_is_validated() {
        let plan = FloorPlan::builder(3, 3).obstacle(1, 1).build().unwrap();
        let config = CleanSweepConfig::default();
        assert!(CleanSweepNavigator::new(plan.clone(), Coord::new(-1, 0), &config).is_err());
        assert!(CleanSweepNavigator::new(plan.clone(), Coord::new(1, 1), &config).is_err());

        let mut robot = navigator(plan, 0, 0);
        assert!(robot.set_position(3, 0).is_err());
        assert!(robot.set_position(1, 1).is_err());
        assert!(robot.set_position(2, 2).is_ok());
        assert_eq!(robot.position(), Coord::new(2, 2));
    }

    #[test]
    fn status_serializes() {
        let plan = FloorPlan::builder(2, 1).build().unwrap();
        let mut robot = navigator(plan, 0, 0);
        robot.navigate();
        robot.navigate();

        let status = robot.status();
        assert_eq!(status.moves, 1);
        assert_eq!(status.ticks, 2);
        assert_eq!(
            status.shutdown_reason,
            Some(ShutdownReason::NoReachableUnvisitedCell)
        );
        let yaml = serde_yaml::to_string(&status).unwrap();
        assert!(yaml.contains("no-reachable-unvisited-cell"));
    }
}
