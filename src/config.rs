// src/config.rs
// Runtime configuration for the Clean Sweep simulation, loaded from YAML.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::{PowerConfig, ReactivationPolicy};
use crate::{CleanSweepError, Result};

/// Default cap on ticks for one run
pub const DEFAULT_MAX_TICKS: usize = 10_000;

/// Top-level configuration.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// power:
///   low_battery_threshold: 25
///   energy_costs:
///     tile: 3
/// reactivation:
///   clear_visited: true
/// action_log_path: clean_sweep.log
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanSweepConfig {
    /// Battery threshold and surface costs
    pub power: PowerConfig,
    /// What survives `set_active(true)`
    pub reactivation: ReactivationPolicy,
    /// Append action records to this file when set
    pub action_log_path: Option<PathBuf>,
    /// Safety cap on ticks per run
    pub max_ticks: usize,
}

impl Default for CleanSweepConfig {
    fn default() -> Self {
        CleanSweepConfig {
            power: PowerConfig::default(),
            reactivation: ReactivationPolicy::default(),
            action_log_path: None,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl CleanSweepConfig {
    /// Reads and validates a YAML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: CleanSweepConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CleanSweepConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        self.power.validate()?;
        if self.max_ticks == 0 {
            return Err(CleanSweepError::Config(
                "max_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
