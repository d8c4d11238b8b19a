// src/main.rs
// Entry point: load a floor plan, run the Clean Sweep robot until it shuts
// down, print where it ended up.
//
// Usage: clean_sweep <floor_plan.json> [--config <file.yaml>] [--start <x>,<y>]

use clean_sweep::{CleanSweep, CleanSweepConfig, Coord, FloorPlan};
use log::{error, info};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let Some(plan_path) = args.get(1).filter(|a| !a.starts_with("--")) else {
        error!("Usage: clean_sweep <floor_plan.json> [--config <file.yaml>] [--start <x>,<y>]");
        return Err("missing floor plan path".into());
    };

    let config = match option_value(&args, "--config") {
        Some(path) => CleanSweepConfig::load(Path::new(path))?,
        None => {
            info!("Using default configuration");
            CleanSweepConfig::default()
        }
    };

    let start = match option_value(&args, "--start") {
        Some(value) => parse_start(value)?,
        None => Coord::new(0, 0),
    };

    let floor_plan = FloorPlan::load(plan_path)?;
    let mut sweep = CleanSweep::new(floor_plan, start, &config)?;
    let status = sweep.run_until_shutdown();

    print!("{}", serde_yaml::to_string(&status)?);
    Ok(())
}

fn option_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_start(value: &str) -> Result<Coord, Box<dyn Error>> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("--start expects <x>,<y>, got {:?}", value))?;
    Ok(Coord::new(x.trim().parse()?, y.trim().parse()?))
}
