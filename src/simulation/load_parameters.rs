// src/simulation/load_parameters.rs

use std::error::Error;
use std::fs::File;
use std::path::Path;

use serde_yaml::from_reader;

use crate::config::{parameters::SimulationParameters, scenario::Scenario};

/// シナリオの読み込み
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, Box<dyn Error>> {
    let file = File::open(path)?;
    let scenario: Scenario = from_reader(file)?;
    Ok(scenario)
}

/// 単体パラメータの読み込み
pub fn load_simulation_parameters<P: AsRef<Path>>(
    path: P,
) -> Result<SimulationParameters, Box<dyn Error>> {
    let file = File::open(path)?;
    let params: SimulationParameters = from_reader(file)?;
    Ok(params)
}
