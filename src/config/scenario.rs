// src/config/scenario.rs

use serde::{Deserialize, Serialize};

use crate::config::parameters::SimulationParameters;
use crate::math::{GridRule, Scheme};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub grid: GridRule,
    pub runs: Vec<RunInstance>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RunInstance {
    pub name: String,
    pub scheme: Scheme,
    pub parameters: SimulationParameters,
    #[serde(default = "default_reference")]
    pub reference: bool, // 理論解を出力に含めるか
}

fn default_reference() -> bool {
    true
}
