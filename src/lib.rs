// src/lib.rs

pub mod config;
pub mod math;
pub mod simulation;

pub use config::{RunInstance, Scenario, SimulationParameters};
pub use math::{integrate, integrate_on_grid, GridRule, IntegrationError, Scheme, Trajectory};
pub use simulation::RunResult;
