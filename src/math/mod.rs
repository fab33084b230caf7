// src/math/mod.rs

pub mod analytic;
pub mod energy;
pub mod error;
pub mod integrator;
pub mod time_grid;

pub use error::IntegrationError;
pub use integrator::{integrate, integrate_on_grid, Scheme, Stepper, Trajectory};
pub use integrator::{PhaseState, VerletState};
pub use time_grid::{GridRule, TimeGrid};
