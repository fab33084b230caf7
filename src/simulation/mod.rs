// src/simulation/mod.rs

pub mod csv;
pub mod framework;
pub mod load_parameters;

use crate::math::Trajectory;

/// 1回の実行結果と理論解との比較
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub name: String,
    pub trajectory: Trajectory,
    pub reference: Option<Vec<f64>>, // x0 * cos(ωt)
    pub max_error: Option<f64>,      // 参照列との最大絶対誤差
    pub energy_drift: Option<f64>,   // 速度を追跡するスキームのみ
}
