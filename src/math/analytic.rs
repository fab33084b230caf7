// src/math/analytic.rs

use crate::config::parameters::SimulationParameters;

/// 理論解による参照列 x_theory[i] = x0 * cos(ω t[i])
pub fn cosine_reference(params: &SimulationParameters, t: &[f64]) -> Vec<f64> {
    let omega = params.omega();
    t.iter().map(|&t| params.x0 * (omega * t).cos()).collect()
}

/// 初速度を含む一般解 (変位, 速度)
pub fn exact_state(params: &SimulationParameters, t: f64) -> (f64, f64) {
    let omega = params.omega();
    let (sin, cos) = (omega * t).sin_cos();
    let x = params.x0 * cos + params.v0 / omega * sin;
    let v = -params.x0 * omega * sin + params.v0 * cos;
    (x, v)
}

/// 数値解と参照列の最大絶対誤差
pub fn max_abs_error(numeric: &[f64], reference: &[f64]) -> f64 {
    numeric
        .iter()
        .zip(reference.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
