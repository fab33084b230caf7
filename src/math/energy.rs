// src/math/energy.rs

use crate::config::parameters::SimulationParameters;

/// 力学的エネルギー E = m v² / 2 + k x² / 2
pub fn mechanical_energy(params: &SimulationParameters, x: f64, v: f64) -> f64 {
    0.5 * params.m * v * v + 0.5 * params.k * x * x
}

/// 各ステップのエネルギー列
pub fn energy_series(params: &SimulationParameters, x: &[f64], v: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(v.iter())
        .map(|(&x, &v)| mechanical_energy(params, x, v))
        .collect()
}

/// 初期エネルギーに対する最大相対ドリフト
///
/// 初期エネルギーがゼロの場合は絶対値を返す。
pub fn max_relative_drift(energy: &[f64]) -> f64 {
    let Some(&e0) = energy.first() else {
        return 0.0;
    };
    let scale = if e0 == 0.0 { 1.0 } else { e0.abs() };
    energy
        .iter()
        .map(|e| (e - e0).abs() / scale)
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_params() -> SimulationParameters {
        SimulationParameters {
            x0: 1.0,
            v0: 0.0,
            k: 2.0,
            m: 4.0,
            dt: 0.1,
            total_time: 1.0,
        }
    }

    #[test]
    fn test_mechanical_energy() {
        // 0.5*4*1 + 0.5*2*9 = 2 + 9 = 11
        assert_eq!(mechanical_energy(&unit_params(), 3.0, 1.0), 11.0);
    }

    #[test]
    fn test_max_relative_drift() {
        assert_eq!(max_relative_drift(&[2.0, 2.5, 1.0, 2.0]), 0.5);
        assert_eq!(max_relative_drift(&[]), 0.0);
        assert_eq!(max_relative_drift(&[0.0, 0.25]), 0.25);
    }
}
