// src/config/parameters.rs

use serde::{Deserialize, Serialize};

use crate::math::error::IntegrationError;

/// 1回の実行で確保する格子点数の上限
pub const MAX_STEPS: usize = 100_000_000;

/// 1回の実行で使う物理・数値パラメータ
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub x0: f64,         // 初期変位 (m)
    pub v0: f64,         // 初期速度 (m/s)
    pub k: f64,          // ばね定数 (N/m)
    pub m: f64,          // 質量 (kg)
    pub dt: f64,         // 時間ステップ (s)
    pub total_time: f64, // 総シミュレーション時間 (s)
}

impl SimulationParameters {
    /// k, m, dt, total_time が正の有限値であり、
    /// total_time / dt が MAX_STEPS を超えないことを確認する
    pub fn validate(&self) -> Result<(), IntegrationError> {
        let checks = [
            ("dt", self.dt),
            ("k", self.k),
            ("m", self.m),
            ("total_time", self.total_time),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(IntegrationError::InvalidParameter { name, value });
            }
        }
        let ratio = (self.total_time / self.dt).floor();
        if !(ratio.is_finite() && ratio <= MAX_STEPS as f64) {
            return Err(IntegrationError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        Ok(())
    }

    /// floor(total_time / dt)
    pub fn steps(&self) -> usize {
        (self.total_time / self.dt).floor() as usize
    }

    /// k/m
    pub fn omega_sq(&self) -> f64 {
        self.k / self.m
    }

    /// 角振動数 ω = sqrt(k/m)
    pub fn omega(&self) -> f64 {
        self.omega_sq().sqrt()
    }

    /// 周期 2π/ω
    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.omega()
    }
}
