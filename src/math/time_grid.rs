// src/math/time_grid.rs

use serde::{Deserialize, Serialize};

/// 時間格子の構成規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridRule {
    /// t[i] = i * dt。終端は total_time に一致するとは限らない
    #[default]
    Uniform,
    /// 0 から total_time まで (終端を含む) の等間隔
    Endpoint,
}

/// 1回の実行で使う時刻列
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// 時間格子の構築
    ///
    /// # 引数
    /// - `steps`: 格子点数
    /// - `dt`: 時間ステップ
    /// - `total_time`: 総シミュレーション時間
    /// - `rule`: 構成規則
    pub fn build(steps: usize, dt: f64, total_time: f64, rule: GridRule) -> Self {
        let times = match rule {
            GridRule::Uniform => (0..steps).map(|i| i as f64 * dt).collect(),
            GridRule::Endpoint => match steps {
                0 => Vec::new(),
                1 => vec![0.0],
                _ => {
                    let last = (steps - 1) as f64;
                    (0..steps)
                        .map(|i| {
                            if i == steps - 1 {
                                total_time
                            } else {
                                total_time * (i as f64 / last)
                            }
                        })
                        .collect()
                }
            },
        };
        TimeGrid { times }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn into_times(self) -> Vec<f64> {
        self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
