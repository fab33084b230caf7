// src/math/error.rs

use thiserror::Error;

use crate::math::integrator::Scheme;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("パラメータ `{name}` が不正です: 正の有限値で、ステップ数が上限以内である必要があります (値: {value})")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("{scheme} には {required} ステップ以上が必要です (ステップ数: {steps})")]
    InsufficientSteps {
        scheme: Scheme,
        steps: usize,
        required: usize,
    },
}
