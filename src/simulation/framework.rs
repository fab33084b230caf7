// src/simulation/framework.rs

use log::{debug, info, warn};

use crate::config::parameters::SimulationParameters;
use crate::config::scenario::{RunInstance, Scenario};
use crate::math::analytic::{cosine_reference, max_abs_error};
use crate::math::energy::{energy_series, max_relative_drift};
use crate::math::{integrate_on_grid, GridRule, IntegrationError, Scheme};
use crate::simulation::RunResult;

/// 1回の実行
pub fn execute_run(run: &RunInstance, grid: GridRule) -> Result<RunResult, IntegrationError> {
    let params = &run.parameters;
    debug!(
        "{}: scheme={} steps={} dt={} grid={:?}",
        run.name,
        run.scheme,
        params.steps(),
        params.dt,
        grid
    );

    let trajectory = integrate_on_grid(run.scheme, params, grid)?;

    let reference = run
        .reference
        .then(|| cosine_reference(params, &trajectory.t));
    let max_error = reference
        .as_ref()
        .map(|reference| max_abs_error(&trajectory.x, reference));
    let energy_drift = trajectory
        .v
        .as_ref()
        .map(|v| max_relative_drift(&energy_series(params, &trajectory.x, v)));

    info!(
        "{}: {} 点を計算 (最大誤差: {:?}, エネルギー相対ドリフト: {:?})",
        run.name,
        trajectory.len(),
        max_error,
        energy_drift
    );
    if run.scheme == Scheme::ForwardEuler && energy_drift.is_some_and(|d| d > 1.0) {
        warn!("{}: 前進Euler法のエネルギーが初期値の2倍を超えました", run.name);
    }

    Ok(RunResult {
        name: run.name.clone(),
        trajectory,
        reference,
        max_error,
        energy_drift,
    })
}

/// シナリオ全体の実行
pub fn execute_scenario(scenario: &Scenario) -> Result<Vec<RunResult>, IntegrationError> {
    info!("{} 件の実行を開始します", scenario.runs.len());
    scenario
        .runs
        .iter()
        .map(|run| execute_run(run, scenario.grid))
        .collect()
}

/// すべての実行のスキームを置き換える
pub fn override_scheme(scenario: Scenario, scheme: Scheme) -> Scenario {
    Scenario {
        grid: scenario.grid,
        runs: scenario
            .runs
            .into_iter()
            .map(|run| RunInstance { scheme, ..run })
            .collect(),
    }
}

/// 単体パラメータから1件だけのシナリオを作る
pub fn single_run_scenario(
    name: &str,
    scheme: Scheme,
    parameters: SimulationParameters,
    grid: GridRule,
) -> Scenario {
    Scenario {
        grid,
        runs: vec![RunInstance {
            name: name.to_string(),
            scheme,
            parameters,
            reference: true,
        }],
    }
}
