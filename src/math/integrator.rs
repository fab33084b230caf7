// src/math/integrator.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::parameters::SimulationParameters;
use crate::math::error::IntegrationError;
use crate::math::time_grid::{GridRule, TimeGrid};

/// 積分スキームの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    ForwardEuler,
    SemiImplicitEuler,
    StormerVerlet,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [
        Scheme::ForwardEuler,
        Scheme::SemiImplicitEuler,
        Scheme::StormerVerlet,
    ];

    /// 実行に必要な最小ステップ数
    pub fn min_steps(self) -> usize {
        match self {
            Scheme::StormerVerlet => 2,
            Scheme::ForwardEuler | Scheme::SemiImplicitEuler => 1,
        }
    }

    /// 速度を追跡するかどうか
    pub fn tracks_velocity(self) -> bool {
        !matches!(self, Scheme::StormerVerlet)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::ForwardEuler => "forward_euler",
            Scheme::SemiImplicitEuler => "semi_implicit_euler",
            Scheme::StormerVerlet => "stormer_verlet",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| format!("未知の積分スキーム: {}", s))
    }
}

/// 位置と速度の組
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub x: f64, // 変位 (m)
    pub v: f64, // 速度 (m/s)
}

/// 前進Euler法による1ステップ
///
/// 位置の更新には更新前の速度を使う。
///
/// # 引数
/// - `state`: 現在の状態
/// - `omega_sq`: k/m
/// - `dt`: 時間ステップ
///
/// # 戻り値
/// - 次の状態
pub fn forward_euler(state: PhaseState, omega_sq: f64, dt: f64) -> PhaseState {
    PhaseState {
        x: state.x + state.v * dt,
        v: state.v - omega_sq * state.x * dt,
    }
}

/// 半陰的Euler法による1ステップ
///
/// 速度を先に更新し、更新後の速度で位置を進める。
pub fn semi_implicit_euler(state: PhaseState, omega_sq: f64, dt: f64) -> PhaseState {
    let a = -omega_sq * state.x;
    let v = state.v + a * dt;
    PhaseState { x: state.x + v * dt, v }
}

/// Störmer–Verlet法の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerletState {
    pub previous: Option<f64>, // 1ステップ前の変位
    pub current: f64,
    pub initial_velocity: f64, // 初回ステップにのみ使用
}

impl VerletState {
    pub fn new(x0: f64, v0: f64) -> Self {
        VerletState {
            previous: None,
            current: x0,
            initial_velocity: v0,
        }
    }
}

/// Störmer–Verlet法による1ステップ
///
/// # 引数
/// - `state`: 現在の積分器の状態
/// - `omega_sq`: k/m
/// - `dt`: 時間ステップ
///
/// # 戻り値
/// - 更新後の積分器の状態
pub fn stormer_verlet(state: VerletState, omega_sq: f64, dt: f64) -> VerletState {
    let next = match state.previous {
        Some(previous) => {
            2.0 * state.current - previous - omega_sq * state.current * (dt * dt)
        }
        // 初回ステップではEuler法で計算
        None => state.current + state.initial_velocity * dt,
    };
    VerletState {
        previous: Some(state.current),
        current: next,
        initial_velocity: state.initial_velocity,
    }
}

/// 1ステップ進める能力
pub trait Stepper {
    fn advance(&mut self, omega_sq: f64, dt: f64);
    fn position(&self) -> f64;
    /// 速度を追跡しないスキームでは `None`
    fn velocity(&self) -> Option<f64>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy)]
pub struct ForwardEuler(pub PhaseState);

#[derive(Debug, Clone, Copy)]
pub struct SemiImplicitEuler(pub PhaseState);

#[derive(Debug, Clone, Copy)]
pub struct StormerVerlet(pub VerletState);

impl Stepper for ForwardEuler {
    fn advance(&mut self, omega_sq: f64, dt: f64) {
        self.0 = forward_euler(self.0, omega_sq, dt);
    }

    fn position(&self) -> f64 {
        self.0.x
    }

    fn velocity(&self) -> Option<f64> {
        Some(self.0.v)
    }

    fn name(&self) -> &'static str {
        Scheme::ForwardEuler.name()
    }
}

impl Stepper for SemiImplicitEuler {
    fn advance(&mut self, omega_sq: f64, dt: f64) {
        self.0 = semi_implicit_euler(self.0, omega_sq, dt);
    }

    fn position(&self) -> f64 {
        self.0.x
    }

    fn velocity(&self) -> Option<f64> {
        Some(self.0.v)
    }

    fn name(&self) -> &'static str {
        Scheme::SemiImplicitEuler.name()
    }
}

impl Stepper for StormerVerlet {
    fn advance(&mut self, omega_sq: f64, dt: f64) {
        self.0 = stormer_verlet(self.0, omega_sq, dt);
    }

    fn position(&self) -> f64 {
        self.0.current
    }

    fn velocity(&self) -> Option<f64> {
        None
    }

    fn name(&self) -> &'static str {
        Scheme::StormerVerlet.name()
    }
}

/// 1回の積分結果
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub scheme: Scheme,
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub v: Option<Vec<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// 固定幅の時間格子で積分する
pub fn integrate(
    scheme: Scheme,
    params: &SimulationParameters,
) -> Result<Trajectory, IntegrationError> {
    integrate_on_grid(scheme, params, GridRule::Uniform)
}

/// 指定した格子規則で積分する
///
/// # 戻り値
/// - 時刻・変位・(速度) の列。長さはいずれも floor(total_time / dt)
pub fn integrate_on_grid(
    scheme: Scheme,
    params: &SimulationParameters,
    rule: GridRule,
) -> Result<Trajectory, IntegrationError> {
    params.validate()?;

    let steps = params.steps();
    if steps < scheme.min_steps() {
        return Err(IntegrationError::InsufficientSteps {
            scheme,
            steps,
            required: scheme.min_steps(),
        });
    }

    let grid = TimeGrid::build(steps, params.dt, params.total_time, rule);
    let initial = PhaseState {
        x: params.x0,
        v: params.v0,
    };
    let omega_sq = params.omega_sq();

    let (x, v) = match scheme {
        Scheme::ForwardEuler => record(ForwardEuler(initial), steps, omega_sq, params.dt),
        Scheme::SemiImplicitEuler => {
            record(SemiImplicitEuler(initial), steps, omega_sq, params.dt)
        }
        Scheme::StormerVerlet => record(
            StormerVerlet(VerletState::new(params.x0, params.v0)),
            steps,
            omega_sq,
            params.dt,
        ),
    };

    Ok(Trajectory {
        scheme,
        t: grid.into_times(),
        x,
        v,
    })
}

/// 現在の状態を記録してから1ステップ進める、を繰り返す
fn record<S: Stepper>(
    mut stepper: S,
    steps: usize,
    omega_sq: f64,
    dt: f64,
) -> (Vec<f64>, Option<Vec<f64>>) {
    log::trace!("{}: {} ステップを記録", stepper.name(), steps);
    let mut x = Vec::with_capacity(steps);
    let mut v = stepper.velocity().map(|_| Vec::with_capacity(steps));

    for i in 0..steps {
        if i > 0 {
            stepper.advance(omega_sq, dt);
        }
        x.push(stepper.position());
        if let (Some(v), Some(velocity)) = (v.as_mut(), stepper.velocity()) {
            v.push(velocity);
        }
    }

    (x, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::energy::energy_series;

    fn params(x0: f64, v0: f64, dt: f64, total_time: f64) -> SimulationParameters {
        SimulationParameters {
            x0,
            v0,
            k: 1.0,
            m: 1.0,
            dt,
            total_time,
        }
    }

    /// test_forward_euler_uses_previous_velocity
    /// 位置の更新に更新前の速度が使われることを確認します。
    #[test]
    fn test_forward_euler_uses_previous_velocity() {
        let next = forward_euler(PhaseState { x: 1.0, v: 2.0 }, 4.0, 0.5);
        // x = 1 + 2*0.5 = 2.0, v = 2 - 4*1*0.5 = 0.0
        assert_eq!(next, PhaseState { x: 2.0, v: 0.0 });
    }

    /// test_semi_implicit_euler_uses_updated_velocity
    /// 速度を先に更新し、その速度で位置を進めることを確認します。
    #[test]
    fn test_semi_implicit_euler_uses_updated_velocity() {
        let next = semi_implicit_euler(PhaseState { x: 1.0, v: 2.0 }, 4.0, 0.5);
        // a = -4, v = 2 - 2 = 0.0, x = 1 + 0*0.5 = 1.0
        assert_eq!(next, PhaseState { x: 1.0, v: 0.0 });
    }

    /// test_stormer_verlet_seed_and_recurrence
    /// 初回はEuler法、2回目以降は2点漸化式で計算されることを確認します。
    #[test]
    fn test_stormer_verlet_seed_and_recurrence() {
        let seeded = stormer_verlet(VerletState::new(1.0, 2.0), 1.0, 0.1);
        assert_eq!(seeded.previous, Some(1.0));
        assert_eq!(seeded.current, 1.0 + 2.0 * 0.1);

        let next = stormer_verlet(seeded, 1.0, 0.1);
        let expected = 2.0 * 1.2 - 1.0 - 1.2 * (0.1 * 0.1);
        assert_eq!(next.previous, Some(seeded.current));
        assert!((next.current - expected).abs() < 1e-15);
    }

    #[test]
    fn test_lengths_match_step_count() {
        let p = params(1.0, 0.5, 0.01, 10.0);
        for scheme in Scheme::ALL {
            let traj = integrate(scheme, &p).unwrap();
            assert_eq!(traj.t.len(), p.steps());
            assert_eq!(traj.x.len(), p.steps());
            match traj.v {
                Some(ref v) => {
                    assert!(scheme.tracks_velocity());
                    assert_eq!(v.len(), p.steps());
                }
                None => assert_eq!(scheme, Scheme::StormerVerlet),
            }
        }
    }

    #[test]
    fn test_euler_initial_state_is_exact() {
        let p = params(0.3, -0.7, 0.01, 1.0);
        for scheme in [Scheme::ForwardEuler, Scheme::SemiImplicitEuler] {
            let traj = integrate(scheme, &p).unwrap();
            assert_eq!(traj.x[0], 0.3);
            assert_eq!(traj.v.unwrap()[0], -0.7);
        }
    }

    #[test]
    fn test_verlet_seed_is_exact() {
        let p = params(0.3, -0.7, 0.01, 1.0);
        let traj = integrate(Scheme::StormerVerlet, &p).unwrap();
        assert_eq!(traj.x[0], 0.3);
        assert_eq!(traj.x[1], 0.3 + -0.7 * 0.01);
    }

    /// test_forward_euler_first_steps
    /// x0=0, v0=1 では最初の加速度項がゼロになり、v[1] = 1.0、x[1] = 0.01 となります。
    #[test]
    fn test_forward_euler_first_steps() {
        let traj = integrate(Scheme::ForwardEuler, &params(0.0, 1.0, 0.01, 10.0)).unwrap();
        let v = traj.v.unwrap();
        assert_eq!(traj.t[0], 0.0);
        assert_eq!(traj.x[0], 0.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 1.0);
        assert_eq!(traj.x[1], 0.01);
    }

    #[test]
    fn test_semi_implicit_energy_stays_bounded() {
        // 10周期 (2π*10 ≈ 62.8 s)
        let p = params(1.0, 0.0, 0.01, 63.0);
        let traj = integrate(Scheme::SemiImplicitEuler, &p).unwrap();
        let energy = energy_series(&p, &traj.x, traj.v.as_deref().unwrap());
        let e0 = energy[0];
        for e in &energy {
            assert!((e - e0).abs() / e0 < 0.01);
        }
    }

    #[test]
    fn test_forward_euler_energy_grows_every_step() {
        let p = params(1.0, 0.0, 0.01, 63.0);
        let traj = integrate(Scheme::ForwardEuler, &p).unwrap();
        let energy = energy_series(&p, &traj.x, traj.v.as_deref().unwrap());
        for pair in energy.windows(2) {
            assert!(pair[1] > pair[0]);
            // 1ステップあたり (1 + dt²) 倍
            assert!((pair[1] / pair[0] - (1.0 + 0.01 * 0.01)).abs() < 1e-9);
        }
        assert!(energy[energy.len() - 1] > 1.8 * energy[0]);
    }

    #[test]
    fn test_verlet_tracks_cosine() {
        let p = params(1.0, 0.0, 0.01, 10.0);
        let traj = integrate(Scheme::StormerVerlet, &p).unwrap();
        for (t, x) in traj.t.iter().zip(traj.x.iter()) {
            assert!((x - t.cos()).abs() < 1e-2);
        }
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let base = params(1.0, 0.0, 0.01, 10.0);
        let cases = [
            ("dt", SimulationParameters { dt: 0.0, ..base }),
            ("k", SimulationParameters { k: -1.0, ..base }),
            ("m", SimulationParameters { m: 0.0, ..base }),
            ("total_time", SimulationParameters { total_time: -5.0, ..base }),
        ];
        for (name, p) in cases {
            for scheme in Scheme::ALL {
                match integrate(scheme, &p) {
                    Err(IntegrationError::InvalidParameter { name: n, .. }) => assert_eq!(n, name),
                    other => panic!("{} で InvalidParameter が期待されましたが {:?}", name, other),
                }
            }
        }
    }

    #[test]
    fn test_verlet_needs_two_steps() {
        let p = params(1.0, 0.0, 0.1, 0.01);
        let err = integrate(Scheme::StormerVerlet, &p).unwrap_err();
        assert_eq!(
            err,
            IntegrationError::InsufficientSteps {
                scheme: Scheme::StormerVerlet,
                steps: 0,
                required: 2,
            }
        );

        // 1ステップでも不足
        let p = params(1.0, 0.0, 0.1, 0.15);
        assert!(integrate(Scheme::StormerVerlet, &p).is_err());
        assert_eq!(integrate(Scheme::ForwardEuler, &p).unwrap().x, vec![1.0]);
    }

    /// test_huge_step_count_is_rejected
    /// 格子点数が大きすぎる場合、配列を確保せずにエラーを返すことを確認します。
    #[test]
    fn test_huge_step_count_is_rejected() {
        let p = params(1.0, 0.0, 1e-10, 1e10);
        for scheme in Scheme::ALL {
            assert!(matches!(
                integrate(scheme, &p),
                Err(IntegrationError::InvalidParameter { name: "dt", .. })
            ));
        }
    }

    #[test]
    fn test_stepper_names_match_schemes() {
        let initial = PhaseState { x: 1.0, v: 0.0 };
        assert_eq!(ForwardEuler(initial).name(), "forward_euler");
        assert_eq!(SemiImplicitEuler(initial).name(), "semi_implicit_euler");
        assert_eq!(StormerVerlet(VerletState::new(1.0, 0.0)).name(), "stormer_verlet");
    }

    #[test]
    fn test_euler_with_zero_steps_is_rejected() {
        let p = params(1.0, 0.0, 0.1, 0.01);
        assert!(matches!(
            integrate(Scheme::SemiImplicitEuler, &p),
            Err(IntegrationError::InsufficientSteps { required: 1, .. })
        ));
    }

    #[test]
    fn test_scheme_parses_from_name() {
        for scheme in Scheme::ALL {
            assert_eq!(scheme.name().parse::<Scheme>().unwrap(), scheme);
        }
        assert!("rk4".parse::<Scheme>().is_err());
    }
}
