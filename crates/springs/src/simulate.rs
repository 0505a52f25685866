//! Running scenarios and describing springs.

use hooke::{critical_damping, damped_period, period, Model, Regime, Spring};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, Scenario};

/// One loaded spring at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringSample {
    /// 1 or 2.
    pub spring: usize,
    pub displacement: f64,
    pub velocity: f64,
    /// Height of the mass (m).
    pub position: f64,
    pub kinetic: f64,
    /// Gravitational plus elastic potential energy (J).
    pub potential: f64,
    pub thermal: f64,
    pub total: f64,
}

impl SpringSample {
    fn of(index: usize, spring: &Spring) -> Option<Self> {
        let mass = spring.mass()?;
        let energy = spring.energy();
        Some(Self {
            spring: index + 1,
            displacement: spring.displacement(),
            velocity: mass.velocity,
            position: mass.position,
            kinetic: energy.kinetic,
            potential: energy.gravitational_potential + energy.elastic_potential,
            thermal: energy.thermal,
            total: energy.total(),
        })
    }
}

/// Every loaded spring at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Simulated time (s).
    pub time: f64,
    pub springs: Vec<SpringSample>,
}

impl Sample {
    fn of(model: &Model) -> Self {
        Self {
            time: model.elapsed(),
            springs: model
                .springs()
                .iter()
                .enumerate()
                .filter_map(|(index, spring)| SpringSample::of(index, spring))
                .collect(),
        }
    }
}

/// The printed samples of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    /// Planet the run took place on.
    pub body: String,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    pub dt: f64,
    pub samples: Vec<Sample>,
}

/// Runs `scenario`, sampling the start, every `every`th step and the final
/// step.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the scenario is invalid.
pub fn run(scenario: &Scenario) -> Result<Trajectory, ConfigError> {
    let mut model = scenario.build_model()?;
    let steps = scenario.steps();
    info!(
        body = %model.body(),
        dt = scenario.dt,
        steps,
        "running scenario"
    );

    let mut samples = vec![Sample::of(&model)];
    for step in 1..=steps {
        model.step(scenario.dt);
        if step % scenario.every == 0 || step == steps {
            samples.push(Sample::of(&model));
        }
    }
    debug!(samples = samples.len(), elapsed = model.elapsed(), "run finished");

    Ok(Trajectory {
        body: model.body().to_string(),
        gravity: model.body().gravity(),
        dt: scenario.dt,
        samples,
    })
}

/// Characteristic values of one loaded spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub spring: usize,
    pub regime: Regime,
    pub spring_constant: f64,
    pub mass: f64,
    pub damping: f64,
    /// `2·sqrt(km)` (N·s/m).
    pub critical_damping: f64,
    /// `−mg/k` (m).
    pub equilibrium_displacement: f64,
    /// Undamped period (s).
    pub period: f64,
    /// Period of the decaying oscillation; `None` unless under-damped.
    pub damped_period: Option<f64>,
}

/// Classifies every loaded spring in `scenario`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the scenario is invalid.
pub fn classify(scenario: &Scenario) -> Result<Vec<Classification>, ConfigError> {
    let model = scenario.build_model()?;
    Ok(model
        .springs()
        .iter()
        .enumerate()
        .filter_map(|(index, spring)| {
            let state = spring.state()?;
            let (k, m, c) = (state.spring_constant, state.mass, state.damping_coefficient);
            Some(Classification {
                spring: index + 1,
                regime: state.regime(),
                spring_constant: k,
                mass: m,
                damping: c,
                critical_damping: critical_damping(k, m),
                equilibrium_displacement: state.equilibrium_displacement(),
                period: period(k, m),
                damped_period: damped_period(k, m, c),
            })
        })
        .collect())
}
