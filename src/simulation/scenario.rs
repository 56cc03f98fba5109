//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0, in SI)
//! - active force set (`AccelSet`)
//! - the unit system used to display positions

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{
    BodyConfig, CollisionConfig, IntegratorConfig, RandomConfig, ScenarioConfig,
};
use crate::error::{Result, SimError};
use crate::simulation::collisions::CollisionMode;
use crate::simulation::engine::{Engine, Integrator};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, RandomBounds, System};
use crate::simulation::units::UnitSystem;

/// Fully-initialized simulation: the runtime bundle consumed by
/// [`Simulator`](crate::simulation::simulator::Simulator)
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub units: UnitSystem,
}

impl Scenario {
    /// Bundle SI bodies with default engine settings and direct gravity.
    pub fn new(bodies: Vec<Body>, parameters: Parameters) -> Self {
        Self::with_engine(bodies, parameters, Engine::default())
    }

    pub fn with_engine(bodies: Vec<Body>, parameters: Parameters, engine: Engine) -> Self {
        let forces = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            parallel: engine.parallel,
        });

        Self {
            engine,
            parameters,
            system: System::new(bodies),
            forces,
            units: UnitSystem::Si,
        }
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            max_time: p_cfg.max_time,
            report_interval: p_cfg.report_interval,
            g: p_cfg.g,
            seed: p_cfg.seed,
        };

        let e_cfg = cfg.engine;
        let engine = Engine {
            integrator: match e_cfg.integrator {
                IntegratorConfig::Euler => Integrator::Euler,
                IntegratorConfig::Verlet => Integrator::Verlet,
            },
            parallel: e_cfg.parallel,
            collision: match e_cfg.collision {
                CollisionConfig::Exact => CollisionMode::Exact,
                CollisionConfig::Threshold { distance } => CollisionMode::Threshold(distance),
            },
            compact_absorbed: e_cfg.compact_absorbed,
        };

        let bodies = match (cfg.bodies, cfg.random) {
            (Some(list), None) => manual_bodies(&list, cfg.units)?,
            (None, Some(random)) => random_bodies(&random, cfg.units, parameters.seed)?,
            (Some(_), Some(_)) => {
                return Err(SimError::InvalidScenario(
                    "give either `bodies` or `random`, not both".into(),
                ))
            }
            (None, None) => {
                return Err(SimError::InvalidScenario(
                    "one of `bodies` or `random` is required".into(),
                ))
            }
        };

        let mut scenario = Self::with_engine(bodies, parameters, engine);
        scenario.units = cfg.units;
        Ok(scenario)
    }
}

fn vec3(values: &[f64], field: &str, index: usize) -> Result<NVec3> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidScenario(format!(
            "body {index}: `{field}` needs 3 components, got {}",
            values.len()
        ))),
    }
}

fn manual_bodies(list: &[BodyConfig], units: UnitSystem) -> Result<Vec<Body>> {
    list.iter()
        .enumerate()
        .map(|(i, bc)| {
            let x = vec3(&bc.x, "x", i)?;
            let v = vec3(&bc.v, "v", i)?;
            Ok(units.body(x, v, bc.m))
        })
        .collect()
}

fn check_range(range: [f64; 2], name: &str) -> Result<()> {
    if !(range[0].is_finite() && range[1].is_finite()) || range[0] > range[1] {
        return Err(SimError::InvalidScenario(format!(
            "random `{name}` bounds must be finite with min <= max, got {range:?}"
        )));
    }
    Ok(())
}

fn random_bodies(cfg: &RandomConfig, units: UnitSystem, seed: Option<u64>) -> Result<Vec<Body>> {
    check_range(cfg.position, "position")?;
    check_range(cfg.velocity, "velocity")?;
    check_range(cfg.mass, "mass")?;
    if cfg.mass[0] < 0.0 {
        return Err(SimError::InvalidScenario(format!(
            "random mass bounds must be non-negative, got {:?}",
            cfg.mass
        )));
    }

    let bounds = units.bounds_to_si(RandomBounds {
        position: cfg.position,
        velocity: cfg.velocity,
        mass: cfg.mass,
    });

    let seed = seed.unwrap_or_else(rand::random);
    info!("generating {} random bodies with seed {seed}", cfg.count);
    let mut rng = StdRng::seed_from_u64(seed);

    let bodies = (0..cfg.count)
        .map(|_| {
            let mut b = Body::empty();
            b.randomize(&mut rng, &bounds);
            b
        })
        .collect();
    Ok(bodies)
}
