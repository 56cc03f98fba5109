//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, parallel force pass, collision mode
//! - [`ParametersConfig`] – step size, run length, report cadence, constants
//! - [`BodyConfig`]       – initial state for each body (manual input)
//! - [`RandomConfig`]     – bounds for randomly generated bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "euler"     # or "verlet"
//!   parallel: false         # rayon force pass
//!   collision:
//!     mode: "exact"         # or mode: "threshold" with distance: 1.0e6
//!   compact_absorbed: false
//!
//! parameters:
//!   dt: 1.0                 # step size (s)
//!   max_time: 100.0         # total simulated time (s)
//!   report_interval: 10.0   # simulated time between reports (s)
//!   G: 6.67408e-11          # optional gravitational constant
//!   seed: 42                # optional seed for random bodies
//!
//! units: "si"               # or "astro": parsec, km/s, solar mass
//!
//! bodies:
//!   - x: [ -5.0e6, 0.0, 0.0 ]
//!     v: [  0.0, 0.0, 0.0 ]
//!     m: 5.972e24
//!   - x: [  5.0e6, 0.0, 0.0 ]
//!     v: [  0.0, 0.0, 0.0 ]
//!     m: 5.972e24
//! ```
//!
//! Instead of `bodies`, a `random` block generates `count` bodies with
//! uniform `[min, max)` position, velocity and mass.
//!
//! The engine then maps this configuration into its runtime scenario.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::units::UnitSystem;

/// Which integrator the engine uses
/// `integrator: "euler"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // Semi-implicit Euler. Symplectic, one force evaluation per step
    #[default]
    Euler,

    #[serde(rename = "verlet")] // Velocity Verlet. Symplectic, second order, two force evaluations
    Verlet,
}

/// Merge trigger
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CollisionConfig {
    #[default]
    Exact, // bit-identical positions
    Threshold { distance: f64 }, // separation <= distance (m)
}

/// Engine configuration
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // Time integrator used for advancing the system state
    pub parallel: bool, // `true` - split the force pass across threads
    pub collision: CollisionConfig, // When two bodies merge
    pub compact_absorbed: bool, // `true` - remove merged-away bodies instead of keeping them at mass 0
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,              // time step size
    pub max_time: f64,        // time end
    pub report_interval: f64, // time between reports
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default)]
    pub seed: Option<u64>, // deterministic seed to make random runs reproducible
}

fn default_g() -> f64 {
    crate::simulation::params::G
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position vector `x` in scenario units
    pub v: Vec<f64>, // Initial velocity vector `v` in scenario units
    pub m: f64,      // Mass of the body in scenario units
}

/// Bounds for randomly generated bodies, each as `[min, max]`
#[derive(Deserialize, Debug, Clone)]
pub struct RandomConfig {
    pub count: usize,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub mass: [f64; 2],
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    #[serde(default)]
    pub units: UnitSystem, // Units of `bodies` / `random` and of written positions
    #[serde(default)]
    pub bodies: Option<Vec<BodyConfig>>, // Manually specified initial state
    #[serde(default)]
    pub random: Option<RandomConfig>, // Randomly generated initial state
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manual_scenario_with_defaults() {
        let yaml = r#"
parameters:
  dt: 1.0
  max_time: 100.0
  report_interval: 10.0
bodies:
  - x: [-5.0e6, 0.0, 0.0]
    v: [0.0, 0.0, 0.0]
    m: 5.972e24
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(cfg.engine.integrator, IntegratorConfig::Euler);
        assert_eq!(cfg.engine.collision, CollisionConfig::Exact);
        assert!(!cfg.engine.parallel);
        assert_eq!(cfg.units, UnitSystem::Si);
        assert_eq!(cfg.parameters.g, 6.67408e-11);
        assert!(cfg.parameters.seed.is_none());
        assert!(cfg.random.is_none());

        let bodies = cfg.bodies.unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].x, vec![-5.0e6, 0.0, 0.0]);
        assert_eq!(bodies[0].m, 5.972e24);
    }

    #[test]
    fn parses_engine_and_random_block() {
        let yaml = r#"
engine:
  integrator: "verlet"
  parallel: true
  collision:
    mode: "threshold"
    distance: 1.0e6
  compact_absorbed: true
parameters:
  dt: 0.5
  max_time: 10.0
  report_interval: 2.0
  G: 1.0
  seed: 42
units: "astro"
random:
  count: 20
  position: [-1.0, 1.0]
  velocity: [-2.0, 2.0]
  mass: [0.5, 5.0]
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(cfg.engine.integrator, IntegratorConfig::Verlet);
        assert!(cfg.engine.parallel);
        assert!(cfg.engine.compact_absorbed);
        assert_eq!(cfg.engine.collision, CollisionConfig::Threshold { distance: 1.0e6 });
        assert_eq!(cfg.parameters.g, 1.0);
        assert_eq!(cfg.parameters.seed, Some(42));
        assert_eq!(cfg.units, UnitSystem::Astro);

        let random = cfg.random.unwrap();
        assert_eq!(random.count, 20);
        assert_eq!(random.mass, [0.5, 5.0]);
    }

    #[test]
    fn missing_parameters_is_an_error() {
        let yaml = "bodies: []\n";
        assert!(ScenarioConfig::from_yaml_str(yaml).is_err());
    }
}
