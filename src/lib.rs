pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod output;
pub mod error;
pub mod logging;

pub use simulation::states::{Body, System, NVec3, RandomBounds, total_momentum, total_mass};
pub use simulation::params::{Parameters, G};
pub use simulation::engine::{Engine, Integrator};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::{euler_step, verlet_step};
pub use simulation::collisions::{CollisionMode, Merge, resolve_collisions};
pub use simulation::units::UnitSystem;
pub use simulation::scenario::Scenario;
pub use simulation::simulator::{Simulator, Report, ReportSink, RunState, RunSummary};

pub use configuration::config::{IntegratorConfig, CollisionConfig, EngineConfig, ParametersConfig, BodyConfig, RandomConfig, ScenarioConfig};

pub use output::PositionWriter;
pub use error::{SimError, Result};

pub use benchmark::benchmark::{bench_gravity, bench_step, bench_step_curve};
