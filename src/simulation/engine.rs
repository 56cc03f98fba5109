//! High-level runtime engine settings
//!
//! Selects integrator, parallel force pass, collision mode and
//! compaction used when building and running a `Scenario`

use crate::simulation::collisions::CollisionMode;

/// Time-stepping scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Semi-implicit (symplectic) Euler: kick with a_n, then drift with v_n+1
    #[default]
    Euler,
    /// Velocity Verlet: kick half, drift, kick half. Two force evaluations per step
    Verlet,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub integrator: Integrator,    // euler or verlet
    pub parallel: bool,            // false = serial force pass, true = rayon over bodies
    pub collision: CollisionMode,  // merge trigger
    pub compact_absorbed: bool,    // drop merged-away bodies after each step
}
