//! Core state types for the N-body simulation.
//!
//! - `NVec3` is the 3D vector used for positions, velocities and accelerations
//! - `Body` is a point mass in SI units
//! - `System` holds the list of bodies and the current simulation time `t`

use nalgebra::Vector3;
use rand::Rng;

pub type NVec3 = Vector3<f64>;

/// Uniform `[min, max)` bounds for generating random initial conditions.
/// Position and velocity bounds apply to each axis independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomBounds {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub mass: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: NVec3, // meters
    pub velocity: NVec3, // meters / second
    pub mass: f64,       // kilograms
    pub absorbed: bool,  // merged into another body, mass is 0
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64,            // time
}

/// Draw a value uniformly from `[min, max)`. Degenerate bounds yield `min`.
pub fn random_scalar<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Vector with each axis drawn from `[min, max)`.
pub fn random_vector<R: Rng>(rng: &mut R, min: f64, max: f64) -> NVec3 {
    NVec3::new(
        random_scalar(rng, min, max),
        random_scalar(rng, min, max),
        random_scalar(rng, min, max),
    )
}

impl Body {
    pub fn new(position: NVec3, velocity: NVec3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            absorbed: false,
        }
    }

    /// Body at rest at the origin with no mass, ready for [`Body::randomize`].
    pub fn empty() -> Self {
        Self::new(NVec3::zeros(), NVec3::zeros(), 0.0)
    }

    /// Overwrite position, velocity and mass with uniform random values.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, bounds: &RandomBounds) {
        self.position = random_vector(rng, bounds.position[0], bounds.position[1]);
        self.velocity = random_vector(rng, bounds.velocity[0], bounds.velocity[1]);
        self.mass = random_scalar(rng, bounds.mass[0], bounds.mass[1]);
        self.absorbed = false;
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }

    /// Exact component-wise position equality.
    pub fn coincides_with(&self, other: &Body) -> bool {
        self.position == other.position
    }
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }
}

/// Total linear momentum `Σ m v`.
pub fn total_momentum(bodies: &[Body]) -> NVec3 {
    bodies
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.momentum())
}

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}
