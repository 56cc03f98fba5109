//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums its terms, and
//! direct Newtonian gravity (serial or rayon-parallel)

use rayon::prelude::*;

use crate::simulation::states::{Body, NVec3};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - `bodies` is only read, so every entry of `out` comes from the same snapshot
    pub fn accumulate_accels(&self, t: f64, bodies: &[Body], out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(t, bodies, out);
        }
    }
}

/// Acceleration source operating on a body snapshot.
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, bodies: &[Body], out: &mut [NVec3]);
}

/// Newtonian point-mass gravity, direct O(n^2) sum, no softening.
///
/// Pairs at exactly zero separation and massless sources are skipped,
/// so a merged pair (survivor and its absorbed partner share a position)
/// does not poison the survivor with `0 * inf`.
pub struct NewtonianGravity {
    pub g: f64,         // gravitational constant
    pub parallel: bool, // split the outer loop across the rayon pool
}

impl NewtonianGravity {
    /// Net gravitational acceleration on body `j` from every other body.
    ///
    /// The sum runs over `i` in index order regardless of `parallel`,
    /// so serial and parallel passes give bit-identical results.
    pub fn accel_on(&self, j: usize, bodies: &[Body]) -> NVec3 {
        let xj = bodies[j].position;

        // sum of G m_i (x_j - x_i) / |x_j - x_i|^3, points away from the sources
        let mut sum = NVec3::zeros();
        for (i, bi) in bodies.iter().enumerate() {
            if i == j || bi.mass == 0.0 {
                continue;
            }

            let disp = xj - bi.position;
            let r = disp.norm();
            if r == 0.0 {
                continue;
            }

            let scalar = self.g * bi.mass / (r * r * r);
            sum += disp * scalar;
        }

        // attraction
        -sum
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, bodies: &[Body], out: &mut [NVec3]) {
        if bodies.is_empty() {
            return;
        }

        if self.parallel {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(j, a)| *a += self.accel_on(j, bodies));
        } else {
            for (j, a) in out.iter_mut().enumerate() {
                *a += self.accel_on(j, bodies);
            }
        }
    }
}
