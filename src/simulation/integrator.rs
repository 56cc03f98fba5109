//! Fixed-step time integrators for the N-body system
//!
//! Both steppers read the current `System` only and write the next state
//! into a separate buffer. The caller swaps the buffers afterwards, so no
//! body ever sees a peer that was already advanced in the same step.

use super::engine::Integrator;
use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{Body, NVec3, System};

/// Compute the next state of `sys` into `next` with the chosen scheme.
pub fn integrate(
    integrator: Integrator,
    sys: &System,
    forces: &AccelSet,
    params: &Parameters,
    next: &mut Vec<Body>,
) {
    match integrator {
        Integrator::Euler => euler_step(sys, forces, params, next),
        Integrator::Verlet => verlet_step(sys, forces, params, next),
    }
}

/// Semi-implicit Euler:
/// v_n+1 = v_n + dt * a_n
/// x_n+1 = x_n + dt * v_n+1
pub fn euler_step(sys: &System, forces: &AccelSet, params: &Parameters, next: &mut Vec<Body>) {
    let n = sys.bodies.len();
    next.clear();
    if n == 0 {
        return;
    }
    let dt = params.dt;

    // a_n for every body from the untouched snapshot
    let mut acc = vec![NVec3::zeros(); n];
    forces.accumulate_accels(sys.t, &sys.bodies, &mut acc);

    next.extend(sys.bodies.iter().zip(acc.iter()).map(|(b, a)| {
        let velocity = b.velocity + a * dt;
        let position = b.position + velocity * dt;
        Body {
            position,
            velocity,
            ..b.clone()
        }
    }));
}

/// Velocity Verlet (kick-drift-kick) with two force evaluations per step.
pub fn verlet_step(sys: &System, forces: &AccelSet, params: &Parameters, next: &mut Vec<Body>) {
    let n = sys.bodies.len();
    next.clear();
    if n == 0 {
        return;
    }
    let dt = params.dt; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2

    // a_n from x_n at time t_n
    let mut a_old = vec![NVec3::zeros(); n];
    forces.accumulate_accels(sys.t, &sys.bodies, &mut a_old);

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    // Drift: x_n+1 = x_n + dt * v_n+1/2
    next.extend(sys.bodies.iter().zip(a_old.iter()).map(|(b, a)| {
        let velocity = b.velocity + a * half_dt;
        let position = b.position + velocity * dt;
        Body {
            position,
            velocity,
            ..b.clone()
        }
    }));

    // a_n+1 from the fully drifted buffer at t_n+1
    let mut a_new = vec![NVec3::zeros(); n];
    forces.accumulate_accels(sys.t + dt, &next[..], &mut a_new);

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in next.iter_mut().zip(a_new.iter()) {
        b.velocity += a * half_dt;
    }
}
