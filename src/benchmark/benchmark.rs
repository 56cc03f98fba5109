use std::time::Instant;

use crate::simulation::engine::{Engine, Integrator};
use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::params::{Parameters, G};
use crate::simulation::scenario::Scenario;
use crate::simulation::simulator::Simulator;
use crate::simulation::states::{Body, NVec3};

/// Deterministic cloud of `n` bodies, no rand needed
pub fn make_bodies(n: usize) -> Vec<Body> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0e9,
                (i_f * 0.13).cos() * 5.0e9,
                (i_f * 0.07).sin() * 5.0e9,
            );
            Body::new(x, NVec3::zeros(), 1.0e24)
        })
        .collect()
}

fn make_params() -> Parameters {
    Parameters::new(1.0, 100.0, 10.0)
}

/// Time one direct force pass, serial vs rayon
pub fn bench_gravity() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let bodies = make_bodies(n);
        let mut out = vec![NVec3::zeros(); n];

        let serial = NewtonianGravity { g: G, parallel: false };
        let parallel = NewtonianGravity { g: G, parallel: true };

        // Warm up
        serial.acceleration(0.0, &bodies, &mut out);
        parallel.acceleration(0.0, &bodies, &mut out);

        let t0 = Instant::now();
        serial.acceleration(0.0, &bodies, &mut out);
        let dt_serial = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        parallel.acceleration(0.0, &bodies, &mut out);
        let dt_parallel = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s", dt_serial, dt_parallel);
    }
}

fn time_steps(n: usize, engine: Engine, steps: usize) -> f64 {
    let mut sim = Simulator::new(Scenario::with_engine(make_bodies(n), make_params(), engine));

    // Warm-up
    sim.step();

    let t0 = Instant::now();
    for _ in 0..steps {
        sim.step();
    }
    t0.elapsed().as_secs_f64() / steps as f64
}

/// Time full steps (force pass, integration, collision scan) per integrator
pub fn bench_step() {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 2;

    for n in ns {
        let euler = time_steps(n, Engine { parallel: true, ..Engine::default() }, steps);
        let verlet = time_steps(
            n,
            Engine {
                integrator: Integrator::Verlet,
                parallel: true,
                ..Engine::default()
            },
            steps,
        );

        println!("N = {:5}, euler step = {:8.6} s,   verlet step = {:8.6} s", n, euler, verlet);
    }
}

/// Serial vs parallel euler step for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,serial_ms,parallel_ms");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let serial = time_steps(n, Engine::default(), steps) * 1000.0;
        let parallel = time_steps(n, Engine { parallel: true, ..Engine::default() }, steps) * 1000.0;

        println!("{},{:.6},{:.6}", n, serial, parallel);
    }
}
