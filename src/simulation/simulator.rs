//! Time-stepping loop: Idle -> Running -> Done.
//!
//! Each step computes the next state from an immutable snapshot of the
//! current one (force pass, then integration into a second buffer), swaps
//! the buffers, and resolves collisions on the new positions. Reports are
//! value snapshots handed to a [`ReportSink`].

use std::mem;

use log::{debug, info, trace, warn};

use crate::error::{Result, SimError};
use crate::simulation::collisions::{compact, resolve_collisions, CollisionMode, Merge};
use crate::simulation::integrator::integrate;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Done,
}

/// Snapshot of the body collection at one point in simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub step: u64,
    pub time: f64,
    pub bodies: Vec<Body>,
}

impl Report {
    pub fn positions(&self) -> Vec<NVec3> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// `true` if any position is NaN or infinite, i.e. the run broke down.
    pub fn has_non_finite(&self) -> bool {
        self.bodies
            .iter()
            .any(|b| b.position.iter().any(|c| !c.is_finite()))
    }
}

/// Receiver of reports. Errors abort the run.
pub trait ReportSink {
    fn report(&mut self, report: &Report) -> Result<()>;
}

impl ReportSink for Vec<Report> {
    fn report(&mut self, report: &Report) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

impl<F> ReportSink for F
where
    F: FnMut(&Report) -> Result<()>,
{
    fn report(&mut self, report: &Report) -> Result<()> {
        self(report)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub time: f64,
    pub reports: usize,
    pub merges: usize,
}

pub struct Simulator {
    scenario: Scenario,
    next: Vec<Body>,
    state: RunState,
    steps: u64,
    merges: usize,
}

impl Simulator {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            next: Vec::new(),
            state: RunState::Idle,
            steps: 0,
            merges: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn bodies(&self) -> &[Body] {
        &self.scenario.system.bodies
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time elapsed, `steps * dt`.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.scenario.parameters.dt
    }

    /// Check everything the loop relies on before it starts.
    pub fn validate(&self) -> Result<()> {
        self.scenario.parameters.validate()?;

        let bodies = &self.scenario.system.bodies;
        if bodies.is_empty() {
            return Err(SimError::NoBodies);
        }
        if let Some((index, b)) = bodies
            .iter()
            .enumerate()
            .find(|(_, b)| !b.mass.is_finite() || b.mass < 0.0)
        {
            return Err(SimError::InvalidMass {
                index,
                mass: b.mass,
            });
        }
        if let CollisionMode::Threshold(distance) = self.scenario.engine.collision {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "collision distance must be finite and > 0, got {distance}"
                )));
            }
        }
        Ok(())
    }

    /// Advance one step: integrate from the current snapshot, swap, merge.
    pub fn step(&mut self) -> Vec<Merge> {
        let Scenario {
            engine,
            parameters,
            system,
            forces,
            ..
        } = &mut self.scenario;

        integrate(engine.integrator, system, forces, parameters, &mut self.next);
        mem::swap(&mut system.bodies, &mut self.next);
        self.steps += 1;
        system.t = self.steps as f64 * parameters.dt;

        let merges = resolve_collisions(&mut system.bodies, engine.collision);
        for m in &merges {
            info!(
                "t = {}: body {} absorbed into body {} (mass {:e} kg)",
                system.t, m.absorbed, m.survivor, system.bodies[m.survivor].mass
            );
        }
        if engine.compact_absorbed && !merges.is_empty() {
            let removed = compact(&mut system.bodies);
            debug!("compacted {removed} absorbed bodies, {} remain", system.bodies.len());
        }
        self.merges += merges.len();

        trace!("step {} done at t = {}", self.steps, system.t);
        merges
    }

    fn snapshot(&self) -> Report {
        Report {
            step: self.steps,
            time: self.time(),
            bodies: self.scenario.system.bodies.clone(),
        }
    }

    fn emit<S: ReportSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let report = self.snapshot();
        if report.has_non_finite() {
            warn!(
                "non-finite position at step {} (t = {}), the simulation has broken down",
                report.step, report.time
            );
        }
        debug!("report at step {} (t = {})", report.step, report.time);
        sink.report(&report)
    }

    /// Run to completion, reporting every `report_interval` of simulated
    /// time plus once more at the end.
    pub fn simulate<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        if self.state != RunState::Idle {
            return Err(SimError::InvalidState(format!(
                "simulate called in state {:?}",
                self.state
            )));
        }
        self.validate()?;

        self.state = RunState::Running;
        let result = self.run(sink);
        self.state = RunState::Done;
        result
    }

    fn run<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        let dt = self.scenario.parameters.dt;
        let max_time = self.scenario.parameters.max_time;
        let report_interval = self.scenario.parameters.report_interval;

        info!(
            "simulating {} bodies: dt = {dt} s, max_time = {max_time} s, report every {report_interval} s",
            self.bodies().len()
        );

        let mut reports = 0;
        let mut last_report = 0u64;
        while self.time() <= max_time {
            self.step();

            if (self.steps - last_report) as f64 * dt >= report_interval {
                self.emit(sink)?;
                reports += 1;
                last_report = self.steps;
            }
        }

        // final state is always observable
        self.emit(sink)?;
        reports += 1;

        let summary = RunSummary {
            steps: self.steps,
            time: self.time(),
            reports,
            merges: self.merges,
        };
        info!(
            "done: {} steps, t = {} s, {} reports, {} merges",
            summary.steps, summary.time, summary.reports, summary.merges
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::Parameters;

    fn lone_body(params: Parameters) -> Simulator {
        Simulator::new(Scenario::new(
            vec![Body::new(NVec3::zeros(), NVec3::new(1.0, 0.0, 0.0), 1.0)],
            params,
        ))
    }

    #[test]
    fn report_cadence_with_final_report() {
        let mut sim = lone_body(Parameters::new(1.0, 10.0, 3.0));
        let mut reports: Vec<Report> = Vec::new();
        let summary = sim.simulate(&mut reports).unwrap();

        let times: Vec<f64> = reports.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![3.0, 6.0, 9.0, 11.0]);
        assert_eq!(summary.reports, 4);
        assert_eq!(summary.steps, 11);
        assert_eq!(sim.state(), RunState::Done);
    }

    #[test]
    fn zero_max_time_runs_one_step() {
        let mut sim = lone_body(Parameters::new(0.5, 0.0, 3.0));
        let mut reports: Vec<Report> = Vec::new();
        let summary = sim.simulate(&mut reports).unwrap();

        assert_eq!(summary.steps, 1);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].positions(), vec![NVec3::new(0.5, 0.0, 0.0)]);
    }

    #[test]
    fn invalid_configuration_never_starts() {
        let mut sim = lone_body(Parameters::new(0.0, 10.0, 1.0));
        let mut reports: Vec<Report> = Vec::new();
        assert!(matches!(
            sim.simulate(&mut reports),
            Err(SimError::InvalidParameter(_))
        ));
        assert_eq!(sim.state(), RunState::Idle);
        assert!(reports.is_empty());

        let mut empty = Simulator::new(Scenario::new(Vec::new(), Parameters::new(1.0, 1.0, 1.0)));
        assert!(matches!(empty.simulate(&mut reports), Err(SimError::NoBodies)));

        let mut negative = Simulator::new(Scenario::new(
            vec![Body::new(NVec3::zeros(), NVec3::zeros(), -1.0)],
            Parameters::new(1.0, 1.0, 1.0),
        ));
        assert!(matches!(
            negative.simulate(&mut reports),
            Err(SimError::InvalidMass { index: 0, .. })
        ));
    }

    #[test]
    fn cannot_simulate_twice() {
        let mut sim = lone_body(Parameters::new(1.0, 2.0, 1.0));
        let mut reports: Vec<Report> = Vec::new();
        sim.simulate(&mut reports).unwrap();
        assert!(matches!(
            sim.simulate(&mut reports),
            Err(SimError::InvalidState(_))
        ));
    }

    #[test]
    fn sink_error_aborts_run() {
        let mut sim = lone_body(Parameters::new(1.0, 10.0, 2.0));
        let mut seen = 0;
        let mut sink = |_: &Report| -> Result<()> {
            seen += 1;
            Err(SimError::InvalidState("sink closed".into()))
        };
        assert!(sim.simulate(&mut sink).is_err());
        assert_eq!(seen, 1);
        assert_eq!(sim.steps(), 2);
        assert_eq!(sim.state(), RunState::Done);
    }

    #[test]
    fn reports_are_copies() {
        let mut sim = lone_body(Parameters::new(1.0, 3.0, 1.0));
        let mut reports: Vec<Report> = Vec::new();
        sim.simulate(&mut reports).unwrap();

        assert_eq!(reports[0].bodies[0].position, NVec3::new(1.0, 0.0, 0.0));
        assert_eq!(sim.bodies()[0].position, NVec3::new(4.0, 0.0, 0.0));
    }
}
