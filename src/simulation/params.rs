//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size, end time and report cadence,
//! - gravitational constant `g`,
//! - optional random seed

use crate::error::{Result, SimError};

/// Gravitational constant in SI units (m^3 kg^-1 s^-2).
pub const G: f64 = 6.67408e-11;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,              // step size (s)
    pub max_time: f64,        // time end (s)
    pub report_interval: f64, // simulated time between reports (s)
    pub g: f64,               // gravitational constant
    pub seed: Option<u64>,    // deterministic seed
}

impl Parameters {
    pub fn new(dt: f64, max_time: f64, report_interval: f64) -> Self {
        Self {
            dt,
            max_time,
            report_interval,
            g: G,
            seed: None,
        }
    }

    /// Reject settings that would never terminate or divide by zero downstream.
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if !self.max_time.is_finite() || self.max_time < 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "max_time must be finite and >= 0, got {}",
                self.max_time
            )));
        }
        if !self.report_interval.is_finite() || self.report_interval <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "report_interval must be finite and > 0, got {}",
                self.report_interval
            )));
        }
        if !self.g.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "G must be finite, got {}",
                self.g
            )));
        }
        Ok(())
    }
}
