//! Error types for the simulator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("No bodies to simulate")]
    NoBodies,

    #[error("Body {index} has invalid mass {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("Invalid simulator state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
