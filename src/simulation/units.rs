//! Input/display unit systems.
//!
//! The simulation itself always runs in SI. `Astro` scenarios describe
//! positions in parsecs, velocities in km/s and masses in solar masses and
//! are converted once, when bodies are built.

use serde::Deserialize;

use crate::simulation::states::{Body, NVec3, RandomBounds};

pub const PARSEC_TO_METER: f64 = 3.086e16;
pub const KMPS_TO_MPS: f64 = 1000.0;
pub const SOLARMASS_TO_KG: f64 = 1.98855e30;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[serde(rename = "si")] // meters, meters per second, kilograms
    #[default]
    Si,

    #[serde(rename = "astro")] // parsecs, kilometers per second, solar masses
    Astro,
}

impl UnitSystem {
    fn scales(self) -> (f64, f64, f64) {
        match self {
            UnitSystem::Si => (1.0, 1.0, 1.0),
            UnitSystem::Astro => (PARSEC_TO_METER, KMPS_TO_MPS, SOLARMASS_TO_KG),
        }
    }

    /// Build an SI body from values expressed in this unit system.
    pub fn body(self, position: NVec3, velocity: NVec3, mass: f64) -> Body {
        let (p, v, m) = self.scales();
        Body::new(position * p, velocity * v, mass * m)
    }

    /// Convert random-generation bounds into SI.
    pub fn bounds_to_si(self, bounds: RandomBounds) -> RandomBounds {
        let (p, v, m) = self.scales();
        RandomBounds {
            position: bounds.position.map(|x| x * p),
            velocity: bounds.velocity.map(|x| x * v),
            mass: bounds.mass.map(|x| x * m),
        }
    }

    /// Convert an SI position back into this unit system for display.
    pub fn position_from_si(self, position: &NVec3) -> NVec3 {
        let (p, _, _) = self.scales();
        position / p
    }
}
