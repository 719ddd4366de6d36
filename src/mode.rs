//! Simulation modes and the pure setup each one applies after a reset.

use crate::float::Float;
use crate::vec::Vec3;

/// The three interactive scenarios.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimulationMode {
    /// Hanging sheet the user rips apart with the pointer.
    #[default]
    Tear,
    /// Sheet hung by two corners with a sphere sweeping through it.
    Collision,
    /// Sheet pinned along the top edge in a steady, wobbling wind.
    Flag,
}

/// Which particles are pinned after a reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinPattern {
    /// Every particle of the top row.
    TopRow,
    /// Only the two ends of the top row.
    TopCorners,
}

/// What entering a mode sets up on a freshly rebuilt grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModeSetup<F: Float> {
    pub pins: PinPattern,
    /// Sphere to add as `(center, radius)`; all others are cleared.
    pub sphere: Option<(Vec3<F>, F)>,
    pub wind_strength: F,
    /// `None` leaves the current wind direction as is.
    pub wind_direction: Option<Vec3<F>>,
}

impl SimulationMode {
    pub const ALL: [SimulationMode; 3] =
        [SimulationMode::Tear, SimulationMode::Collision, SimulationMode::Flag];

    pub fn setup<F: Float>(self) -> ModeSetup<F> {
        match self {
            SimulationMode::Tear => ModeSetup {
                pins: PinPattern::TopRow,
                sphere: None,
                wind_strength: F::zero(),
                wind_direction: None,
            },
            SimulationMode::Collision => ModeSetup {
                pins: PinPattern::TopCorners,
                sphere: Some((Vec3::from_f32(0.0, 1.0, 6.0), F::from_f32(0.8))),
                wind_strength: F::zero(),
                wind_direction: None,
            },
            SimulationMode::Flag => ModeSetup {
                pins: PinPattern::TopRow,
                sphere: None,
                wind_strength: F::from_f32(6.0),
                wind_direction: Some(Vec3::from_f32(0.0, 0.0, -1.0)),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SimulationMode::Tear => "tear",
            SimulationMode::Collision => "collision",
            SimulationMode::Flag => "flag",
        }
    }
}
