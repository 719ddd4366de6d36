//! Scripted path for the moving collider: straight approach, semicircular return.

use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;
use crate::vec::Vec3;

/// Speed and reach of the sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepParams<F: Float> {
    /// Scripted-time units per real second.
    pub speed: F,
    /// Distance covered by the straight approach along `-Z`.
    pub range: F,
    /// Head start of the very first approach. Later loops start from 0.
    pub initial_travel: F,
}

impl<F: Float> SweepParams<F> {
    pub fn validate(&self) -> Result<(), ClothError> {
        let finite = self.speed.is_finite() && self.range.is_finite() && self.initial_travel.is_finite();
        if !finite || self.speed < F::zero() || self.range <= F::zero() || self.initial_travel < F::zero() {
            return Err(InvalidArgument::Sweep.into());
        }
        Ok(())
    }
}

impl<F: Float> Default for SweepParams<F> {
    fn default() -> Self {
        SweepParams {
            speed: F::from_f32(0.8),
            range: F::from_f32(8.0),
            initial_travel: F::from_f32(4.0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SweepPhase<F: Float> {
    /// Moving along `-Z`; `travelled` is the scripted distance so far.
    Approach { travelled: F },
    /// On the way back along a half circle; `angle` runs from 0 to pi.
    Return { angle: F },
}

/// Drives a collider centre around a closed loop once per real frame.
///
/// The approach runs from `start` to `start - range * Z`, the first one
/// beginning `initial_travel` along the way. The return arc has
/// radius `range / 2` and bulges toward `+X`, ending back at `start`.
#[derive(Clone, Debug)]
pub struct ColliderSweep<F: Float> {
    start: Vec3<F>,
    phase: SweepPhase<F>,
    params: SweepParams<F>,
}

impl<F: Float> ColliderSweep<F> {
    pub fn new(start: Vec3<F>, params: SweepParams<F>) -> Self {
        ColliderSweep {
            start,
            phase: SweepPhase::Approach { travelled: params.initial_travel },
            params,
        }
    }

    pub fn start(&self) -> Vec3<F> { self.start }
    pub fn phase(&self) -> SweepPhase<F> { self.phase }

    /// Advance by `dt` real seconds and return the new centre.
    pub fn advance(&mut self, dt: F) -> Vec3<F> {
        let step = dt * self.params.speed;
        let range = self.params.range;
        let radius = range * F::half();

        match self.phase {
            SweepPhase::Approach { travelled } => {
                let travelled = travelled + step;
                if travelled >= range {
                    self.phase = SweepPhase::Return { angle: F::zero() };
                    Vec3::new(self.start.x, self.start.y, self.start.z - range)
                } else {
                    self.phase = SweepPhase::Approach { travelled };
                    Vec3::new(self.start.x, self.start.y, self.start.z - travelled)
                }
            }
            SweepPhase::Return { angle } => {
                let angle = angle + step;
                if angle >= F::pi() {
                    self.phase = SweepPhase::Approach { travelled: F::zero() };
                    return self.start;
                }
                self.phase = SweepPhase::Return { angle };
                Vec3::new(
                    self.start.x + radius * angle.sin(),
                    self.start.y,
                    self.start.z - range + radius * (F::one() - angle.cos()),
                )
            }
        }
    }
}
