//! Fixed-step accumulator decoupling physics from the render frame rate.

use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;

/// Collects real frame time and hands it out in whole fixed steps.
#[derive(Clone, Debug)]
pub struct FixedTimestep<F: Float> {
    step: F,
    accumulator: F,
}

impl<F: Float> FixedTimestep<F> {
    pub fn new(step: F) -> Result<Self, ClothError> {
        if !step.is_finite() || step <= F::zero() {
            return Err(InvalidArgument::TimeStep.into());
        }
        Ok(FixedTimestep { step, accumulator: F::zero() })
    }

    pub fn step(&self) -> F { self.step }

    /// Time carried over that is not yet a whole step.
    pub fn pending(&self) -> F { self.accumulator }

    /// Add a frame delta. Negative or non-finite deltas count as zero.
    pub fn accumulate(&mut self, dt: F) {
        if dt.is_finite() && dt > F::zero() {
            self.accumulator = self.accumulator + dt;
        }
    }

    /// Consume one step if the accumulator holds at least one.
    pub fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator = self.accumulator - self.step;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.accumulator = F::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ts: &mut FixedTimestep<f64>) -> usize {
        let mut n = 0;
        while ts.consume() {
            n += 1;
        }
        n
    }

    #[test]
    fn whole_steps_only() {
        let mut ts = FixedTimestep::new(0.25f64).unwrap();
        ts.accumulate(0.6);
        assert_eq!(drain(&mut ts), 2);
        assert!((ts.pending() - 0.1).abs() < 1e-12);
        ts.accumulate(0.2);
        assert_eq!(drain(&mut ts), 1);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut ts = FixedTimestep::new(0.25f64).unwrap();
        ts.accumulate(-1.0);
        ts.accumulate(f64::NAN);
        ts.accumulate(0.0);
        assert_eq!(ts.pending(), 0.0);
        assert_eq!(drain(&mut ts), 0);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(FixedTimestep::new(0.0f32).is_err());
        assert!(FixedTimestep::new(-0.1f32).is_err());
        assert!(FixedTimestep::new(f32::NAN).is_err());
    }
}
