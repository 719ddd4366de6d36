//! Wind: quadratic aerodynamic drag toward a turbulent target velocity, plus
//! the slow real-time wobble of the wind direction.

use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;
use crate::vec::Vec3;
use rand::Rng;

/// Tunable constants of the wind model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindParams<F: Float> {
    /// Quadratic drag coefficient.
    pub drag: F,
    /// Per-axis amplitude of the uniform turbulence, in units of wind strength.
    pub turbulence: Vec3<F>,
    /// Amplitude of the direction wobble.
    pub variation_strength: F,
    /// Wind strength below which the direction is left alone.
    pub variation_threshold: F,
    /// Direction the wobble oscillates around.
    pub base_direction: Vec3<F>,
}

impl<F: Float> WindParams<F> {
    pub fn validate(&self) -> Result<(), ClothError> {
        let finite = self.drag.is_finite()
            && self.turbulence.is_finite()
            && self.variation_strength.is_finite()
            && self.variation_threshold.is_finite();
        let has_direction = self.base_direction.try_normalize(F::from_f32(1e-6)).is_some();
        if !finite || self.drag < F::zero() || !has_direction {
            return Err(InvalidArgument::Wind.into());
        }
        Ok(())
    }
}

impl<F: Float> Default for WindParams<F> {
    fn default() -> Self {
        WindParams {
            drag: F::from_f32(0.1),
            turbulence: Vec3::from_f32(0.3, 0.2, 0.3),
            variation_strength: F::from_f32(0.3),
            variation_threshold: F::one(),
            base_direction: Vec3::from_f32(0.0, 0.0, -1.0),
        }
    }
}

/// Live wind state: direction, strength and the wobble clock.
#[derive(Clone, Debug)]
pub struct Wind<F: Float> {
    direction: Vec3<F>,
    strength: F,
    variation_time: F,
    params: WindParams<F>,
}

impl<F: Float> Wind<F> {
    pub fn new(params: WindParams<F>) -> Self {
        Wind {
            direction: Vec3::from_f32(1.0, 0.0, 0.5).normalize(),
            strength: F::zero(),
            variation_time: F::zero(),
            params,
        }
    }

    pub fn direction(&self) -> Vec3<F> { self.direction }
    pub fn strength(&self) -> F { self.strength }
    pub fn params(&self) -> &WindParams<F> { &self.params }

    pub fn is_blowing(&self) -> bool {
        self.strength > F::zero()
    }

    pub fn set_strength(&mut self, strength: F) {
        self.strength = strength;
    }

    /// Set the direction from any non-zero vector; a zero vector is ignored.
    pub fn set_direction(&mut self, direction: Vec3<F>) {
        if let Some(unit) = direction.try_normalize(F::from_f32(1e-6)) {
            self.direction = unit;
        }
    }

    pub fn reset_variation(&mut self) {
        self.variation_time = F::zero();
    }

    /// Target air velocity for one particle: base wind plus a fresh
    /// turbulence sample, both scaled by strength.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3<F> {
        let mut draw = |amplitude: F| F::from_f32(rng.random_range(-1.0f32..1.0)) * amplitude;
        let t = self.params.turbulence;
        let turbulence = Vec3::new(draw(t.x), draw(t.y), draw(t.z));
        (self.direction + turbulence).scale(self.strength)
    }

    /// Quadratic drag toward `air`: `normalize(rel) * |rel|² * drag * mass`
    /// with `rel = air - velocity`.
    pub fn drag_force(&self, air: Vec3<F>, velocity: Vec3<F>, mass: F) -> Vec3<F> {
        let relative = air - velocity;
        let speed = relative.length();
        if speed <= F::zero() || !speed.is_finite() {
            return Vec3::zero();
        }
        relative.scale(F::one() / speed).scale(speed * speed * self.params.drag * mass)
    }

    /// Advance the direction wobble by one real frame.
    ///
    /// Three sinusoids with distinct frequencies perturb the base direction
    /// on each axis. Does nothing while the wind is weaker than the threshold.
    pub fn vary(&mut self, dt: F) {
        if self.strength < self.params.variation_threshold {
            return;
        }
        self.variation_time = self.variation_time + dt * F::from_f32(3.0);
        let t = self.variation_time;
        let amp = self.params.variation_strength;
        let wobble = Vec3::new(
            (t * F::from_f32(1.5)).sin() * amp,
            (t * F::from_f32(2.3)).sin() * amp * F::half(),
            (t * F::from_f32(1.8)).cos() * amp * F::from_f32(0.3),
        );
        self.set_direction(self.params.base_direction.normalize() + wobble);
    }
}
