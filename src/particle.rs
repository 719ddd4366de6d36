//! Cloth particles: Verlet state plus pin and active flags.

use crate::float::Float;
use crate::vec::Vec3;

/// A Verlet particle — position-based dynamics with implicit velocity.
///
/// Particles are never removed from the cloth. Tearing one away clears
/// `active`, which keeps every index held by springs and the mesh remap valid.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub force: Vec3<F>,
    pub mass: F,
    pub pinned: bool,
    pub active: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec3<F>, mass: F) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            force: Vec3::zero(),
            mass,
            pinned: false,
            active: true,
        }
    }

    /// Whether the dynamic stages (forces, integration, collision) touch this particle.
    pub fn is_free(&self) -> bool {
        self.active && !self.pinned
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        if self.is_free() {
            self.force += force;
        }
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::zero();
    }

    /// Position Verlet step: `pos + (pos - prev) * damping + (force / mass) * dt²`.
    pub fn integrate(&mut self, dt: F, damping: F) {
        if !self.is_free() {
            return;
        }
        let accel = self.force.scale(F::one() / self.mass);
        let new_pos = self.pos + (self.pos - self.prev_pos).scale(damping) + accel.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
    }

    /// Velocity implied by the last step of length `dt`.
    pub fn velocity(&self, dt: F) -> Vec3<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec3::zero();
        }
        self.velocity_raw().scale(F::one() / dt)
    }

    pub fn velocity_raw(&self) -> Vec3<F> {
        self.pos - self.prev_pos
    }

    /// Rewrite `prev_pos` so the next step reproduces `velocity` (per step).
    pub fn set_velocity_raw(&mut self, velocity: Vec3<F>) {
        self.prev_pos = self.pos - velocity;
    }

    pub fn pin(&mut self) {
        self.pinned = true;
        self.prev_pos = self.pos;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
