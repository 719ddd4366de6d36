//! Tearable distance springs between pairs of cloth particles.

use crate::float::Float;
use crate::particle::Particle;

/// Constraint category. Stiffness decreases from structural to bend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Horizontal and vertical neighbours; resists stretching.
    Structural,
    /// Diagonal neighbours; resists shearing.
    Shear,
    /// Two cells apart; resists folding.
    Bend,
}

/// What a single relaxation of one spring did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// The spring (or an endpoint) is inactive, or the endpoints coincide.
    Skipped,
    /// Stretched past the tear threshold; the spring is now inactive.
    Torn,
    /// Endpoints moved toward the rest length.
    Corrected,
}

/// A distance spring between particles `a` and `b`.
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub kind: SpringKind,
    pub active: bool,
}

impl<F: Float> Spring<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F, kind: SpringKind) -> Self {
        Spring { a, b, rest_length, stiffness, kind, active: true }
    }

    /// Spring whose rest length is the current distance between its endpoints.
    pub fn from_particles(
        a: usize,
        b: usize,
        particles: &[Particle<F>],
        stiffness: F,
        kind: SpringKind,
    ) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        Spring::new(a, b, rest_length, stiffness, kind)
    }

    pub fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    pub fn current_length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    /// True when the spring is stretched beyond `rest_length * tear_threshold`.
    pub fn exceeds(&self, length: F, tear_threshold: F) -> bool {
        length > self.rest_length * tear_threshold
    }

    /// One Jakobsen-style relaxation of this spring.
    ///
    /// The correction is split in inverse proportion to mass and pinned
    /// endpoints never move. A spring that is stretched past the threshold
    /// tears instead of correcting.
    pub fn relax(&mut self, particles: &mut [Particle<F>], tear_threshold: F) -> RelaxOutcome {
        if !self.active || !particles[self.a].active || !particles[self.b].active {
            return RelaxOutcome::Skipped;
        }

        let delta = particles[self.b].pos - particles[self.a].pos;
        let dist = delta.length();
        if dist < F::from_f32(1e-6) {
            return RelaxOutcome::Skipped;
        }

        if self.exceeds(dist, tear_threshold) {
            self.active = false;
            return RelaxOutcome::Torn;
        }

        let difference = (self.rest_length - dist) / dist;
        let translate = delta.scale(difference * self.stiffness);

        let mass_a = particles[self.a].mass;
        let mass_b = particles[self.b].mass;
        let total = mass_a + mass_b;

        if !particles[self.a].pinned {
            particles[self.a].pos -= translate.scale(mass_b / total);
        }
        if !particles[self.b].pinned {
            particles[self.b].pos += translate.scale(mass_a / total);
        }
        RelaxOutcome::Corrected
    }
}
