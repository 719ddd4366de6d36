//! Sphere colliders and the ground plane, with Verlet contact response.

use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// A solid sphere the cloth cannot enter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereCollider<F: Float> {
    pub center: Vec3<F>,
    pub radius: F,
}

impl<F: Float> SphereCollider<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Result<Self, ClothError> {
        if !radius.is_finite() || radius <= F::zero() || !center.is_finite() {
            return Err(InvalidArgument::Radius.into());
        }
        Ok(SphereCollider { center, radius })
    }

    pub fn contains(&self, point: Vec3<F>) -> bool {
        point.distance(self.center) < self.radius
    }

    /// Push `particle` out to the surface and reshape its implicit velocity.
    ///
    /// The normal part of the velocity is reflected and scaled by
    /// `contact.bounce`, the tangential part is scaled by `contact.friction`.
    /// Returns whether the particle was inside.
    pub fn resolve(&self, particle: &mut Particle<F>, contact: &ContactParams<F>) -> bool {
        let diff = particle.pos - self.center;
        let dist = diff.length();
        if dist >= self.radius {
            return false;
        }

        let normal = if dist > F::from_f32(1e-6) {
            diff.scale(F::one() / dist)
        } else {
            Vec3::up()
        };
        particle.pos = self.center + normal.scale(self.radius);

        let velocity = particle.velocity_raw();
        let v_normal = normal.scale(velocity.dot(normal));
        let v_tangent = velocity - v_normal;
        particle.set_velocity_raw(v_tangent.scale(contact.friction) - v_normal.scale(contact.bounce));
        true
    }
}

/// Response coefficients for sphere contacts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactParams<F: Float> {
    /// Fraction of the normal velocity kept (and reversed) on contact.
    pub bounce: F,
    /// Fraction of the tangential velocity kept on contact.
    pub friction: F,
}

impl<F: Float> Default for ContactParams<F> {
    fn default() -> Self {
        ContactParams {
            bounce: F::from_f32(0.2),
            friction: F::from_f32(0.9),
        }
    }
}

/// Horizontal floor at `height`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundPlane<F: Float> {
    pub height: F,
    /// Fraction of the implicit velocity kept after landing.
    pub restitution: F,
}

impl<F: Float> GroundPlane<F> {
    pub fn resolve(&self, particle: &mut Particle<F>) -> bool {
        if particle.pos.y >= self.height {
            return false;
        }
        particle.pos.y = self.height;
        let velocity = particle.velocity_raw();
        particle.set_velocity_raw(velocity.scale(self.restitution));
        true
    }
}

impl<F: Float> Default for GroundPlane<F> {
    fn default() -> Self {
        GroundPlane {
            height: F::from_f32(-5.0),
            restitution: F::from_f32(0.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_radius() {
        assert!(SphereCollider::new(Vec3::<f32>::zero(), 0.0).is_err());
        assert!(SphereCollider::new(Vec3::<f32>::zero(), -1.0).is_err());
        assert!(SphereCollider::new(Vec3::<f32>::zero(), f32::INFINITY).is_err());
        assert!(SphereCollider::new(Vec3::<f32>::zero(), 0.5).is_ok());
    }

    #[test]
    fn particle_inside_is_projected_to_surface() {
        let sphere = SphereCollider::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0).unwrap();
        let mut p = Particle::new(Vec3::new(0.0, 0.0, 0.5), 1.0);
        p.prev_pos = Vec3::new(0.0, 0.0, 0.6);
        assert!(sphere.resolve(&mut p, &ContactParams::default()));
        assert!((p.pos.distance(sphere.center) - 1.0).abs() < 1e-6);
        // Post-projection velocity (0, 0, 0.4) is reversed and scaled by bounce.
        let v = p.velocity_raw();
        assert!((v.z + 0.08).abs() < 1e-6, "v.z = {}", v.z);
    }

    #[test]
    fn particle_at_center_uses_up() {
        let sphere = SphereCollider::new(Vec3::new(1.0f32, 2.0, 3.0), 0.5).unwrap();
        let mut p = Particle::new(sphere.center, 1.0);
        sphere.resolve(&mut p, &ContactParams::default());
        assert_eq!(p.pos, Vec3::new(1.0, 2.5, 3.0));
        assert!(p.pos.is_finite() && p.prev_pos.is_finite());
    }

    #[test]
    fn tangential_velocity_keeps_friction_share() {
        let sphere = SphereCollider::new(Vec3::zero(), 1.0f32).unwrap();
        let mut p = Particle::new(Vec3::new(0.0, 0.9, 0.0), 1.0);
        p.prev_pos = Vec3::new(-0.1, 0.9, 0.0);
        sphere.resolve(&mut p, &ContactParams::default());
        let v = p.velocity_raw();
        assert!((v.x - 0.09).abs() < 1e-6);
        assert!((v.y + 0.02).abs() < 1e-6);
    }

    #[test]
    fn particle_outside_is_untouched() {
        let sphere = SphereCollider::new(Vec3::zero(), 1.0f32).unwrap();
        let mut p = Particle::new(Vec3::new(0.0, 2.0, 0.0), 1.0);
        assert!(!sphere.resolve(&mut p, &ContactParams::default()));
        assert_eq!(p.pos, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn ground_clamps_and_damps() {
        let ground = GroundPlane::<f32>::default();
        let mut p = Particle::new(Vec3::new(0.0, -5.5, 0.0), 1.0);
        p.prev_pos = Vec3::new(0.0, -5.0, 0.0);
        assert!(ground.resolve(&mut p));
        assert_eq!(p.pos.y, -5.0);
        assert!(p.velocity_raw().length() < 1e-6);

        let mut q = Particle::new(Vec3::new(1.0, -6.0, 0.0), 1.0);
        q.prev_pos = Vec3::new(0.0, -6.0, 0.0);
        ground.resolve(&mut q);
        assert!((q.velocity_raw().x - 0.4).abs() < 1e-6);
    }
}
