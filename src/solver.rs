//! The fixed-step physics pipeline: forces, Verlet integration, spring
//! relaxation with tearing, then collision response.

use crate::collider::SphereCollider;
use crate::config::SolverConfig;
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::observer::StepObserver;
use crate::spring::RelaxOutcome;
use crate::vec::Vec3;
use crate::wind::Wind;
use rand::Rng;

/// Reset forces, then add gravity and (if blowing) wind drag to every free particle.
pub fn accumulate_forces<F: Float, R: Rng>(
    grid: &mut ClothGrid<F>,
    wind: &Wind<F>,
    config: &SolverConfig<F>,
    dt: F,
    rng: &mut R,
) {
    let blowing = wind.is_blowing();
    for p in grid.particles.iter_mut().filter(|p| p.is_free()) {
        p.clear_force();
        p.apply_force(Vec3::new(F::zero(), config.gravity * p.mass, F::zero()));
        if blowing {
            let air = wind.sample(rng);
            let force = wind.drag_force(air, p.velocity(dt), p.mass);
            p.apply_force(force);
        }
    }
}

/// Position Verlet step for every free particle.
pub fn integrate<F: Float>(grid: &mut ClothGrid<F>, config: &SolverConfig<F>, dt: F) {
    for p in grid.particles.iter_mut() {
        p.integrate(dt, config.damping);
    }
}

/// One Gauss-Seidel pass over the spring network. Returns how many springs tore.
pub fn relax<F: Float, O: StepObserver>(
    grid: &mut ClothGrid<F>,
    config: &SolverConfig<F>,
    observer: &mut O,
) -> usize {
    let ClothGrid { particles, springs, .. } = grid;
    let mut torn = 0;
    for (i, spring) in springs.iter_mut().enumerate() {
        if spring.relax(particles, config.tear_threshold) == RelaxOutcome::Torn {
            log::debug!(
                "spring {} ({:?}) tore between particles {} and {}",
                i, spring.kind, spring.a, spring.b
            );
            observer.on_spring_torn(i, spring.kind);
            torn += 1;
        }
    }
    torn
}

/// Push free particles out of every sphere, then apply the ground plane.
///
/// The ground runs last so it wins when both apply. Returns the number of
/// contacts resolved.
pub fn collide<F: Float>(
    grid: &mut ClothGrid<F>,
    colliders: &[SphereCollider<F>],
    config: &SolverConfig<F>,
) -> usize {
    let mut contacts = 0;
    for p in grid.particles.iter_mut().filter(|p| p.is_free()) {
        for sphere in colliders {
            if sphere.resolve(p, &config.contact) {
                contacts += 1;
            }
        }
        if config.ground.resolve(p) {
            contacts += 1;
        }
    }
    contacts
}

/// Run one complete fixed step of length `dt`.
pub fn step<F: Float, R: Rng, O: StepObserver>(
    grid: &mut ClothGrid<F>,
    colliders: &[SphereCollider<F>],
    wind: &Wind<F>,
    config: &SolverConfig<F>,
    dt: F,
    rng: &mut R,
    observer: &mut O,
) {
    accumulate_forces(grid, wind, config, dt, rng);
    observer.on_forces();

    integrate(grid, config, dt);
    observer.on_integrate();

    for pass in 0..config.relaxation_passes {
        relax(grid, config, observer);
        observer.on_relaxation_pass(pass);
    }

    let contacts = collide(grid, colliders, config);
    observer.on_collisions(contacts);

    debug_assert!(
        grid.particles.iter().filter(|p| p.active).all(|p| p.pos.is_finite()),
        "cloth produced a non-finite particle position"
    );
    observer.on_step_complete();
}
