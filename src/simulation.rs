//! The interactive cloth: owns the grid, colliders, wind and mesh, and
//! advances them on two cadences.
//!
//! Physics runs in whole fixed steps drawn from an accumulator. The collider
//! sweep, the wind wobble and the mesh rebuild run once per real frame with
//! the raw frame delta.

use crate::collider::SphereCollider;
use crate::config::{
    clamp_to, ClothConfig, SolverConfig, DAMPING_RANGE, GRAVITY_RANGE, TEAR_THRESHOLD_RANGE,
    WIND_STRENGTH_RANGE,
};
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::{ClothGrid, GridConfig};
use crate::mesh::MeshBuffers;
use crate::mode::{PinPattern, SimulationMode};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::solver;
use crate::sweep::{ColliderSweep, SweepParams};
use crate::timestep::FixedTimestep;
use crate::vec::Vec3;
use crate::wind::Wind;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seed used when no seed is configured and OS entropy is unavailable.
#[cfg(not(feature = "std"))]
const FALLBACK_SEED: u64 = 0x636c_6f74_6879;

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        #[cfg(feature = "std")]
        None => SmallRng::from_os_rng(),
        #[cfg(not(feature = "std"))]
        None => SmallRng::seed_from_u64(FALLBACK_SEED),
    }
}

/// A tearable cloth with its environment.
pub struct ClothSimulation<F: Float> {
    grid: ClothGrid<F>,
    grid_config: GridConfig<F>,
    solver: SolverConfig<F>,
    colliders: AllocVec<SphereCollider<F>>,
    sweep: Option<ColliderSweep<F>>,
    sweep_params: SweepParams<F>,
    wind: Wind<F>,
    timestep: FixedTimestep<F>,
    mesh: MeshBuffers<F>,
    mode: SimulationMode,
    tear_radius: F,
    rng: SmallRng,
}

impl<F: Float> ClothSimulation<F> {
    /// Build the cloth and enter `config.mode`.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = ClothGrid::new(&config.grid)?;
        let mut sim = ClothSimulation {
            grid,
            grid_config: config.grid,
            solver: config.solver,
            colliders: AllocVec::new(),
            sweep: None,
            sweep_params: config.sweep,
            wind: Wind::new(config.wind),
            timestep: FixedTimestep::new(config.fixed_dt)?,
            mesh: MeshBuffers::new(),
            mode: config.mode,
            tear_radius: config.tear_radius,
            rng: make_rng(config.seed),
        };
        sim.set_mode(config.mode);
        Ok(sim)
    }

    /// Rebuild the grid from scratch, then apply `mode`'s pins, colliders and wind.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        log::debug!("entering {} mode", mode.name());
        self.mode = mode;
        self.rebuild_grid();

        let setup = mode.setup::<F>();
        match setup.pins {
            PinPattern::TopRow => self.grid.pin_top_row(),
            PinPattern::TopCorners => self.grid.pin_top_corners(),
        }

        self.clear_colliders();
        if let Some((center, radius)) = setup.sphere {
            // Mode spheres are constants with a positive radius.
            if let Ok(sphere) = SphereCollider::new(center, radius) {
                self.push_collider(sphere);
            }
        }

        self.wind.set_strength(setup.wind_strength);
        if let Some(direction) = setup.wind_direction {
            self.wind.set_direction(direction);
        }
        self.wind.reset_variation();
        self.timestep.clear();
        self.mesh.rebuild(&self.grid);
    }

    /// Re-enter the current mode.
    pub fn reset(&mut self) {
        self.set_mode(self.mode);
    }

    fn rebuild_grid(&mut self) {
        // The config was validated at construction, so this cannot fail.
        if let Ok(grid) = ClothGrid::new(&self.grid_config) {
            self.grid = grid;
        }
    }

    /// Advance by one real frame of `dt` seconds.
    pub fn update(&mut self, dt: F) {
        self.update_observed(dt, &mut NoOpStepObserver);
    }

    /// [`update`](Self::update) with an observer attached to every fixed step.
    pub fn update_observed<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        let dt = if dt.is_finite() && dt > F::zero() { dt } else { F::zero() };

        self.timestep.accumulate(dt);
        let mut steps = 0;
        while self.timestep.consume() {
            self.run_step(observer);
            steps += 1;
        }

        self.advance_sweep(dt);
        self.wind.vary(dt);

        self.mesh.rebuild(&self.grid);
        log::trace!(
            "frame dt={:?}: {} fixed steps, {} vertices, {} triangles",
            dt, steps, self.mesh.vertex_count(), self.mesh.triangle_count()
        );
        observer.on_frame_complete(steps);
    }

    /// Run exactly one fixed physics step, bypassing the accumulator.
    ///
    /// Auxiliary real-frame behaviours and the mesh are left untouched.
    pub fn step_fixed(&mut self) {
        self.run_step(&mut NoOpStepObserver);
    }

    fn run_step<O: StepObserver>(&mut self, observer: &mut O) {
        solver::step(
            &mut self.grid,
            &self.colliders,
            &self.wind,
            &self.solver,
            self.timestep.step(),
            &mut self.rng,
            observer,
        );
    }

    fn advance_sweep(&mut self, dt: F) {
        if let (Some(sweep), Some(collider)) = (self.sweep.as_mut(), self.colliders.first_mut()) {
            collider.center = sweep.advance(dt);
        }
    }

    /// Pointer input: when `tearing`, remove the cloth within the tear radius of `point`.
    pub fn handle_pointer(&mut self, point: Vec3<F>, tearing: bool) -> usize {
        if !tearing {
            return 0;
        }
        self.tear_at(point, self.tear_radius)
    }

    /// Deactivate every particle within `radius` of `point` and its springs.
    pub fn tear_at(&mut self, point: Vec3<F>, radius: F) -> usize {
        let removed = self.grid.tear_at(point, radius);
        if removed > 0 {
            log::debug!("tore {} particles around {:?}", removed, point);
        }
        removed
    }

    /// Add a sphere. The first sphere is the one the sweep drives.
    pub fn add_sphere(&mut self, center: Vec3<F>, radius: F) -> Result<(), ClothError> {
        let sphere = SphereCollider::new(center, radius)?;
        self.push_collider(sphere);
        Ok(())
    }

    fn push_collider(&mut self, sphere: SphereCollider<F>) {
        log::debug!("adding sphere at {:?} r={:?}", sphere.center, sphere.radius);
        if self.colliders.is_empty() {
            self.sweep = Some(ColliderSweep::new(sphere.center, self.sweep_params));
        }
        self.colliders.push(sphere);
    }

    pub fn clear_colliders(&mut self) {
        self.colliders.clear();
        self.sweep = None;
    }

    // Parameter setters clamp to the interactive ranges.

    pub fn set_gravity(&mut self, gravity: F) {
        self.solver.gravity = clamp_to(gravity, GRAVITY_RANGE);
    }

    pub fn set_damping(&mut self, damping: F) {
        self.solver.damping = clamp_to(damping, DAMPING_RANGE);
    }

    pub fn set_wind_strength(&mut self, strength: F) {
        self.wind.set_strength(clamp_to(strength, WIND_STRENGTH_RANGE));
    }

    /// Normalizes `direction`; a zero vector is ignored.
    pub fn set_wind_direction(&mut self, direction: Vec3<F>) {
        self.wind.set_direction(direction);
    }

    pub fn set_tear_threshold(&mut self, threshold: F) {
        self.solver.tear_threshold = clamp_to(threshold, TEAR_THRESHOLD_RANGE);
    }

    /// Negative or non-finite radii are ignored.
    pub fn set_tear_radius(&mut self, radius: F) {
        if radius.is_finite() && radius >= F::zero() {
            self.tear_radius = radius;
        }
    }

    pub fn gravity(&self) -> F { self.solver.gravity }
    pub fn damping(&self) -> F { self.solver.damping }
    pub fn wind_strength(&self) -> F { self.wind.strength() }
    pub fn wind_direction(&self) -> Vec3<F> { self.wind.direction() }
    pub fn tear_threshold(&self) -> F { self.solver.tear_threshold }
    pub fn tear_radius(&self) -> F { self.tear_radius }
    pub fn fixed_dt(&self) -> F { self.timestep.step() }
    pub fn mode(&self) -> SimulationMode { self.mode }

    pub fn grid(&self) -> &ClothGrid<F> { &self.grid }
    pub fn mesh(&self) -> &MeshBuffers<F> { &self.mesh }
    pub fn vertices(&self) -> &[F] { self.mesh.vertices() }
    pub fn indices(&self) -> &[u32] { self.mesh.indices() }
    pub fn colliders(&self) -> &[SphereCollider<F>] { &self.colliders }
    pub fn positions(&self) -> AllocVec<Vec3<F>> { self.grid.positions() }
}
